//! Gemini Analyst - Implementation of the Analyst port for Google's Gemini API.
//!
//! Calls `generateContent` with the Google Search tool enabled, so answers
//! arrive with grounding metadata attributing them to web sources.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let analyst = GeminiAnalyst::new(config);
//! ```
//!
//! # Grounding
//!
//! The response's `groundingMetadata.groundingChunks` entries are normalized
//! into `Source` values. Chunks without a non-empty uri and title are dropped;
//! provider order is preserved.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::transcript::Source;
use crate::ports::{Analysis, Analyst, AnalystError};

/// Configuration for the Gemini analyst.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API implementation of the Analyst port.
pub struct GeminiAnalyst {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAnalyst {
    /// Creates a new Gemini analyst with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts a prompt to Gemini's request format.
    ///
    /// Each prompt is sent as a single-turn conversation with the Google
    /// Search tool enabled; no prior transcript is included.
    fn to_gemini_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        }
    }

    /// Sends the request and maps transport failures.
    async fn send_request(&self, prompt: &str) -> Result<Response, AnalystError> {
        let request = Self::to_gemini_request(prompt);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalystError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AnalystError::network(format!("Connection failed: {}", e))
                } else {
                    AnalystError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AnalystError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = parse_retry_after_header(response.headers().get("retry-after"));
        let error_body = response.text().await.unwrap_or_default();

        tracing::debug!("Gemini API returned {}: {}", status, error_body);
        Err(map_status_error(status.as_u16(), &error_body, retry_after))
    }
}

#[async_trait]
impl Analyst for GeminiAnalyst {
    async fn analyze(&self, prompt: &str) -> Result<Analysis, AnalystError> {
        let response = self.send_request(prompt).await?;
        let response = self.handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AnalystError::parse(format!("Failed to read response body: {}", e)))?;

        parse_generate_content(&body)
    }
}

/// Parses a successful generateContent body into an Analysis.
fn parse_generate_content(body: &str) -> Result<Analysis, AnalystError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalystError::parse(format!("Failed to parse response: {}", e)))?;

    let candidate = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| AnalystError::parse("Response contained no candidates"))?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AnalystError::parse("Response contained no text parts"));
    }

    let sources = candidate
        .grounding_metadata
        .map(normalize_sources)
        .unwrap_or_default();

    Ok(Analysis { text, sources })
}

/// Normalizes grounding chunks into ordered sources.
///
/// Drops chunks missing a web reference or whose uri or title is empty,
/// matching the upstream contract that every retained citation has both.
fn normalize_sources(metadata: GroundingMetadata) -> Vec<Source> {
    metadata
        .grounding_chunks
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| match (web.uri, web.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(Source::new(uri, title))
            }
            _ => None,
        })
        .collect()
}

/// Maps a non-success HTTP status onto an AnalystError.
fn map_status_error(status: u16, error_body: &str, retry_after: Option<u32>) -> AnalystError {
    let message = parse_error_message(error_body);

    match status {
        401 | 403 => AnalystError::AuthenticationFailed,
        429 => AnalystError::rate_limited(retry_after.unwrap_or(60)),
        400 => AnalystError::InvalidRequest(message),
        500..=599 => AnalystError::unavailable(format!("Server error {}: {}", status, message)),
        _ => AnalystError::network(format!("Unexpected status {}: {}", status, message)),
    }
}

/// Extracts the message from Gemini's error body, falling back to the raw body.
fn parse_error_message(error_body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(error_body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| error_body.to_string())
}

/// Parses a Retry-After header given in whole seconds.
fn parse_retry_after_header(header: Option<&reqwest::header::HeaderValue>) -> Option<u32> {
    header?.to_str().ok()?.parse().ok()
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks")]
    grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
