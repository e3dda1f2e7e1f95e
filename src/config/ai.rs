//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Gemini provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model to request
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini API key is configured
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    ///
    /// The API key is the startup credential: its absence is fatal before
    /// any request can be made.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired(
                "FINSIGHT__AI__GEMINI_API_KEY",
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName);
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}
