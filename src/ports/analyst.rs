//! Analyst Port - Interface to the remote analysis capability.
//!
//! This port abstracts the search-augmented generation call, enabling the
//! orchestrator to obtain grounded answers without coupling to a specific
//! provider.
//!
//! # Design
//!
//! - One prompt in, one settled result out; no streaming, no partial results
//! - Sources are normalized by the adapter before they cross this boundary
//! - Every failure flavor carries a human-readable message via `Display`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::transcript::Source;

/// Port for the remote analysis capability.
///
/// Implementations perform a search-augmented generation call and translate
/// between the provider-specific API and our domain types.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Sends a single prompt and returns the settled result.
    ///
    /// Each prompt is sent independently; no prior transcript is included.
    async fn analyze(&self, prompt: &str) -> Result<Analysis, AnalystError>;
}

/// A settled result from the analysis capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// The model's textual answer.
    pub text: String,
    /// Web citations in provider (relevance-ranked) order; may be empty.
    pub sources: Vec<Source>,
}

impl Analysis {
    /// Creates an analysis without citations.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }

    /// Sets the citation list.
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}

/// Analysis capability errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalystError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Failure with no further classification; displays its raw message.
    #[error("{0}")]
    Other(String),
}

impl AnalystError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unclassified error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
