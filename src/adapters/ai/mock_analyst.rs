//! Mock Analyst for testing.
//!
//! Provides a configurable mock implementation of the Analyst port, allowing
//! tests to run without calling the real Gemini API.
//!
//! # Features
//!
//! - Pre-configured results (consumed in order)
//! - Error injection for resilience testing
//! - Simulated delays for in-flight observation
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let analyst = MockAnalyst::new()
//!     .with_analysis(Analysis::new("Revenue grew 122% year over year."));
//!
//! let result = analyst.analyze("What is NVIDIA's latest EPS?").await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::transcript::Source;
use crate::ports::{Analysis, Analyst, AnalystError};

/// Mock analyst for testing.
///
/// Configurable to return specific results, simulate delays, or inject errors.
#[derive(Debug, Clone)]
pub struct MockAnalyst {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<Result<Analysis, AnalystError>>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompts received, for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockAnalyst {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalyst {
    /// Creates a new mock analyst with default settings.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful analysis to the queue.
    pub fn with_analysis(self, analysis: Analysis) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(analysis));
        self
    }

    /// Adds a successful text-only response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_analysis(Analysis::new(text))
    }

    /// Adds a grounded response to the queue.
    pub fn with_grounded_response(self, text: impl Into<String>, sources: Vec<Source>) -> Self {
        self.with_analysis(Analysis::new(text).with_sources(sources))
    }

    /// Adds an error outcome to the queue.
    pub fn with_error(self, error: AnalystError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this analyst.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded prompts.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next outcome or a default echo response.
    fn next_outcome(&self, prompt: &str) -> Result<Analysis, AnalystError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Analysis::new(format!("Mock analysis of: {}", prompt))))
    }
}

#[async_trait]
impl Analyst for MockAnalyst {
    async fn analyze(&self, prompt: &str) -> Result<Analysis, AnalystError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_outcome(prompt)
    }
}
