//! Submit handler: the query orchestrator.
//!
//! Turns a raw prompt into an analyst call and maps the settled outcome back
//! into the chat session: a user turn before the call, a model turn after it
//! (answer or apology), the error banner on failure, and the in-flight flag
//! around the whole exchange.

use std::sync::{Arc, Mutex};

use crate::domain::session::ChatSession;
use crate::domain::transcript::Turn;
use crate::ports::{Analyst, AnalystError};

/// Fallback shown when a provider failure carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Extracts the user-facing message from an analyst failure.
///
/// Uses the failure's own message verbatim when it has one; a blank message
/// falls back to [`UNKNOWN_ERROR_MESSAGE`] so non-standard failure shapes
/// stay deterministic.
fn failure_message(error: &AnalystError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Orchestrates prompt submission over an analyst implementation.
///
/// Owns the chat session (no ambient singleton; sessions coexist and are
/// testable in isolation) and shares read access with the display layer
/// through [`session_handle`](Self::session_handle).
///
/// Overlapping submissions are serialized by construction: `submit` borrows
/// the orchestrator mutably, so a second call cannot begin before the first
/// settles. The UI-level gating on `is_in_flight()` is advisory only.
pub struct ChatOrchestrator<A: Analyst> {
    session: Arc<Mutex<ChatSession>>,
    analyst: Arc<A>,
}

impl<A: Analyst> ChatOrchestrator<A> {
    /// Creates an orchestrator with a freshly seeded session.
    pub fn new(analyst: Arc<A>) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChatSession::new())),
            analyst,
        }
    }

    /// Returns a shared handle to the session for the display layer.
    pub fn session_handle(&self) -> Arc<Mutex<ChatSession>> {
        Arc::clone(&self.session)
    }

    /// Returns a point-in-time copy of the session.
    pub fn snapshot(&self) -> ChatSession {
        self.session.lock().unwrap().clone()
    }

    /// Submits a prompt and settles it into the session.
    ///
    /// Completion is observed through session updates; this method itself
    /// never fails and provider errors never escape it.
    ///
    /// A prompt that is empty after trimming is a complete no-op: no turn is
    /// appended, no request is made, no error is set. Otherwise the user turn
    /// keeps the untrimmed original text and the prompt is forwarded as-is.
    pub async fn submit(&mut self, prompt: &str) {
        if prompt.trim().is_empty() {
            tracing::debug!("Ignoring empty prompt");
            return;
        }

        {
            let mut session = self.session.lock().unwrap();
            session.append_turn(Turn::user(prompt));
            session.set_in_flight(true);
            session.set_error(None);
        }

        let outcome = self.analyst.analyze(prompt).await;

        let mut session = self.session.lock().unwrap();
        match outcome {
            Ok(analysis) => {
                session.append_turn(Turn::model_with_sources(analysis.text, analysis.sources));
            }
            Err(error) => {
                // Every failure flavor collapses into one error-shaped turn;
                // no retry, the session stays usable for the next prompt.
                tracing::error!("Analysis request failed: {}", error);
                let message = failure_message(&error);
                session.set_error(Some(format!("Error: {}", message)));
                session.append_turn(Turn::model(format!(
                    "Sorry, I encountered an error. {}",
                    message
                )));
            }
        }
        session.set_in_flight(false);
    }
}
