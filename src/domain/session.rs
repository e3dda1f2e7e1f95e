//! Chat session state: the single source of truth for the transcript.
//!
//! `ChatSession` holds the ordered transcript of turns plus the in-flight and
//! last-error flags the display layer reads. It carries no business logic
//! beyond ordered append; all decisions live in the orchestrator.

use serde::{Deserialize, Serialize};

use super::transcript::Turn;

/// Welcome message seeded as the first model turn of every session.
pub const WELCOME_MESSAGE: &str = "Welcome. I am the Financial Analyst CEO bot. \
How can I assist you with your financial queries today? For example, you can ask \
'What were the key takeaways from NVIDIA's latest earnings call?'";

/// Conversation state for one chat session.
///
/// # Invariants
///
/// - The transcript is append-only: length is monotonically non-decreasing
///   and existing turns are never reordered or mutated.
/// - Turn order is insertion order is display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Ordered transcript of turns.
    transcript: Vec<Turn>,

    /// True while a provider request has been issued and not yet settled.
    in_flight: bool,

    /// Last request failure, formatted for the error banner.
    last_error: Option<String>,
}

impl ChatSession {
    /// Creates a session seeded with the welcome model turn.
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn::model(WELCOME_MESSAGE)],
            in_flight: false,
            last_error: None,
        }
    }

    /// Appends a turn to the end of the transcript.
    ///
    /// Never fails and never touches existing entries.
    pub fn append_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Sets the in-flight flag. No guard against reentrant sets.
    pub fn set_in_flight(&mut self, flag: bool) {
        self.in_flight = flag;
    }

    /// Stores the last error for display; `None` clears it.
    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read accessors for the display layer
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the transcript in display order.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Returns true while a request is in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Returns the error banner string, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the most recent turn.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.transcript.last()
    }

    /// Returns the number of turns in the transcript.
    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    /// Always false: a session is seeded with the welcome turn.
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
