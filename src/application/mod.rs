//! Application layer - orchestration over the domain and ports.
//!
//! This layer coordinates the conversation store and the analyst port. The
//! display layer only reads session state; all decision logic lives here.

pub mod submit;

pub use submit::{ChatOrchestrator, UNKNOWN_ERROR_MESSAGE};
