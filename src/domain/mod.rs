//! Domain layer containing the conversation state and its types.
//!
//! # Module Organization
//!
//! - `transcript` - Turn, Role, and Source entities
//! - `session` - Chat session state (transcript, in-flight flag, last error)

pub mod session;
pub mod transcript;

pub use session::{ChatSession, WELCOME_MESSAGE};
pub use transcript::{Role, Source, Turn, TurnId};
