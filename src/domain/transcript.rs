//! Turn entity for the chat transcript.
//!
//! Turns are immutable records of user/model exchanges. Each turn has a role
//! (user/model), content, and — on model turns only — the list of web sources
//! the provider cited for its answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a turn within a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TurnId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User input.
    User,
    /// Model response.
    Model,
}

/// A web citation the provider attributes its answer to.
///
/// Sources arrive relevance-ranked from the provider; order is meaningful and
/// duplicates are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Location of the cited page.
    pub uri: String,
    /// Title of the cited page.
    pub title: String,
}

impl Source {
    /// Creates a new source.
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// An immutable turn within a transcript.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `sources` is `Some` only for model turns with at least one citation
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier for this turn.
    id: TurnId,

    /// Who authored this turn.
    role: Role,

    /// The content of the turn.
    content: String,

    /// Web sources cited by the provider, absent unless non-empty.
    sources: Option<Vec<Source>>,

    /// When the turn was created.
    created_at: DateTime<Utc>,
}

impl Turn {
    /// Creates a user turn.
    ///
    /// Content is stored exactly as given; surrounding whitespace is not
    /// trimmed.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role: Role::User,
            content: content.into(),
            sources: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a model turn without citations.
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role: Role::Model,
            content: content.into(),
            sources: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a model turn with the provider's citations.
    ///
    /// An empty source sequence means "no sources attached" and is normalized
    /// to `None`, so rendering needs only one presence check.
    pub fn model_with_sources(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            sources: if sources.is_empty() {
                None
            } else {
                Some(sources)
            },
            ..Self::model(content)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the turn ID.
    pub fn id(&self) -> &TurnId {
        &self.id
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the citations to display, `Some` only when non-empty.
    pub fn visible_sources(&self) -> Option<&[Source]> {
        self.sources.as_deref()
    }

    /// Returns when the turn was created.
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// Returns true if this turn is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this turn is from the model.
    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod turn_id {
        use super::*;

        #[test]
        fn generates_unique_values() {
            let id1 = TurnId::new();
            let id2 = TurnId::new();
            assert_ne!(id1, id2);
        }

        #[test]
        fn from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = TurnId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }
    }

    mod role {
        use super::*;

        #[test]
        fn serializes_to_lowercase() {
            let json = serde_json::to_string(&Role::User).unwrap();
            assert_eq!(json, "\"user\"");

            let json = serde_json::to_string(&Role::Model).unwrap();
            assert_eq!(json, "\"model\"");
        }
    }

    mod turn_construction {
        use super::*;

        #[test]
        fn user_creates_user_turn() {
            let turn = Turn::user("What is NVIDIA's latest EPS?");
            assert!(turn.is_user());
            assert!(!turn.is_model());
            assert_eq!(turn.content(), "What is NVIDIA's latest EPS?");
            assert!(turn.visible_sources().is_none());
        }

        #[test]
        fn user_preserves_surrounding_whitespace() {
            let turn = Turn::user("  padded prompt \n");
            assert_eq!(turn.content(), "  padded prompt \n");
        }

        #[test]
        fn model_creates_model_turn_without_sources() {
            let turn = Turn::model("Answer text");
            assert!(turn.is_model());
            assert!(turn.visible_sources().is_none());
        }

        #[test]
        fn model_with_sources_keeps_provider_order() {
            let turn = Turn::model_with_sources(
                "Answer",
                vec![
                    Source::new("https://a.example", "A"),
                    Source::new("https://b.example", "B"),
                ],
            );

            let sources = turn.visible_sources().unwrap();
            assert_eq!(sources.len(), 2);
            assert_eq!(sources[0].uri, "https://a.example");
            assert_eq!(sources[1].uri, "https://b.example");
        }

        #[test]
        fn model_with_empty_sources_normalizes_to_none() {
            let turn = Turn::model_with_sources("Answer", Vec::new());
            assert!(turn.visible_sources().is_none());
        }

        #[test]
        fn duplicate_sources_pass_through() {
            let source = Source::new("https://a.example", "A");
            let turn =
                Turn::model_with_sources("Answer", vec![source.clone(), source.clone()]);
            assert_eq!(turn.visible_sources().unwrap().len(), 2);
        }

        #[test]
        fn sets_created_at() {
            let turn = Turn::user("Hello");
            assert!(turn.created_at() <= &Utc::now());
        }
    }
}
