//! Domain error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// The kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A learning plan.
    Plan,
    /// A topic within a plan.
    Topic,
    /// An exercise within a topic.
    Exercise,
    /// A learner decision within a plan's decision log.
    Decision,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Plan => "plan",
            Self::Topic => "topic",
            Self::Exercise => "exercise",
            Self::Decision => "decision",
        };
        f.write_str(s)
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A plan, topic, exercise or decision identifier was absent.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What kind of entity was looked up.
        entity: EntityKind,
        /// The identifier that was not found.
        id: Uuid,
    },

    /// The caller supplied malformed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation would violate a plan invariant.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A collaborator (content generator or plan repository) failed or timed out.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl DomainError {
    /// Shorthand for a missing plan.
    #[must_use]
    pub fn plan_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::Plan,
            id,
        }
    }

    /// Shorthand for a missing topic.
    #[must_use]
    pub fn topic_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::Topic,
            id,
        }
    }

    /// Shorthand for a missing exercise.
    #[must_use]
    pub fn exercise_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::Exercise,
            id,
        }
    }

    /// Shorthand for a missing decision.
    #[must_use]
    pub fn decision_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::Decision,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let id = Uuid::nil();

        let err = DomainError::topic_not_found(id);

        assert_eq!(
            err.to_string(),
            "topic not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_upstream_message_is_prefixed() {
        let err = DomainError::Upstream("generator timed out".into());

        assert_eq!(err.to_string(), "upstream failure: generator timed out");
    }
}
