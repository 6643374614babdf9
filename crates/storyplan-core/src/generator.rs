//! Content generator abstraction.
//!
//! Story text, exercises, explanations and feedback all come from an external
//! generator. The engine treats its outputs as already-structured values and
//! bounds every call with a timeout via [`bounded`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::DomainError;
use crate::plan::Exercise;

/// An exercise as produced by the generator, before it is given an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExercise {
    /// The question shown to the learner.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Text of the correct option.
    pub answer: String,
    /// Index of the correct option within `options`.
    pub correct_answer_index: usize,
    /// Why the correct option is correct.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl GeneratedExercise {
    /// Attaches an identifier, producing a plan exercise.
    #[must_use]
    pub fn into_exercise(self, id: Uuid) -> Exercise {
        Exercise {
            id,
            question: self.question,
            options: self.options,
            answer: self.answer,
            correct_answer_index: self.correct_answer_index,
            explanation: self.explanation,
        }
    }
}

/// Natural-language generation collaborator.
///
/// Every method may fail; failures are reported as `DomainError::Upstream`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// A fresh story seeded only by the topic name.
    async fn story(&self, topic_name: &str) -> Result<String, DomainError>;

    /// A story that continues `previous_story` in light of the learner's
    /// `decision` and leads into `next_topic_name`.
    async fn story_continuation(
        &self,
        previous_story: &str,
        decision: &str,
        next_topic_name: &str,
    ) -> Result<String, DomainError>;

    /// `count` multiple-choice exercises about the topic.
    async fn exercises(
        &self,
        topic_name: &str,
        count: usize,
    ) -> Result<Vec<GeneratedExercise>, DomainError>;

    /// An explanation of why the submitted answer is right or wrong.
    async fn explanation(
        &self,
        question: &str,
        correct_answer: &str,
        submitted_answer: &str,
        is_correct: bool,
    ) -> Result<String, DomainError>;

    /// Constructive feedback on a learner decision.
    async fn feedback(&self, decision: &str) -> Result<String, DomainError>;
}

/// Runs one generator call under `timeout`.
///
/// Elapsed timeouts and any error the generator returns surface as
/// `DomainError::Upstream`. Dropping the returned future cancels the call.
///
/// # Errors
///
/// Returns `DomainError::Upstream` if the call fails or does not finish in time.
pub async fn bounded<T, F>(
    operation: &'static str,
    timeout: Duration,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            warn!(operation, error = %err, "content generation failed");
            match err {
                DomainError::Upstream(message) => Err(DomainError::Upstream(message)),
                other => Err(DomainError::Upstream(format!("{operation}: {other}"))),
            }
        }
        Err(_) => {
            warn!(
                operation,
                timeout_ms = timeout.as_millis(),
                "content generation timed out"
            );
            Err(DomainError::Upstream(format!(
                "{operation} timed out after {}ms",
                timeout.as_millis()
            )))
        }
    }
}
