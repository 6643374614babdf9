//! Test generators: mock `ContentGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storyplan_core::error::DomainError;
use storyplan_core::generator::{ContentGenerator, GeneratedExercise};

/// One recorded call into a [`ScriptedContentGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorCall {
    /// `story(topic_name)`.
    Story {
        /// The topic name passed in.
        topic_name: String,
    },
    /// `story_continuation(previous_story, decision, next_topic_name)`.
    StoryContinuation {
        /// The previous topic's story.
        previous_story: String,
        /// The learner's decision.
        decision: String,
        /// The topic the continuation leads into.
        next_topic_name: String,
    },
    /// `exercises(topic_name, count)`.
    Exercises {
        /// The topic name passed in.
        topic_name: String,
        /// How many exercises were requested.
        count: usize,
    },
    /// `explanation(..)`.
    Explanation {
        /// The submitted answer.
        submitted_answer: String,
        /// The verdict passed in.
        is_correct: bool,
    },
    /// `feedback(decision)`.
    Feedback {
        /// The decision text.
        decision: String,
    },
}

/// A generator that answers every call with deterministic text derived from
/// its inputs and records each call.
///
/// - `story` returns `"A story about {topic}"`
/// - `story_continuation` returns `"After you chose '{decision}', {next_topic} begins"`
/// - `exercises` returns `count` consistent three-option exercises
/// - `explanation` returns `"Correct!"` or `"The answer is {correct}"`
/// - `feedback` returns `"Thoughtful choice: {decision}"`
#[derive(Debug, Default)]
pub struct ScriptedContentGenerator {
    calls: Mutex<Vec<GeneratorCall>>,
    continuation_reply: Option<String>,
    exercises_reply: Option<Vec<GeneratedExercise>>,
}

impl ScriptedContentGenerator {
    /// Create a generator with the default replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the continuation reply with fixed text.
    #[must_use]
    pub fn with_continuation_reply(mut self, reply: impl Into<String>) -> Self {
        self.continuation_reply = Some(reply.into());
        self
    }

    /// Replace the exercises reply with a fixed list.
    #[must_use]
    pub fn with_exercises_reply(mut self, reply: Vec<GeneratedExercise>) -> Self {
        self.exercises_reply = Some(reply);
        self
    }

    /// Returns a snapshot of every call made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GeneratorCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContentGenerator for ScriptedContentGenerator {
    async fn story(&self, topic_name: &str) -> Result<String, DomainError> {
        self.record(GeneratorCall::Story {
            topic_name: topic_name.to_owned(),
        });
        Ok(format!("A story about {topic_name}"))
    }

    async fn story_continuation(
        &self,
        previous_story: &str,
        decision: &str,
        next_topic_name: &str,
    ) -> Result<String, DomainError> {
        self.record(GeneratorCall::StoryContinuation {
            previous_story: previous_story.to_owned(),
            decision: decision.to_owned(),
            next_topic_name: next_topic_name.to_owned(),
        });
        Ok(self
            .continuation_reply
            .clone()
            .unwrap_or_else(|| format!("After you chose '{decision}', {next_topic_name} begins")))
    }

    async fn exercises(
        &self,
        topic_name: &str,
        count: usize,
    ) -> Result<Vec<GeneratedExercise>, DomainError> {
        self.record(GeneratorCall::Exercises {
            topic_name: topic_name.to_owned(),
            count,
        });
        if let Some(reply) = &self.exercises_reply {
            return Ok(reply.clone());
        }
        Ok((1..=count)
            .map(|n| GeneratedExercise {
                question: format!("{topic_name} question {n}"),
                options: vec!["alpha".to_owned(), "beta".to_owned(), "gamma".to_owned()],
                answer: "beta".to_owned(),
                correct_answer_index: 1,
                explanation: Some(format!("beta is right for question {n}")),
            })
            .collect())
    }

    async fn explanation(
        &self,
        _question: &str,
        correct_answer: &str,
        submitted_answer: &str,
        is_correct: bool,
    ) -> Result<String, DomainError> {
        self.record(GeneratorCall::Explanation {
            submitted_answer: submitted_answer.to_owned(),
            is_correct,
        });
        if is_correct {
            Ok("Correct!".to_owned())
        } else {
            Ok(format!("The answer is {correct_answer}"))
        }
    }

    async fn feedback(&self, decision: &str) -> Result<String, DomainError> {
        self.record(GeneratorCall::Feedback {
            decision: decision.to_owned(),
        });
        Ok(format!("Thoughtful choice: {decision}"))
    }
}

/// A generator whose every call fails with an upstream error.
#[derive(Debug)]
pub struct FailingContentGenerator;

#[async_trait]
impl ContentGenerator for FailingContentGenerator {
    async fn story(&self, _topic_name: &str) -> Result<String, DomainError> {
        Err(DomainError::Upstream("model unavailable".into()))
    }

    async fn story_continuation(
        &self,
        _previous_story: &str,
        _decision: &str,
        _next_topic_name: &str,
    ) -> Result<String, DomainError> {
        Err(DomainError::Upstream("model unavailable".into()))
    }

    async fn exercises(
        &self,
        _topic_name: &str,
        _count: usize,
    ) -> Result<Vec<GeneratedExercise>, DomainError> {
        Err(DomainError::Upstream("model unavailable".into()))
    }

    async fn explanation(
        &self,
        _question: &str,
        _correct_answer: &str,
        _submitted_answer: &str,
        _is_correct: bool,
    ) -> Result<String, DomainError> {
        Err(DomainError::Upstream("model unavailable".into()))
    }

    async fn feedback(&self, _decision: &str) -> Result<String, DomainError> {
        Err(DomainError::Upstream("model unavailable".into()))
    }
}

/// A generator whose calls never complete. Pair with a short
/// `generation_timeout` to exercise the timeout path.
#[derive(Debug)]
pub struct StallingContentGenerator;

#[async_trait]
impl ContentGenerator for StallingContentGenerator {
    async fn story(&self, _topic_name: &str) -> Result<String, DomainError> {
        std::future::pending().await
    }

    async fn story_continuation(
        &self,
        _previous_story: &str,
        _decision: &str,
        _next_topic_name: &str,
    ) -> Result<String, DomainError> {
        std::future::pending().await
    }

    async fn exercises(
        &self,
        _topic_name: &str,
        _count: usize,
    ) -> Result<Vec<GeneratedExercise>, DomainError> {
        std::future::pending().await
    }

    async fn explanation(
        &self,
        _question: &str,
        _correct_answer: &str,
        _submitted_answer: &str,
        _is_correct: bool,
    ) -> Result<String, DomainError> {
        std::future::pending().await
    }

    async fn feedback(&self, _decision: &str) -> Result<String, DomainError> {
        std::future::pending().await
    }
}
