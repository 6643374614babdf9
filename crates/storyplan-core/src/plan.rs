//! The curriculum entity graph: plans own topics, topics own exercises, and
//! plans keep an append-only log of learner decisions.
//!
//! Everything here is plain data plus invariant checks. Behaviour that needs a
//! collaborator lives in the engine crates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Approval state shared by plans and topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Still being curated.
    #[default]
    Draft,
    /// Released to the learner.
    Approved,
}

impl ApprovalStatus {
    /// The lowercase name used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise identifier.
    pub id: Uuid,
    /// The question shown to the learner.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Text of the correct option.
    pub answer: String,
    /// Index of the correct option within `options`.
    pub correct_answer_index: usize,
    /// Optional authored explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Caller-supplied exercise content, before an identifier is assigned.
///
/// The answer text is derived from `options[correct_answer_index]`, so a draft
/// can never disagree with itself about which option is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    /// The question shown to the learner.
    pub question: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index of the correct option within `options`.
    pub correct_answer_index: usize,
    /// Optional authored explanation.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Exercise {
    /// Builds an exercise from a draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if the question or any option is
    /// blank, there are no options, or the correct-answer index is out of
    /// range.
    pub fn from_draft(id: Uuid, draft: ExerciseDraft) -> Result<Self, DomainError> {
        if draft.question.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "exercise question must not be blank".to_owned(),
            ));
        }
        if let Some(blank) = draft.options.iter().position(|o| o.trim().is_empty()) {
            return Err(DomainError::InvalidInput(format!(
                "exercise option {blank} must not be blank"
            )));
        }
        let Some(answer) = draft.options.get(draft.correct_answer_index).cloned() else {
            return Err(DomainError::InvalidInput(format!(
                "correct answer index {} is out of range for {} options",
                draft.correct_answer_index,
                draft.options.len()
            )));
        };

        Ok(Self {
            id,
            question: draft.question,
            options: draft.options,
            answer,
            correct_answer_index: draft.correct_answer_index,
            explanation: draft.explanation,
        })
    }
}

/// Returns true iff the exercise's correct-answer index is in range and
/// points at its stored answer text.
#[must_use]
pub fn validate_exercise_index(exercise: &Exercise) -> bool {
    exercise
        .options
        .get(exercise.correct_answer_index)
        .is_some_and(|option| *option == exercise.answer)
}

/// One ordered unit of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic identifier.
    pub id: Uuid,
    /// Display name; also seeds story generation.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Curation status.
    #[serde(default)]
    pub status: ApprovalStatus,
    /// Narrative text shown before the exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    /// The learner's most recent decision text for this topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    /// Exercises, in the order the learner meets them.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// 0-based position within the owning plan.
    #[serde(default)]
    pub position: usize,
    /// Set once the learner answers the last exercise correctly.
    #[serde(default)]
    pub completed: bool,
    /// Optional illustration reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Topic {
    /// Creates an empty draft topic.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            status: ApprovalStatus::Draft,
            story: None,
            decision: None,
            exercises: Vec::new(),
            position: 0,
            completed: false,
            image_url: None,
        }
    }

    /// A topic is actionable when it has at least one exercise.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !self.exercises.is_empty()
    }

    /// Whether the topic carries non-blank story text.
    #[must_use]
    pub fn has_story(&self) -> bool {
        self.story.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Finds an exercise by identifier.
    #[must_use]
    pub fn exercise(&self, exercise_id: Uuid) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    /// Finds an exercise's index within the topic's sequence.
    #[must_use]
    pub fn exercise_position(&self, exercise_id: Uuid) -> Option<usize> {
        self.exercises.iter().position(|e| e.id == exercise_id)
    }
}

/// Returns true iff the topic may move to `approved`.
#[must_use]
pub fn validate_topic_approvable(topic: &Topic) -> bool {
    !topic.exercises.is_empty()
}

/// A learner's free-text choice recorded against a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Decision identifier.
    pub id: Uuid,
    /// The plan whose log holds this decision.
    pub plan_id: Uuid,
    /// The topic the decision was made in.
    pub topic_id: Uuid,
    /// What the learner wrote.
    pub content: String,
    /// Generated feedback, possibly backfilled later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// When the decision was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// The top-level curriculum object for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Plan identifier.
    pub id: Uuid,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The subject being taught.
    pub subject: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Curation status.
    #[serde(default)]
    pub status: ApprovalStatus,
    /// Topics, in curriculum order.
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Append-only decision log.
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

impl Plan {
    /// Creates an empty draft plan.
    #[must_use]
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subject: subject.into(),
            description: description.into(),
            status: ApprovalStatus::Draft,
            topics: Vec::new(),
            decisions: Vec::new(),
        }
    }

    /// Finds a topic by identifier.
    #[must_use]
    pub fn topic(&self, topic_id: Uuid) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// Finds a topic by identifier for mutation.
    pub fn topic_mut(&mut self, topic_id: Uuid) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }

    /// Finds a topic's index within the plan's sequence.
    #[must_use]
    pub fn topic_position(&self, topic_id: Uuid) -> Option<usize> {
        self.topics.iter().position(|t| t.id == topic_id)
    }

    /// Like [`Plan::topic`], but fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no topic has the identifier.
    pub fn require_topic(&self, topic_id: Uuid) -> Result<&Topic, DomainError> {
        self.topic(topic_id)
            .ok_or_else(|| DomainError::topic_not_found(topic_id))
    }

    /// Like [`Plan::topic_mut`], but fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no topic has the identifier.
    pub fn require_topic_mut(&mut self, topic_id: Uuid) -> Result<&mut Topic, DomainError> {
        self.topic_mut(topic_id)
            .ok_or_else(|| DomainError::topic_not_found(topic_id))
    }

    /// Whether any decision has been recorded against the topic.
    #[must_use]
    pub fn has_decision_for(&self, topic_id: Uuid) -> bool {
        self.decisions.iter().any(|d| d.topic_id == topic_id)
    }

    /// The most recently recorded decision for the topic, if any.
    #[must_use]
    pub fn latest_decision_for(&self, topic_id: Uuid) -> Option<&Decision> {
        self.decisions.iter().rev().find(|d| d.topic_id == topic_id)
    }

    /// Recomputes every topic's position from its place in the sequence.
    ///
    /// Must run after every insert, delete or reorder.
    pub fn reindex_topics(&mut self) {
        for (position, topic) in self.topics.iter_mut().enumerate() {
            topic.position = position;
        }
    }
}
