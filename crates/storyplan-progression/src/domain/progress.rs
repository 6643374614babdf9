//! Locating the learner within a plan and deciding what narrative the current
//! topic still needs.
//!
//! A topic is *actionable* when it has exercises and *completed* once any
//! decision has been recorded against it. The current topic is the first
//! actionable topic that is not completed; the previous topic is whatever
//! immediately precedes it in sequence order, actionable or not.

use serde::Serialize;
use storyplan_core::plan::{Decision, Plan, Topic};

/// Indices into `plan.topics` describing where the learner is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCursor {
    /// The first actionable, not-completed topic.
    pub current: Option<usize>,
    /// The topic immediately before `current`.
    pub previous: Option<usize>,
}

impl ProgressCursor {
    /// Whether every actionable topic has been completed.
    #[must_use]
    pub fn is_plan_completed(&self) -> bool {
        self.current.is_none()
    }
}

/// Whether the learner has completed `topic` by recording a decision for it.
#[must_use]
pub fn is_topic_completed(plan: &Plan, topic: &Topic) -> bool {
    plan.has_decision_for(topic.id)
}

/// Finds the current and previous topics.
#[must_use]
pub fn locate_progress(plan: &Plan) -> ProgressCursor {
    let current = plan
        .topics
        .iter()
        .position(|topic| topic.is_actionable() && !is_topic_completed(plan, topic));
    ProgressCursor {
        current,
        previous: current.and_then(|i| i.checked_sub(1)),
    }
}

/// The decision text that steers the story out of `topic`.
///
/// The most recent entry in the decision log wins; the text recorded on the
/// topic itself is the fallback for plans whose log predates it.
#[must_use]
pub fn governing_decision<'a>(plan: &'a Plan, topic: &'a Topic) -> Option<&'a str> {
    plan.latest_decision_for(topic.id)
        .map(|d| d.content.as_str())
        .or(topic.decision.as_deref())
        .filter(|text| !text.trim().is_empty())
}

/// Narrative the current topic needs before it can be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryRequest {
    /// Continue the previous topic's story in light of the learner's decision.
    Continuation {
        /// The previous topic's story text (empty if it never had one).
        previous_story: String,
        /// The decision made at the end of the previous topic.
        decision: String,
        /// The current topic's name.
        next_topic_name: String,
    },
    /// Start a story from the current topic's name alone.
    Fresh {
        /// The current topic's name.
        topic_name: String,
    },
}

/// A continuation is due when the current topic has no story yet and the
/// previous topic ended with a non-empty decision.
#[must_use]
pub fn continuation_request(plan: &Plan, cursor: ProgressCursor) -> Option<StoryRequest> {
    let current = &plan.topics[cursor.current?];
    if current.has_story() {
        return None;
    }
    let previous = &plan.topics[cursor.previous?];
    let decision = governing_decision(plan, previous)?;
    Some(StoryRequest::Continuation {
        previous_story: previous.story.clone().unwrap_or_default(),
        decision: decision.to_owned(),
        next_topic_name: current.name.clone(),
    })
}

/// A fresh story is due when the current topic has no story.
#[must_use]
pub fn fresh_request(plan: &Plan, cursor: ProgressCursor) -> Option<StoryRequest> {
    let current = &plan.topics[cursor.current?];
    if current.has_story() {
        return None;
    }
    Some(StoryRequest::Fresh {
        topic_name: current.name.clone(),
    })
}

/// What the learner sees: where they are and everything they have decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// True once no actionable topic remains.
    pub completed: bool,
    /// The topic the learner should work on next.
    pub current_topic: Option<Topic>,
    /// The topic before it, for recap.
    pub previous_topic: Option<Topic>,
    /// The full decision log.
    pub decisions: Vec<Decision>,
}

impl ProgressReport {
    /// Snapshots the plan at `cursor`.
    #[must_use]
    pub fn from_plan(plan: &Plan, cursor: ProgressCursor) -> Self {
        Self {
            completed: cursor.is_plan_completed(),
            current_topic: cursor.current.map(|i| plan.topics[i].clone()),
            previous_topic: cursor.previous.map(|i| plan.topics[i].clone()),
            decisions: plan.decisions.clone(),
        }
    }
}
