//! Answer grading and exercise sequencing.

use storyplan_core::error::DomainError;
use storyplan_core::plan::Plan;
use uuid::Uuid;

/// Compares a submitted answer with the stored one.
///
/// Leading and trailing whitespace is ignored on both sides and letters are
/// compared case-insensitively. Internal whitespace and punctuation must match.
#[must_use]
pub fn is_correct_answer(expected: &str, submitted: &str) -> bool {
    expected
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .eq(submitted.trim().chars().flat_map(char::to_lowercase))
}

/// Where a graded answer moves the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advancement {
    /// Wrong answer: the learner stays on the same exercise.
    Stay,
    /// Right answer with more exercises left; holds the next exercise's index.
    NextExercise(usize),
    /// Right answer to the topic's last exercise.
    TopicCompleted {
        /// Index of the first later topic with exercises, if any.
        next_topic: Option<usize>,
    },
}

/// The outcome of grading one answer, as indices into the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Index of the topic within `plan.topics`.
    pub topic_index: usize,
    /// Index of the exercise within the topic.
    pub exercise_index: usize,
    /// Whether the answer was right.
    pub is_correct: bool,
    /// What happens next.
    pub advancement: Advancement,
}

/// Index of the first topic after `after` that has exercises.
#[must_use]
pub fn next_actionable_topic(plan: &Plan, after: usize) -> Option<usize> {
    plan.topics
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, topic)| topic.is_actionable())
        .map(|(i, _)| i)
}

/// Grades `submitted` against the identified exercise without changing the plan.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic or the exercise is absent, and
/// `DomainError::InvalidInput` if the submitted answer is blank.
pub fn evaluate(
    plan: &Plan,
    topic_id: Uuid,
    exercise_id: Uuid,
    submitted: &str,
) -> Result<Evaluation, DomainError> {
    let topic_index = plan
        .topic_position(topic_id)
        .ok_or_else(|| DomainError::topic_not_found(topic_id))?;
    let topic = &plan.topics[topic_index];
    let exercise_index = topic
        .exercise_position(exercise_id)
        .ok_or_else(|| DomainError::exercise_not_found(exercise_id))?;

    if submitted.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "submitted answer must not be blank".to_owned(),
        ));
    }

    let is_correct = is_correct_answer(&topic.exercises[exercise_index].answer, submitted);
    let advancement = if !is_correct {
        Advancement::Stay
    } else if exercise_index + 1 < topic.exercises.len() {
        Advancement::NextExercise(exercise_index + 1)
    } else {
        Advancement::TopicCompleted {
            next_topic: next_actionable_topic(plan, topic_index),
        }
    };

    Ok(Evaluation {
        topic_index,
        exercise_index,
        is_correct,
        advancement,
    })
}
