//! Recording learner decisions.
//!
//! The decision log is append-only. The one permitted change to an existing
//! entry is filling in feedback that was never generated.

use chrono::{DateTime, Utc};
use storyplan_core::error::DomainError;
use storyplan_core::plan::{Decision, Plan};
use uuid::Uuid;

/// Checks that `content` may be recorded against `topic_id`.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for blank content and
/// `DomainError::NotFound` if the topic is absent.
pub fn validate_decision(plan: &Plan, topic_id: Uuid, content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "decision text must not be blank".to_owned(),
        ));
    }
    plan.require_topic(topic_id)?;
    Ok(())
}

/// Appends a decision to the log and mirrors its text onto the topic.
///
/// # Errors
///
/// Returns the same errors as [`validate_decision`]; the plan is untouched
/// when validation fails.
pub fn record_decision(
    plan: &mut Plan,
    decision_id: Uuid,
    topic_id: Uuid,
    content: String,
    feedback: Option<String>,
    recorded_at: DateTime<Utc>,
) -> Result<Decision, DomainError> {
    validate_decision(plan, topic_id, &content)?;

    let decision = Decision {
        id: decision_id,
        plan_id: plan.id,
        topic_id,
        content,
        feedback,
        recorded_at,
    };
    plan.require_topic_mut(topic_id)?.decision = Some(decision.content.clone());
    plan.decisions.push(decision.clone());
    Ok(decision)
}

/// Finds a decision that still needs feedback.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the decision is absent and
/// `DomainError::InvalidState` if it already has feedback.
pub fn pending_feedback(plan: &Plan, decision_id: Uuid) -> Result<&Decision, DomainError> {
    let decision = plan
        .decisions
        .iter()
        .find(|d| d.id == decision_id)
        .ok_or_else(|| DomainError::decision_not_found(decision_id))?;
    if decision.feedback.is_some() {
        return Err(DomainError::InvalidState(format!(
            "decision {decision_id} already has feedback"
        )));
    }
    Ok(decision)
}

/// Stores backfilled feedback on a decision.
///
/// # Errors
///
/// Returns the same errors as [`pending_feedback`].
pub fn backfill_feedback(
    plan: &mut Plan,
    decision_id: Uuid,
    feedback: String,
) -> Result<(), DomainError> {
    pending_feedback(plan, decision_id)?;
    if let Some(decision) = plan.decisions.iter_mut().find(|d| d.id == decision_id) {
        decision.feedback = Some(feedback);
    }
    Ok(())
}
