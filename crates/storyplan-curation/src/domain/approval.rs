//! Approval rules for topics and plans.

use storyplan_core::error::DomainError;
use storyplan_core::plan::{ApprovalStatus, Plan, validate_topic_approvable};
use uuid::Uuid;

/// Marks a single topic approved.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic is absent and
/// `DomainError::InvalidState` if it has no exercises.
pub fn approve_topic(plan: &mut Plan, topic_id: Uuid) -> Result<(), DomainError> {
    let topic = plan.require_topic_mut(topic_id)?;
    if !validate_topic_approvable(topic) {
        return Err(DomainError::InvalidState(format!(
            "topic {topic_id} has no exercises and cannot be approved"
        )));
    }
    topic.status = ApprovalStatus::Approved;
    Ok(())
}

/// Marks the plan and every topic in it approved.
///
/// Topics without exercises are approved too; per-topic checks only apply to
/// [`approve_topic`].
pub fn approve_plan(plan: &mut Plan) {
    for topic in &mut plan.topics {
        topic.status = ApprovalStatus::Approved;
    }
    plan.status = ApprovalStatus::Approved;
}
