//! Query handlers for the curation context.

use storyplan_core::error::DomainError;
use storyplan_core::plan::{ApprovalStatus, Plan};
use storyplan_core::repository::PlanRepository;
use uuid::Uuid;

/// Retrieves a plan with its topics, exercises and decisions.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist.
/// Returns `DomainError::Upstream` if the repository fails.
pub async fn get_plan(plan_id: Uuid, repo: &dyn PlanRepository) -> Result<Plan, DomainError> {
    repo.load(plan_id).await
}

/// Lists the plans a learner may follow.
///
/// # Errors
///
/// Returns `DomainError::Upstream` if the repository fails.
pub async fn list_approved_plans(repo: &dyn PlanRepository) -> Result<Vec<Plan>, DomainError> {
    repo.list_by_status(ApprovalStatus::Approved).await
}
