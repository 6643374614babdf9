//! Query handlers for the progression context.
//!
//! Read-only views over a stored plan; nothing here calls the generator or
//! saves.

use serde::Serialize;
use storyplan_core::error::DomainError;
use storyplan_core::plan::Decision;
use storyplan_core::repository::PlanRepository;
use uuid::Uuid;

/// Read-only view of a plan's decision log.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionLogView {
    /// The plan identifier.
    pub plan_id: Uuid,
    /// Every recorded decision, oldest first.
    pub decisions: Vec<Decision>,
}

/// Retrieves the decision log of a plan.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist.
/// Returns `DomainError::Upstream` if the repository fails.
pub async fn get_decisions(
    plan_id: Uuid,
    repo: &dyn PlanRepository,
) -> Result<DecisionLogView, DomainError> {
    let plan = repo.load(plan_id).await?;
    Ok(DecisionLogView {
        plan_id,
        decisions: plan.decisions,
    })
}

#[cfg(test)]
mod tests {
    use storyplan_core::error::{DomainError, EntityKind};
    use storyplan_core::plan::Decision;
    use storyplan_test_support::{InMemoryPlanRepository, fixed_now, plan_with_topics};
    use uuid::Uuid;

    use crate::application::query_handlers::get_decisions;

    #[tokio::test]
    async fn test_get_decisions_returns_log_in_order() {
        // Arrange
        let mut plan = plan_with_topics(&[1, 1]);
        let plan_id = plan.id;
        for (i, content) in ["first", "second"].iter().enumerate() {
            plan.decisions.push(Decision {
                id: Uuid::new_v4(),
                plan_id,
                topic_id: plan.topics[i].id,
                content: (*content).to_owned(),
                feedback: None,
                recorded_at: fixed_now(),
            });
        }
        let repo = InMemoryPlanRepository::with_plan(plan);

        // Act
        let view = get_decisions(plan_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.plan_id, plan_id);
        let contents: Vec<&str> = view.decisions.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["decisions"][0]["content"], "first");
    }

    #[tokio::test]
    async fn test_get_decisions_returns_not_found_for_missing_plan() {
        // Arrange
        let plan_id = Uuid::new_v4();
        let repo = InMemoryPlanRepository::new();

        // Act
        let result = get_decisions(plan_id, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, EntityKind::Plan);
                assert_eq!(id, plan_id);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
