//! Integration tests for `PgPlanRepository`.
//!
//! Run with `DATABASE_URL` pointing at a disposable `PostgreSQL` server and
//! `cargo test -- --ignored`.

use sqlx::PgPool;
use storyplan_core::error::{DomainError, EntityKind};
use storyplan_core::plan::ApprovalStatus;
use storyplan_core::repository::PlanRepository;
use storyplan_plan_store::pg_plan_repository::PgPlanRepository;
use storyplan_test_support::plan_with_topics;
use uuid::Uuid;

// --- load ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_load_missing_plan_is_not_found(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);
    let plan_id = Uuid::new_v4();

    let result = repo.load(plan_id).await;

    match result {
        Err(DomainError::NotFound { entity, id }) => {
            assert_eq!(entity, EntityKind::Plan);
            assert_eq!(id, plan_id);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// --- save + load ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_save_then_load_returns_same_plan(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);
    let mut plan = plan_with_topics(&[2, 0, 1]);
    plan.topics[0].story = Some("A story about Topic 1".to_owned());

    repo.save(&plan).await.unwrap();
    let loaded = repo.load(plan.id).await.unwrap();

    assert_eq!(loaded, plan);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_save_overwrites_existing_document(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);
    let mut plan = plan_with_topics(&[1]);
    repo.save(&plan).await.unwrap();

    plan.topics[0].completed = true;
    plan.status = ApprovalStatus::Approved;
    repo.save(&plan).await.unwrap();

    let loaded = repo.load(plan.id).await.unwrap();
    assert!(loaded.topics[0].completed);
    assert_eq!(loaded.status, ApprovalStatus::Approved);
}

// --- delete ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_delete_removes_plan_and_reports_missing(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);
    let plan = plan_with_topics(&[1]);
    repo.save(&plan).await.unwrap();

    repo.delete(plan.id).await.unwrap();

    assert!(matches!(
        repo.load(plan.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(plan.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

// --- list_by_status ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_list_by_status_filters_on_status(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);
    let draft = plan_with_topics(&[1]);
    let mut approved = plan_with_topics(&[1]);
    approved.status = ApprovalStatus::Approved;
    repo.save(&draft).await.unwrap();
    repo.save(&approved).await.unwrap();

    let approved_plans = repo.list_by_status(ApprovalStatus::Approved).await.unwrap();
    let draft_plans = repo.list_by_status(ApprovalStatus::Draft).await.unwrap();

    assert_eq!(approved_plans, vec![approved]);
    assert_eq!(draft_plans, vec![draft]);
}

// --- ensure_schema ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let repo = PgPlanRepository::new(pool);

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();
}
