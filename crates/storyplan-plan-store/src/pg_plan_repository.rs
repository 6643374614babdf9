//! `PostgreSQL` implementation of the `PlanRepository` trait.
//!
//! Each plan is stored whole as a JSONB document keyed by its id. The status
//! column duplicates `document->>'status'` so approved plans can be listed
//! without decoding every row.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, warn};
use uuid::Uuid;

use storyplan_core::error::DomainError;
use storyplan_core::plan::{ApprovalStatus, Plan};
use storyplan_core::repository::PlanRepository;

use crate::schema::CREATE_LEARNING_PLANS_TABLE;

/// PostgreSQL-backed plan repository.
#[derive(Debug, Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Creates a new `PgPlanRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the plans table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Upstream` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_LEARNING_PLANS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| upstream("ensure_schema", &e))?;
        Ok(())
    }
}

fn upstream(operation: &str, err: &sqlx::Error) -> DomainError {
    warn!(operation, error = %err, "plan store query failed");
    DomainError::Upstream(format!("plan store {operation} failed: {err}"))
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn load(&self, plan_id: Uuid) -> Result<Plan, DomainError> {
        let row: Option<(Json<Plan>,)> =
            sqlx::query_as("SELECT document FROM learning_plans WHERE plan_id = $1")
                .bind(plan_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| upstream("load", &e))?;

        row.map(|(Json(plan),)| plan)
            .ok_or_else(|| DomainError::plan_not_found(plan_id))
    }

    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO learning_plans (plan_id, status, document, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (plan_id) DO UPDATE
            SET status = EXCLUDED.status,
                document = EXCLUDED.document,
                updated_at = NOW()
            ",
        )
        .bind(plan.id)
        .bind(plan.status.as_str())
        .bind(Json(plan))
        .execute(&self.pool)
        .await
        .map_err(|e| upstream("save", &e))?;

        debug!(plan_id = %plan.id, "plan saved");
        Ok(())
    }

    async fn delete(&self, plan_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM learning_plans WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&self.pool)
            .await
            .map_err(|e| upstream("delete", &e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::plan_not_found(plan_id));
        }
        Ok(())
    }

    async fn list_by_status(&self, status: ApprovalStatus) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<(Json<Plan>,)> = sqlx::query_as(
            "SELECT document FROM learning_plans WHERE status = $1 ORDER BY plan_id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| upstream("list_by_status", &e))?;

        Ok(rows.into_iter().map(|(Json(plan),)| plan).collect())
    }
}
