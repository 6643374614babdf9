//! Plan repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::plan::{ApprovalStatus, Plan};

/// Repository trait for loading and storing whole plans.
///
/// A successful `save` must be visible to the next `load` of the same plan
/// from the same process. Implementations do not serialize writers: callers
/// hold at most one mutating operation per plan identifier at a time.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Load a plan by identifier.
    ///
    /// Fails with `DomainError::NotFound` if the plan does not exist.
    async fn load(&self, plan_id: Uuid) -> Result<Plan, DomainError>;

    /// Insert or replace a plan.
    async fn save(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Delete a plan together with everything it owns.
    ///
    /// Fails with `DomainError::NotFound` if the plan does not exist.
    async fn delete(&self, plan_id: Uuid) -> Result<(), DomainError>;

    /// List every plan with the given status.
    async fn list_by_status(&self, status: ApprovalStatus) -> Result<Vec<Plan>, DomainError>;
}
