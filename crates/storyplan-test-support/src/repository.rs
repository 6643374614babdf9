//! Test repositories: mock `PlanRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use storyplan_core::error::DomainError;
use storyplan_core::plan::{ApprovalStatus, Plan};
use storyplan_core::repository::PlanRepository;
use uuid::Uuid;

/// A map-backed plan repository that records every `save` call.
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: Mutex<HashMap<Uuid, Plan>>,
    saved: Mutex<Vec<Plan>>,
}

impl InMemoryPlanRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with `plan`. Seeding is not recorded as
    /// a save.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_plan(plan: Plan) -> Self {
        let repo = Self::default();
        repo.insert(plan);
        repo
    }

    /// Seeds another plan without recording a save.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert(&self, plan: Plan) {
        self.plans.lock().unwrap().insert(plan.id, plan);
    }

    /// Returns the currently stored copy of a plan.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self, plan_id: Uuid) -> Option<Plan> {
        self.plans.lock().unwrap().get(&plan_id).cloned()
    }

    /// Returns a snapshot of every plan passed to `save`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_plans(&self) -> Vec<Plan> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn load(&self, plan_id: Uuid) -> Result<Plan, DomainError> {
        self.plans
            .lock()
            .unwrap()
            .get(&plan_id)
            .cloned()
            .ok_or_else(|| DomainError::plan_not_found(plan_id))
    }

    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        self.plans.lock().unwrap().insert(plan.id, plan.clone());
        self.saved.lock().unwrap().push(plan.clone());
        Ok(())
    }

    async fn delete(&self, plan_id: Uuid) -> Result<(), DomainError> {
        self.plans
            .lock()
            .unwrap()
            .remove(&plan_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::plan_not_found(plan_id))
    }

    async fn list_by_status(&self, status: ApprovalStatus) -> Result<Vec<Plan>, DomainError> {
        let mut plans: Vec<Plan> = self
            .plans
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        plans.sort_by_key(|p| p.id);
        Ok(plans)
    }
}

/// A plan repository that always returns an upstream error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingPlanRepository;

#[async_trait]
impl PlanRepository for FailingPlanRepository {
    async fn load(&self, _plan_id: Uuid) -> Result<Plan, DomainError> {
        Err(DomainError::Upstream("connection refused".into()))
    }

    async fn save(&self, _plan: &Plan) -> Result<(), DomainError> {
        Err(DomainError::Upstream("connection refused".into()))
    }

    async fn delete(&self, _plan_id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Upstream("connection refused".into()))
    }

    async fn list_by_status(&self, _status: ApprovalStatus) -> Result<Vec<Plan>, DomainError> {
        Err(DomainError::Upstream("connection refused".into()))
    }
}
