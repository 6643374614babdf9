//! Storyplan plan store: `PlanRepository` over `PostgreSQL`.

pub mod pg_plan_repository;
pub mod schema;
