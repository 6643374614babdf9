//! Shared test doubles and utilities for the Storyplan engine.

mod clock;
mod fixtures;
mod generator;
mod repository;
mod tracing;

pub use clock::FixedClock;
pub use fixtures::{exercise, fixed_now, plan_with_topics};
pub use generator::{
    FailingContentGenerator, GeneratorCall, ScriptedContentGenerator, StallingContentGenerator,
};
pub use repository::{FailingPlanRepository, InMemoryPlanRepository};
pub use tracing::init_test_tracing;
