//! Progression rules, independent of any collaborator.

pub mod commands;
pub mod decisions;
pub mod progress;
