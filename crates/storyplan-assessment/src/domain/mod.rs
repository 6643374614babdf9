//! Grading and sequencing rules.

pub mod commands;
pub mod evaluation;
