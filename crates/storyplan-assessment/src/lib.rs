//! Storyplan: answer evaluation.
//!
//! Grades a learner's answer, advances them through a topic's exercises, and
//! signals when a topic is finished and which topic comes next.

pub mod application;
pub mod domain;
