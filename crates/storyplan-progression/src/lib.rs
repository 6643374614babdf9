//! Storyplan: learner progression.
//!
//! Decides which topic the learner is on, keeps narrative text populated
//! ahead of the learner, and records the free-text decisions that steer the
//! story from one topic to the next.

pub mod application;
pub mod domain;
