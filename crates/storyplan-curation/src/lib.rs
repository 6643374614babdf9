//! Storyplan: plan curation.
//!
//! Authoring operations: creating and deleting plans, adding, removing and
//! reordering topics, editing exercises, approvals, and filling topics with
//! generated exercises and stories. Every structural edit leaves topic
//! positions contiguous and exercises self-consistent.

pub mod application;
pub mod domain;
