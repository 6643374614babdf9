//! Curation rules, independent of any collaborator.

pub mod approval;
pub mod commands;
pub mod structure;
