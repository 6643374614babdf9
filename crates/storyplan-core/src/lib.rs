//! Storyplan core: shared plan model and collaborator abstractions.
//!
//! This crate defines the curriculum entity graph, its invariants, and the
//! traits every engine context depends on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod plan;
pub mod repository;
