//! Application handlers for the assessment context.

pub mod command_handlers;
