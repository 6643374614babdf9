//! Application handlers for the progression context.

pub mod command_handlers;
pub mod query_handlers;
