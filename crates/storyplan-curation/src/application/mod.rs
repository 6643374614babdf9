//! Application handlers for the curation context.

pub mod command_handlers;
pub mod query_handlers;
