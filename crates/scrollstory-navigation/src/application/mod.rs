//! Application layer for the Navigation context.

pub mod command_handlers;
pub mod query_handlers;
