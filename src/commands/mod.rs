//! Command implementations for the docscope binary

pub mod query;
pub mod schema;
