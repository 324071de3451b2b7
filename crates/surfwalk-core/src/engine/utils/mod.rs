//! Helpers that prepare inputs for the engine, such as generating crosslink queries.

pub mod query;
