//! Shared test utilities used across fiedler crates.

pub mod graphs;
pub mod tracing;
