//! Benchmark support crate for fiedler.
//!
//! Provides planted-partition graph generators and parameter types used by
//! the Criterion benchmarks for Laplacian decomposition, k-means and the
//! full spectral clustering pipeline.

pub mod error;
pub mod params;
pub mod source;
