//! Benchmark support crate for netopo.
//!
//! Provides topology workloads and parameter labels used by the Criterion
//! benchmarks for datacenter generation and graph conversion.

pub mod error;
pub mod params;
pub mod workload;
