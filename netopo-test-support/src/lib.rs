//! Shared test utilities used across netopo crates.

pub mod ci;
pub mod tracing;
