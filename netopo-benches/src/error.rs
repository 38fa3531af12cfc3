//! Benchmark setup error type.
//!
//! Setup code propagates failures with `?`; the bench entry points turn them
//! into a single panic.

use netopo_core::{AdapterError, TopologyError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Topology generation failed.
    #[error("topology generation failed: {0}")]
    Topology(#[from] TopologyError),
    /// Conversion of the workload failed.
    #[error("conversion failed: {0}")]
    Adapter(#[from] AdapterError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
