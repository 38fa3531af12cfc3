//! Benchmark parameter labels.

use std::fmt;

/// Parameters for a datacenter fabric benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct FabricBenchParams {
    /// Fat-tree port count.
    pub k: usize,
    /// Number of nodes in the generated fabric.
    pub node_count: usize,
}

impl fmt::Display for FabricBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={},nodes={}", self.k, self.node_count)
    }
}

/// Parameters for a random multigraph benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct RandomBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges, including loops and parallels.
    pub edge_count: usize,
}

impl fmt::Display for RandomBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.node_count, self.edge_count)
    }
}
