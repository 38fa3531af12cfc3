//! Topology workloads shared by the benchmarks.

use netopo_core::{CapacityUnit, DatacenterTopology, Edge, Topology, fat_tree_topology};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Link capacity assigned to provisioned fabrics, in Gbps.
pub const FABRIC_CAPACITY_GBPS: f64 = 10.0;

/// Configuration of a random multigraph workload.
#[derive(Clone, Copy, Debug)]
pub struct RandomTopologyConfig {
    /// Number of distinct node identifiers to draw from.
    pub node_count: usize,
    /// Number of edges to add.
    pub edge_count: usize,
    /// Seed of the edge generator.
    pub seed: u64,
}

/// Builds an undirected topology with uniformly random endpoints.
///
/// The result generally contains self-loops and parallel edges, so simple
/// targets exercise their refusal path.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero.
pub fn random_topology(config: &RandomTopologyConfig) -> Result<Topology<usize, Edge>, BenchSetupError> {
    if config.node_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "node_count",
        });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut topology = Topology::new().with_name(format!(
        "random(n={},m={})",
        config.node_count, config.edge_count
    ));
    for _ in 0..config.edge_count {
        let source = rng.gen_range(0..config.node_count);
        let target = rng.gen_range(0..config.node_count);
        topology.add_edge(source, target, Edge::new().with_capacity(FABRIC_CAPACITY_GBPS));
    }
    Ok(topology)
}

/// Builds a `k`-ary fat tree with every link provisioned at
/// [`FABRIC_CAPACITY_GBPS`].
///
/// # Errors
/// Returns [`BenchSetupError::Topology`] when `k` is not a valid fat-tree
/// port count.
pub fn provisioned_fat_tree(k: usize) -> Result<DatacenterTopology, BenchSetupError> {
    let mut fabric = fat_tree_topology(k)?;
    fabric
        .topology_mut()
        .set_capacities_constant(FABRIC_CAPACITY_GBPS, CapacityUnit::Gbps);
    Ok(fabric)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn random_topology_is_deterministic_per_seed() -> Result<(), BenchSetupError> {
        let config = RandomTopologyConfig {
            node_count: 16,
            edge_count: 64,
            seed: 7,
        };
        let first = random_topology(&config)?;
        let second = random_topology(&config)?;
        assert_eq!(first.edge_count(), 64);
        let endpoints = |topology: &Topology<usize, Edge>| -> Vec<(usize, usize)> {
            topology
                .edges()
                .map(|edge| (*edge.source(), *edge.target()))
                .collect()
        };
        assert_eq!(endpoints(&first), endpoints(&second));
        Ok(())
    }

    #[rstest]
    fn random_topology_rejects_empty_node_set() {
        let config = RandomTopologyConfig {
            node_count: 0,
            edge_count: 1,
            seed: 1,
        };
        assert!(matches!(
            random_topology(&config),
            Err(BenchSetupError::ZeroValue {
                context: "node_count"
            })
        ));
    }

    #[rstest]
    fn provisioned_fat_tree_sets_capacity() -> Result<(), BenchSetupError> {
        let fabric = provisioned_fat_tree(4)?;
        let topology = fabric.topology();
        assert_eq!(topology.capacity_unit(), Some(CapacityUnit::Gbps));
        assert!(
            topology
                .edges()
                .all(|edge| edge.attributes().capacity() == Some(FABRIC_CAPACITY_GBPS))
        );
        Ok(())
    }
}
