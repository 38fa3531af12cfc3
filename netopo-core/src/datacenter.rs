//! Datacenter topology generators.
//!
//! Every generator numbers nodes layer by layer starting at zero (switches of
//! the upper layers first, servers last for the tree-shaped fabrics, servers
//! first for BCube) and tags them with a [`NodeRole`] and a layer label.

use std::ops::Range;

use tracing::{debug, instrument};

use crate::{
    Result,
    edge::Edge,
    error::TopologyError,
    topology::{NodeAttributes, NodeRole, Topology},
};

/// A [`Topology`] whose nodes are classified as switches or servers.
///
/// # Examples
/// ```
/// use netopo_core::fat_tree_topology;
///
/// let topology = fat_tree_topology(4).expect("k = 4 is valid");
/// assert_eq!(topology.number_of_switches(), 20);
/// assert_eq!(topology.number_of_servers(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct DatacenterTopology {
    topology: Topology<usize, Edge>,
}

impl DatacenterTopology {
    fn new(name: String) -> Self {
        Self {
            topology: Topology::new().with_name(name),
        }
    }

    /// Borrows the underlying topology.
    #[must_use]
    #[rustfmt::skip]
    pub fn topology(&self) -> &Topology<usize, Edge> { &self.topology }

    /// Mutably borrows the underlying topology, for example to assign link
    /// capacities.
    #[rustfmt::skip]
    pub fn topology_mut(&mut self) -> &mut Topology<usize, Edge> { &mut self.topology }

    /// Consumes the wrapper and returns the underlying topology.
    #[must_use]
    pub fn into_topology(self) -> Topology<usize, Edge> {
        self.topology
    }

    /// Returns the switch identifiers in insertion order.
    #[must_use]
    pub fn switches(&self) -> Vec<usize> {
        self.nodes_with_role(NodeRole::Switch)
    }

    /// Returns the server identifiers in insertion order.
    #[must_use]
    pub fn servers(&self) -> Vec<usize> {
        self.nodes_with_role(NodeRole::Server)
    }

    /// Returns the number of switches.
    #[must_use]
    pub fn number_of_switches(&self) -> usize {
        self.count_role(NodeRole::Switch)
    }

    /// Returns the number of servers.
    #[must_use]
    pub fn number_of_servers(&self) -> usize {
        self.count_role(NodeRole::Server)
    }

    fn nodes_with_role(&self, role: NodeRole) -> Vec<usize> {
        self.topology
            .nodes_with_attributes()
            .filter(|(_, attrs)| attrs.role() == Some(role))
            .map(|(id, _)| *id)
            .collect()
    }

    fn count_role(&self, role: NodeRole) -> usize {
        self.topology
            .nodes_with_attributes()
            .filter(|(_, attrs)| attrs.role() == Some(role))
            .count()
    }

    fn add_layer(&mut self, nodes: Range<usize>, role: NodeRole, layer: &str) {
        for node in nodes {
            self.topology.add_node_with(
                node,
                NodeAttributes::new().with_role(role).with_layer(layer),
            );
        }
    }

    fn link(&mut self, source: usize, target: usize) {
        self.topology.add_edge(source, target, Edge::new());
    }
}

impl From<DatacenterTopology> for Topology<usize, Edge> {
    fn from(value: DatacenterTopology) -> Self {
        value.into_topology()
    }
}

fn require_positive(generator: &'static str, parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(TopologyError::InvalidParameter {
            generator,
            parameter,
            value: 0,
            requirement: "must be positive",
        });
    }
    Ok(())
}

fn checked(generator: &'static str, value: Option<usize>) -> Result<usize> {
    value.ok_or(TopologyError::SizeOverflow { generator })
}

fn finish(topology: DatacenterTopology) -> DatacenterTopology {
    debug!(
        nodes = topology.topology.node_count(),
        edges = topology.topology.edge_count(),
        "datacenter topology generated"
    );
    topology
}

/// Builds a `k`-ary fat tree.
///
/// The fabric has `(k/2)^2` core switches and `k` pods, each with `k/2`
/// aggregation and `k/2` edge switches; every edge switch serves `k/2`
/// servers. Core switch `i` connects to aggregation switch `i / (k/2)` of
/// every pod.
///
/// # Errors
/// Returns [`TopologyError::InvalidParameter`] when `k` is zero or odd and
/// [`TopologyError::SizeOverflow`] when the node count overflows `usize`.
#[instrument(name = "core.fat_tree", err)]
pub fn fat_tree_topology(k: usize) -> Result<DatacenterTopology> {
    const GENERATOR: &str = "fat_tree";
    if k == 0 || k % 2 != 0 {
        return Err(TopologyError::InvalidParameter {
            generator: GENERATOR,
            parameter: "k",
            value: u64::try_from(k).unwrap_or(u64::MAX),
            requirement: "must be a positive even number",
        });
    }
    let half = k / 2;
    let n_core = checked(GENERATOR, half.checked_mul(half))?;
    let per_layer = checked(GENERATOR, k.checked_mul(half))?;
    let n_hosts = checked(GENERATOR, per_layer.checked_mul(half))?;
    let aggregation_start = n_core;
    let edge_start = checked(GENERATOR, aggregation_start.checked_add(per_layer))?;
    let host_start = checked(GENERATOR, edge_start.checked_add(per_layer))?;
    checked(GENERATOR, host_start.checked_add(n_hosts))?;

    let mut topology = DatacenterTopology::new(format!("fat_tree_topology({k})"));
    topology.add_layer(0..n_core, NodeRole::Switch, "core");
    topology.add_layer(aggregation_start..edge_start, NodeRole::Switch, "aggregation");
    topology.add_layer(edge_start..host_start, NodeRole::Switch, "edge");
    topology.add_layer(host_start..host_start + n_hosts, NodeRole::Server, "leaf");

    for pod in 0..k {
        let pod_aggregation = aggregation_start + pod * half;
        let pod_edge = edge_start + pod * half;
        for core in 0..n_core {
            topology.link(core, pod_aggregation + core / half);
        }
        for aggregation in pod_aggregation..pod_aggregation + half {
            for edge in pod_edge..pod_edge + half {
                topology.link(aggregation, edge);
            }
        }
        for (offset, edge) in (pod_edge..pod_edge + half).enumerate() {
            let first_host = host_start + (pod * half + offset) * half;
            for host in first_host..first_host + half {
                topology.link(edge, host);
            }
        }
    }
    Ok(finish(topology))
}

/// Builds a two-tier (spine and leaf) fabric.
///
/// Every core switch connects to every edge switch and each edge switch
/// serves `n_hosts` servers.
///
/// # Errors
/// Returns [`TopologyError::InvalidParameter`] when any argument is zero and
/// [`TopologyError::SizeOverflow`] when the node count overflows `usize`.
#[instrument(name = "core.two_tier", err)]
pub fn two_tier_topology(
    n_core: usize,
    n_edge: usize,
    n_hosts: usize,
) -> Result<DatacenterTopology> {
    const GENERATOR: &str = "two_tier";
    require_positive(GENERATOR, "n_core", n_core)?;
    require_positive(GENERATOR, "n_edge", n_edge)?;
    require_positive(GENERATOR, "n_hosts", n_hosts)?;
    let edge_start = n_core;
    let host_start = checked(GENERATOR, edge_start.checked_add(n_edge))?;
    let total_hosts = checked(GENERATOR, n_edge.checked_mul(n_hosts))?;
    let end = checked(GENERATOR, host_start.checked_add(total_hosts))?;

    let mut topology =
        DatacenterTopology::new(format!("two_tier_topology({n_core},{n_edge},{n_hosts})"));
    topology.add_layer(0..edge_start, NodeRole::Switch, "core");
    topology.add_layer(edge_start..host_start, NodeRole::Switch, "edge");
    topology.add_layer(host_start..end, NodeRole::Server, "leaf");

    for core in 0..edge_start {
        for edge in edge_start..host_start {
            topology.link(core, edge);
        }
    }
    for (offset, edge) in (edge_start..host_start).enumerate() {
        let first_host = host_start + offset * n_hosts;
        for host in first_host..first_host + n_hosts {
            topology.link(edge, host);
        }
    }
    Ok(finish(topology))
}

/// Builds a three-tier (core, aggregation, edge) fabric.
///
/// Core and aggregation switches are fully meshed, every aggregation switch
/// owns `n_edge` edge switches and every edge switch serves `n_hosts`
/// servers.
///
/// # Errors
/// Returns [`TopologyError::InvalidParameter`] when any argument is zero and
/// [`TopologyError::SizeOverflow`] when the node count overflows `usize`.
#[instrument(name = "core.three_tier", err)]
pub fn three_tier_topology(
    n_core: usize,
    n_aggregation: usize,
    n_edge: usize,
    n_hosts: usize,
) -> Result<DatacenterTopology> {
    const GENERATOR: &str = "three_tier";
    require_positive(GENERATOR, "n_core", n_core)?;
    require_positive(GENERATOR, "n_aggregation", n_aggregation)?;
    require_positive(GENERATOR, "n_edge", n_edge)?;
    require_positive(GENERATOR, "n_hosts", n_hosts)?;
    let total_edge = checked(GENERATOR, n_aggregation.checked_mul(n_edge))?;
    let total_hosts = checked(GENERATOR, total_edge.checked_mul(n_hosts))?;
    let aggregation_start = n_core;
    let edge_start = checked(GENERATOR, aggregation_start.checked_add(n_aggregation))?;
    let host_start = checked(GENERATOR, edge_start.checked_add(total_edge))?;
    let end = checked(GENERATOR, host_start.checked_add(total_hosts))?;

    let mut topology = DatacenterTopology::new(format!(
        "three_tier_topology({n_core},{n_aggregation},{n_edge},{n_hosts})"
    ));
    topology.add_layer(0..aggregation_start, NodeRole::Switch, "core");
    topology.add_layer(aggregation_start..edge_start, NodeRole::Switch, "aggregation");
    topology.add_layer(edge_start..host_start, NodeRole::Switch, "edge");
    topology.add_layer(host_start..end, NodeRole::Server, "leaf");

    for core in 0..aggregation_start {
        for aggregation in aggregation_start..edge_start {
            topology.link(core, aggregation);
        }
    }
    for (offset, aggregation) in (aggregation_start..edge_start).enumerate() {
        let first_edge = edge_start + offset * n_edge;
        for edge in first_edge..first_edge + n_edge {
            topology.link(aggregation, edge);
        }
    }
    for (offset, edge) in (edge_start..host_start).enumerate() {
        let first_host = host_start + offset * n_hosts;
        for host in first_host..first_host + n_hosts {
            topology.link(edge, host);
        }
    }
    Ok(finish(topology))
}

/// Builds a BCube(`n`, `k`) server-centric fabric.
///
/// Servers carry `k + 1` base-`n` digit addresses. Each of the `k + 1` levels
/// has `n^k` switches; switch `j` of level `l` connects the `n` servers whose
/// addresses agree on every digit except digit `l`. Servers are numbered
/// first, followed by the switches level by level.
///
/// # Errors
/// Returns [`TopologyError::InvalidParameter`] when `n` is zero and
/// [`TopologyError::SizeOverflow`] when the node count overflows `usize`.
#[instrument(name = "core.bcube", err)]
pub fn bcube_topology(n: usize, k: u32) -> Result<DatacenterTopology> {
    const GENERATOR: &str = "bcube";
    require_positive(GENERATOR, "n", n)?;
    let exponent = k.checked_add(1).ok_or(TopologyError::SizeOverflow {
        generator: GENERATOR,
    })?;
    let levels = checked(GENERATOR, usize::try_from(exponent).ok())?;
    let n_servers = checked(GENERATOR, n.checked_pow(exponent))?;
    let switches_per_level = checked(GENERATOR, n.checked_pow(k))?;
    let n_switches = checked(GENERATOR, switches_per_level.checked_mul(levels))?;
    let end = checked(GENERATOR, n_servers.checked_add(n_switches))?;

    let mut topology = DatacenterTopology::new(format!("bcube_topology({n},{k})"));
    topology.add_layer(0..n_servers, NodeRole::Server, "leaf");
    for level in 0..levels {
        let first = n_servers + level * switches_per_level;
        for switch in first..first + switches_per_level {
            topology.topology.add_node_with(
                switch,
                NodeAttributes::new()
                    .with_role(NodeRole::Switch)
                    .with_layer(format!("level-{level}")),
            );
        }
    }
    debug_assert_eq!(topology.topology.node_count(), end);

    let mut stride = 1_usize;
    for level in 0..levels {
        let first = n_servers + level * switches_per_level;
        for server in 0..n_servers {
            let low = server % stride;
            let high = server / (stride * n);
            topology.link(first + high * stride + low, server);
        }
        if level + 1 < levels {
            stride *= n;
        }
    }
    Ok(finish(topology))
}
