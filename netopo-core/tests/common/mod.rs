use netopo_core::{Edge, Topology};

/// Builds an undirected topology from `(source, target)` pairs, giving every
/// edge a weight equal to its insertion index.
#[must_use]
pub fn weighted(pairs: &[(&str, &str)]) -> Topology {
    let mut topology = Topology::new();
    for (index, &(source, target)) in pairs.iter().enumerate() {
        let weight = f64::from(u32::try_from(index).expect("test topologies are small"));
        topology.add_edge(source, target, Edge::new().with_weight(weight));
    }
    topology
}
