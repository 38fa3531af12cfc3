//! Conversion of a [`Topology`] into an in-memory graph representation.
//!
//! The adapter walks the topology once: every node becomes a vertex in
//! insertion order, then every edge becomes an edge between the matching
//! vertices, carrying a clone of its payload. The output never shares storage
//! with the topology.
//!
//! Targets advertise what they can hold through [`SupportsVertexInsertion`]
//! and [`SupportsEdgeInsertion`]. When a target refuses an edge the
//! configured [`UnsupportedPolicy`] decides whether conversion aborts or the
//! edge is skipped and reported.

mod capability;
#[cfg(feature = "petgraph")]
mod targets;

use std::{fmt, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    error::{AdapterError, StructureViolation},
    topology::{NodeId, Topology},
};

pub use self::capability::{SupportsEdgeInsertion, SupportsVertexInsertion};
#[cfg(feature = "petgraph")]
#[cfg_attr(docsrs, doc(cfg(feature = "petgraph")))]
pub use self::targets::SimpleGraph;

/// What to do with an edge the target graph cannot represent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum UnsupportedPolicy {
    /// Fail the whole conversion with [`AdapterError::UnsupportedStructure`].
    #[default]
    Abort,
    /// Leave the edge out and record it in the [`ConversionReport`].
    Skip,
}

impl UnsupportedPolicy {
    /// Returns the lowercase label of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for UnsupportedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edge left out of the converted graph under [`UnsupportedPolicy::Skip`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedEdge {
    edge_index: usize,
    violation: StructureViolation,
    source_node: Arc<str>,
    target_node: Arc<str>,
}

impl SkippedEdge {
    /// Returns the insertion index of the edge within the topology.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_index(&self) -> usize { self.edge_index }

    /// Returns why the target refused the edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn violation(&self) -> StructureViolation { self.violation }

    /// Returns the rendered source identifier.
    #[must_use]
    pub fn source_node(&self) -> &str {
        &self.source_node
    }

    /// Returns the rendered target identifier.
    #[must_use]
    pub fn target_node(&self) -> &str {
        &self.target_node
    }
}

/// Summary of a completed conversion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConversionReport {
    vertices: usize,
    edges: usize,
    skipped: Vec<SkippedEdge>,
}

impl ConversionReport {
    /// Returns the number of vertices inserted into the target.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> usize { self.vertices }

    /// Returns the number of edges inserted into the target.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> usize { self.edges }

    /// Returns the edges left out of the target, in topology order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedEdge] {
        &self.skipped
    }

    /// Returns `true` when every topology edge reached the target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Converts topologies into graph representations.
///
/// The adapter holds only its policy, so one instance can serve any number
/// of concurrent conversions.
///
/// # Examples
/// ```
/// use netopo_core::{Edge, GraphAdapter, Topology};
/// use petgraph::graph::UnGraph;
///
/// let mut topology: Topology = Topology::new();
/// topology.add_edge("1", "2", Edge::new());
/// topology.add_edge("2", "3", Edge::new());
///
/// let graph: UnGraph<String, Edge> = GraphAdapter::new()
///     .convert(&topology)
///     .expect("multigraph targets accept every topology");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphAdapter {
    policy: UnsupportedPolicy,
}

impl GraphAdapter {
    /// Creates an adapter that aborts on unsupported edges.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: UnsupportedPolicy::Abort,
        }
    }

    /// Overrides the policy applied to edges the target cannot represent.
    #[must_use]
    pub const fn with_unsupported_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured policy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn unsupported_policy(&self) -> UnsupportedPolicy { self.policy }

    /// Converts `topology` into a fresh `G`.
    ///
    /// # Errors
    /// Returns [`AdapterError::UnsupportedStructure`] when the target refuses
    /// an edge and the policy is [`UnsupportedPolicy::Abort`].
    pub fn convert<G, N, E>(&self, topology: &Topology<N, E>) -> Result<G, AdapterError>
    where
        G: Default + SupportsEdgeInsertion<N, E>,
        N: NodeId,
        E: Clone,
    {
        self.convert_with_report(topology).map(|(graph, _)| graph)
    }

    /// Converts an optional topology, rejecting `None`.
    ///
    /// # Errors
    /// Returns [`AdapterError::InvalidArgument`] when `topology` is `None`
    /// and otherwise behaves like [`Self::convert`].
    ///
    /// # Examples
    /// ```
    /// use netopo_core::{AdapterError, Edge, GraphAdapter, Topology};
    /// use petgraph::graph::UnGraph;
    ///
    /// let missing: Option<&Topology> = None;
    /// let result: Result<UnGraph<String, Edge>, _> = GraphAdapter::new().convert_optional(missing);
    /// assert!(matches!(result, Err(AdapterError::InvalidArgument { .. })));
    /// ```
    pub fn convert_optional<G, N, E>(
        &self,
        topology: Option<&Topology<N, E>>,
    ) -> Result<G, AdapterError>
    where
        G: Default + SupportsEdgeInsertion<N, E>,
        N: NodeId,
        E: Clone,
    {
        let topology = topology.ok_or(AdapterError::InvalidArgument {
            reason: "no topology was supplied for conversion",
        })?;
        self.convert(topology)
    }

    /// Converts `topology` and reports what reached the target.
    ///
    /// # Errors
    /// Returns [`AdapterError::UnsupportedStructure`] when the target refuses
    /// an edge and the policy is [`UnsupportedPolicy::Abort`].
    #[instrument(
        name = "core.convert",
        err,
        skip(self, topology),
        fields(
            topology_name = topology.name().unwrap_or("<unnamed>"),
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            policy = %self.policy,
        ),
    )]
    pub fn convert_with_report<G, N, E>(
        &self,
        topology: &Topology<N, E>,
    ) -> Result<(G, ConversionReport), AdapterError>
    where
        G: Default + SupportsEdgeInsertion<N, E>,
        N: NodeId,
        E: Clone,
    {
        let mut graph = G::default();
        let handles: Vec<G::Vertex> = topology
            .nodes()
            .map(|id| graph.insert_vertex(id.clone()))
            .collect();
        let mut report = ConversionReport {
            vertices: handles.len(),
            ..ConversionReport::default()
        };

        for (edge_index, (edge, (source, target))) in topology
            .edges()
            .zip(topology.edge_endpoints())
            .enumerate()
        {
            let outcome =
                graph.insert_edge(handles[source], handles[target], edge.attributes().clone());
            let Err(violation) = outcome else {
                report.edges += 1;
                continue;
            };
            let skipped = SkippedEdge {
                edge_index,
                violation,
                source_node: Arc::from(edge.source().to_string()),
                target_node: Arc::from(edge.target().to_string()),
            };
            match self.policy {
                UnsupportedPolicy::Abort => return Err(skipped.into_error()),
                UnsupportedPolicy::Skip => {
                    warn!(
                        edge_index,
                        violation = %violation,
                        source_node = skipped.source_node(),
                        target_node = skipped.target_node(),
                        "edge not representable by target graph, skipping"
                    );
                    report.skipped.push(skipped);
                }
            }
        }

        debug!(
            vertices = report.vertices,
            edges = report.edges,
            skipped = report.skipped.len(),
            "conversion completed"
        );
        Ok((graph, report))
    }
}

impl SkippedEdge {
    fn into_error(self) -> AdapterError {
        AdapterError::UnsupportedStructure {
            violation: self.violation,
            edge_index: self.edge_index,
            source_node: self.source_node,
            target_node: self.target_node,
        }
    }
}

/// Converts `topology` with the default [`GraphAdapter`].
///
/// # Errors
/// Returns [`AdapterError::UnsupportedStructure`] when the target refuses an
/// edge.
///
/// # Examples
/// ```
/// use netopo_core::{Edge, Topology, to_graph};
/// use petgraph::stable_graph::StableDiGraph;
///
/// let mut topology: Topology = Topology::directed();
/// topology.add_edge("a", "b", Edge::new().with_capacity(1.0));
/// let graph: StableDiGraph<String, Edge> = to_graph(&topology)?;
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), netopo_core::AdapterError>(())
/// ```
pub fn to_graph<G, N, E>(topology: &Topology<N, E>) -> Result<G, AdapterError>
where
    G: Default + SupportsEdgeInsertion<N, E>,
    N: NodeId,
    E: Clone,
{
    GraphAdapter::new().convert(topology)
}


#[cfg(all(test, feature = "petgraph"))]
mod property;
