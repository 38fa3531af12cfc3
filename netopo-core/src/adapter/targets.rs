//! Graph targets backed by `petgraph`.
//!
//! [`Graph`] and [`StableGraph`] are multigraphs and accept every edge.
//! [`SimpleGraph`] wraps a [`StableGraph`] and refuses self-loops and repeated
//! vertex pairs.

use std::fmt;

use petgraph::{
    EdgeType, Undirected,
    graph::{Graph, IndexType, NodeIndex},
    stable_graph::StableGraph,
};

use super::capability::{SupportsEdgeInsertion, SupportsVertexInsertion};
use crate::error::StructureViolation;

impl<N, E, Ty, Ix> SupportsVertexInsertion<N> for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Vertex = NodeIndex<Ix>;

    fn insert_vertex(&mut self, vertex: N) -> Self::Vertex {
        self.add_node(vertex)
    }
}

impl<N, E, Ty, Ix> SupportsEdgeInsertion<N, E> for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn insert_edge(
        &mut self,
        source: Self::Vertex,
        target: Self::Vertex,
        edge: E,
    ) -> Result<(), StructureViolation> {
        self.add_edge(source, target, edge);
        Ok(())
    }
}

impl<N, E, Ty, Ix> SupportsVertexInsertion<N> for StableGraph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Vertex = NodeIndex<Ix>;

    fn insert_vertex(&mut self, vertex: N) -> Self::Vertex {
        self.add_node(vertex)
    }
}

impl<N, E, Ty, Ix> SupportsEdgeInsertion<N, E> for StableGraph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn insert_edge(
        &mut self,
        source: Self::Vertex,
        target: Self::Vertex,
        edge: E,
    ) -> Result<(), StructureViolation> {
        self.add_edge(source, target, edge);
        Ok(())
    }
}

/// A graph holding at most one edge per vertex pair and no self-loops.
///
/// For undirected graphs `(a, b)` and `(b, a)` name the same pair.
///
/// # Examples
/// ```
/// use netopo_core::{Edge, GraphAdapter, SimpleGraph, Topology, UnsupportedPolicy};
///
/// let mut topology: Topology = Topology::new();
/// topology.add_edge("a", "b", Edge::new());
/// topology.add_edge("b", "a", Edge::new());
///
/// let (graph, report) = GraphAdapter::new()
///     .with_unsupported_policy(UnsupportedPolicy::Skip)
///     .convert_with_report::<SimpleGraph<String, Edge>, _, _>(&topology)?;
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(report.skipped().len(), 1);
/// # Ok::<(), netopo_core::AdapterError>(())
/// ```
#[derive(Clone)]
pub struct SimpleGraph<N, E, Ty = Undirected> {
    inner: StableGraph<N, E, Ty>,
}

impl<N: fmt::Debug, E: fmt::Debug, Ty: EdgeType> fmt::Debug for SimpleGraph<N, E, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleGraph")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<N, E, Ty: EdgeType> Default for SimpleGraph<N, E, Ty> {
    fn default() -> Self {
        Self {
            inner: StableGraph::default(),
        }
    }
}

impl<N, E, Ty: EdgeType> SimpleGraph<N, E, Ty> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the underlying [`StableGraph`].
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &StableGraph<N, E, Ty> { &self.inner }

    /// Returns the underlying [`StableGraph`].
    #[must_use]
    #[rustfmt::skip]
    pub fn into_inner(self) -> StableGraph<N, E, Ty> { self.inner }

    /// Returns the number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

impl<N, E, Ty: EdgeType> From<SimpleGraph<N, E, Ty>> for StableGraph<N, E, Ty> {
    fn from(graph: SimpleGraph<N, E, Ty>) -> Self {
        graph.inner
    }
}

impl<N, E, Ty: EdgeType> SupportsVertexInsertion<N> for SimpleGraph<N, E, Ty> {
    type Vertex = NodeIndex;

    fn insert_vertex(&mut self, vertex: N) -> Self::Vertex {
        self.inner.add_node(vertex)
    }
}

impl<N, E, Ty: EdgeType> SupportsEdgeInsertion<N, E> for SimpleGraph<N, E, Ty> {
    fn insert_edge(
        &mut self,
        source: Self::Vertex,
        target: Self::Vertex,
        edge: E,
    ) -> Result<(), StructureViolation> {
        if source == target {
            return Err(StructureViolation::SelfLoop);
        }
        // `find_edge` ignores orientation on undirected graphs.
        if self.inner.find_edge(source, target).is_some() {
            return Err(StructureViolation::ParallelEdge);
        }
        self.inner.add_edge(source, target, edge);
        Ok(())
    }
}
