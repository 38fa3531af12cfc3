//! Capabilities a graph representation must offer to receive a topology.

use crate::error::StructureViolation;

/// A graph that can grow by one vertex at a time.
///
/// `V` is the vertex payload; the adapter passes a clone of the topology
/// node identifier.
pub trait SupportsVertexInsertion<V> {
    /// Handle returned for an inserted vertex and later used to attach edges.
    type Vertex: Copy;

    /// Inserts a vertex and returns its handle.
    fn insert_vertex(&mut self, vertex: V) -> Self::Vertex;
}

/// A graph that can connect previously inserted vertices.
///
/// # Examples
/// ```
/// use netopo_core::{StructureViolation, SupportsEdgeInsertion, SupportsVertexInsertion};
///
/// #[derive(Default)]
/// struct EdgeList {
///     vertices: Vec<String>,
///     edges: Vec<(usize, usize)>,
/// }
///
/// impl SupportsVertexInsertion<String> for EdgeList {
///     type Vertex = usize;
///
///     fn insert_vertex(&mut self, vertex: String) -> usize {
///         self.vertices.push(vertex);
///         self.vertices.len() - 1
///     }
/// }
///
/// impl<E> SupportsEdgeInsertion<String, E> for EdgeList {
///     fn insert_edge(&mut self, source: usize, target: usize, _edge: E) -> Result<(), StructureViolation> {
///         if source == target {
///             return Err(StructureViolation::SelfLoop);
///         }
///         self.edges.push((source, target));
///         Ok(())
///     }
/// }
///
/// let mut list = EdgeList::default();
/// let a = list.insert_vertex("a".to_owned());
/// let b = list.insert_vertex("b".to_owned());
/// assert!(list.insert_edge(a, b, ()).is_ok());
/// assert_eq!(list.insert_edge(a, a, ()), Err(StructureViolation::SelfLoop));
/// ```
pub trait SupportsEdgeInsertion<V, E>: SupportsVertexInsertion<V> {
    /// Connects `source` to `target` with the given payload.
    ///
    /// # Errors
    /// Returns the [`StructureViolation`] describing why the representation
    /// cannot hold the edge. The graph must be left unchanged in that case.
    fn insert_edge(
        &mut self,
        source: Self::Vertex,
        target: Self::Vertex,
        edge: E,
    ) -> Result<(), StructureViolation>;
}
