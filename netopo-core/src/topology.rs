//! In-memory network topology model.
//!
//! A [`Topology`] owns an insertion-ordered set of nodes and an
//! insertion-ordered list of edges. Nodes are created on demand when an edge
//! references them, so every edge endpoint is always a known node. Self-loops
//! and parallel edges are kept as given; whether a graph target accepts them
//! is decided at conversion time.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    fmt,
    hash::Hash,
};

use crate::{
    edge::Edge,
    units::{BufferUnit, CapacityUnit, DelayUnit},
};

/// Requirements on node identifiers.
///
/// Blanket-implemented for every type that is cloneable, hashable and
/// printable, which covers `String`, `&'static str` and the integer types.
pub trait NodeId: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T> NodeId for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

/// Function a node performs in the network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum NodeRole {
    /// A switching element.
    Switch,
    /// A server attached to the switching fabric.
    Server,
    /// A layer-3 router.
    Router,
    /// A generic end host.
    Host,
}

impl NodeRole {
    /// Returns the lowercase label of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Server => "server",
            Self::Router => "router",
            Self::Host => "host",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to a topology node.
///
/// # Examples
/// ```
/// use netopo_core::{NodeAttributes, NodeRole};
///
/// let attrs = NodeAttributes::new()
///     .with_role(NodeRole::Switch)
///     .with_layer("core");
/// assert_eq!(attrs.role(), Some(NodeRole::Switch));
/// assert_eq!(attrs.layer(), Some("core"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeAttributes {
    role: Option<NodeRole>,
    layer: Option<String>,
    properties: BTreeMap<String, String>,
}

impl NodeAttributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node role.
    #[must_use]
    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the layer label (for example `core` or `edge`).
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Adds a free-form property, replacing any previous value for `key`.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the node role, if set.
    #[must_use]
    #[rustfmt::skip]
    pub fn role(&self) -> Option<NodeRole> { self.role }

    /// Returns the layer label, if set.
    #[must_use]
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Looks up a free-form property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
struct NodeEntry<N> {
    id: N,
    attributes: NodeAttributes,
}

#[derive(Clone, Debug)]
struct EdgeEntry<E> {
    source: usize,
    target: usize,
    attributes: E,
}

/// Borrowed view of a single topology edge.
#[derive(Debug)]
pub struct EdgeRef<'a, N, E> {
    source: &'a N,
    target: &'a N,
    attributes: &'a E,
}

impl<N, E> Clone for EdgeRef<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for EdgeRef<'_, N, E> {}

impl<'a, N: PartialEq, E> EdgeRef<'a, N, E> {
    /// Returns the source endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &'a N { self.source }

    /// Returns the target endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> &'a N { self.target }

    /// Returns the edge payload.
    #[must_use]
    #[rustfmt::skip]
    pub fn attributes(&self) -> &'a E { self.attributes }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Mutable network topology.
///
/// `N` is the node identifier type and `E` the edge payload; the defaults
/// match the common case of string-named nodes carrying [`Edge`] attributes.
///
/// # Examples
/// ```
/// use netopo_core::{Edge, Topology};
///
/// let mut topology: Topology = Topology::new();
/// topology.add_edge("1", "2", Edge::new());
/// topology.add_edge("2", "3", Edge::new());
/// assert_eq!(topology.node_count(), 3);
/// assert_eq!(topology.edge_count(), 2);
/// let order: Vec<&str> = topology.nodes().map(String::as_str).collect();
/// assert_eq!(order, ["1", "2", "3"]);
/// ```
#[derive(Clone, Debug)]
pub struct Topology<N = String, E = Edge> {
    name: Option<String>,
    directed: bool,
    nodes: Vec<NodeEntry<N>>,
    index: HashMap<N, usize>,
    edges: Vec<EdgeEntry<E>>,
    capacity_unit: Option<CapacityUnit>,
    delay_unit: Option<DelayUnit>,
    buffer_unit: Option<BufferUnit>,
}

impl<N, E> Default for Topology<N, E> {
    fn default() -> Self {
        Self {
            name: None,
            directed: false,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            capacity_unit: None,
            delay_unit: None,
            buffer_unit: None,
        }
    }
}

impl<N: NodeId, E> Topology<N, E> {
    /// Creates an empty undirected topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directed topology.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Attaches a descriptive name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the descriptive name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` when edges are oriented from source to target.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_directed(&self) -> bool { self.directed }

    /// Adds a node with empty attributes.
    ///
    /// Returns `false` and leaves the node untouched when it already exists.
    pub fn add_node(&mut self, id: impl Into<N>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.push_node(id, NodeAttributes::default());
        true
    }

    /// Adds a node or replaces the attributes of an existing one.
    ///
    /// An existing node keeps its original insertion position.
    pub fn add_node_with(&mut self, id: impl Into<N>, attributes: NodeAttributes) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&position) => self.nodes[position].attributes = attributes,
            None => {
                self.push_node(id, attributes);
            }
        }
    }

    /// Appends an edge between `source` and `target`, creating either endpoint
    /// when it is not yet part of the topology.
    ///
    /// Self-loops and repeated endpoint pairs are stored as distinct edges.
    pub fn add_edge(&mut self, source: impl Into<N>, target: impl Into<N>, attributes: E) {
        let source = self.ensure_node(source.into());
        let target = self.ensure_node(target.into());
        self.edges.push(EdgeEntry {
            source,
            target,
            attributes,
        });
    }

    /// Returns `true` when `id` is a node of the topology.
    #[must_use]
    pub fn contains_node<Q>(&self, id: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(id)
    }

    /// Returns the attributes of node `id`.
    #[must_use]
    pub fn node<Q>(&self, id: &Q) -> Option<&NodeAttributes>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(id)
            .map(|&position| &self.nodes[position].attributes)
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges, counting parallel edges and self-loops.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the topology has neither nodes nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates node identifiers in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &N> {
        self.nodes.iter().map(|entry| &entry.id)
    }

    /// Iterates nodes together with their attributes in insertion order.
    pub fn nodes_with_attributes(&self) -> impl ExactSizeIterator<Item = (&N, &NodeAttributes)> {
        self.nodes.iter().map(|entry| (&entry.id, &entry.attributes))
    }

    /// Iterates edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeRef<'_, N, E>> {
        self.edges.iter().map(|entry| self.edge_ref(entry))
    }

    /// Iterates the insertion positions of each edge's endpoints, aligned with
    /// [`Self::nodes`] and [`Self::edges`].
    pub(crate) fn edge_endpoints(&self) -> impl ExactSizeIterator<Item = (usize, usize)> {
        self.edges.iter().map(|entry| (entry.source, entry.target))
    }

    /// Iterates the edges connecting `source` and `target`.
    ///
    /// In an undirected topology the orientation of the stored edge is
    /// ignored.
    pub fn edges_between<Q>(
        &self,
        source: &Q,
        target: &Q,
    ) -> impl Iterator<Item = EdgeRef<'_, N, E>>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let endpoints = self
            .index
            .get(source)
            .copied()
            .zip(self.index.get(target).copied());
        self.edges
            .iter()
            .filter(move |entry| {
                endpoints.is_some_and(|(s, t)| self.connects(entry, s, t))
            })
            .map(|entry| self.edge_ref(entry))
    }

    /// Returns the capacity unit shared by all edges, if configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity_unit(&self) -> Option<CapacityUnit> { self.capacity_unit }

    /// Returns the delay unit shared by all edges, if configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn delay_unit(&self) -> Option<DelayUnit> { self.delay_unit }

    /// Returns the buffer unit shared by all edges, if configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn buffer_unit(&self) -> Option<BufferUnit> { self.buffer_unit }

    pub(crate) fn set_capacity_unit(&mut self, unit: CapacityUnit) {
        self.capacity_unit = Some(unit);
    }

    pub(crate) fn set_delay_unit(&mut self, unit: DelayUnit) {
        self.delay_unit = Some(unit);
    }

    pub(crate) fn set_buffer_unit(&mut self, unit: BufferUnit) {
        self.buffer_unit = Some(unit);
    }

    /// Visits the payload of every edge, or only of the edges joining one of
    /// the `selected` endpoint pairs when given.
    pub(crate) fn for_each_edge_mut<F>(&mut self, selected: Option<&[(N, N)]>, mut apply: F)
    where
        F: FnMut(&mut E),
    {
        let pairs: Option<Vec<(usize, usize)>> = selected.map(|pairs| {
            pairs
                .iter()
                .filter_map(|(s, t)| self.index.get(s).copied().zip(self.index.get(t).copied()))
                .collect()
        });
        let directed = self.directed;
        for entry in &mut self.edges {
            let chosen = pairs.as_ref().is_none_or(|pairs| {
                pairs
                    .iter()
                    .any(|&(s, t)| endpoints_match(directed, entry.source, entry.target, s, t))
            });
            if chosen {
                apply(&mut entry.attributes);
            }
        }
    }

    fn connects(&self, entry: &EdgeEntry<E>, source: usize, target: usize) -> bool {
        endpoints_match(self.directed, entry.source, entry.target, source, target)
    }

    fn edge_ref<'a>(&'a self, entry: &'a EdgeEntry<E>) -> EdgeRef<'a, N, E> {
        EdgeRef {
            source: &self.nodes[entry.source].id,
            target: &self.nodes[entry.target].id,
            attributes: &entry.attributes,
        }
    }

    fn ensure_node(&mut self, id: N) -> usize {
        match self.index.get(&id) {
            Some(&position) => position,
            None => self.push_node(id, NodeAttributes::default()),
        }
    }

    fn push_node(&mut self, id: N, attributes: NodeAttributes) -> usize {
        let position = self.nodes.len();
        self.index.insert(id.clone(), position);
        self.nodes.push(NodeEntry { id, attributes });
        position
    }
}

const fn endpoints_match(
    directed: bool,
    edge_source: usize,
    edge_target: usize,
    source: usize,
    target: usize,
) -> bool {
    (edge_source == source && edge_target == target)
        || (!directed && edge_source == target && edge_target == source)
}
