//! Link attribute payload.

use std::collections::BTreeMap;

/// Attribute bag carried by a topology edge.
///
/// Every attribute is optional; `Edge::default()` is an empty bag. Numeric
/// attributes are expressed in the units recorded on the owning
/// [`crate::Topology`].
///
/// # Examples
/// ```
/// use netopo_core::Edge;
///
/// let edge = Edge::new().with_capacity(10.0).with_property("medium", "fiber");
/// assert_eq!(edge.capacity(), Some(10.0));
/// assert_eq!(edge.property("medium"), Some("fiber"));
/// assert!(Edge::default().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Edge {
    capacity: Option<f64>,
    delay: Option<f64>,
    weight: Option<f64>,
    buffer_size: Option<u64>,
    properties: BTreeMap<String, String>,
}

impl Edge {
    /// Creates an edge with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the link capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the link propagation delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the routing weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the interface buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: u64) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Adds a free-form property, replacing any previous value for `key`.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the link capacity, if set.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> Option<f64> { self.capacity }

    /// Returns the link propagation delay, if set.
    #[must_use]
    #[rustfmt::skip]
    pub fn delay(&self) -> Option<f64> { self.delay }

    /// Returns the routing weight, if set.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Option<f64> { self.weight }

    /// Returns the interface buffer size, if set.
    #[must_use]
    #[rustfmt::skip]
    pub fn buffer_size(&self) -> Option<u64> { self.buffer_size }

    /// Looks up a free-form property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns all free-form properties ordered by key.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns `true` when no attribute has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capacity.is_none()
            && self.delay.is_none()
            && self.weight.is_none()
            && self.buffer_size.is_none()
            && self.properties.is_empty()
    }

    pub(crate) fn set_capacity(&mut self, capacity: f64) {
        self.capacity = Some(capacity);
    }

    pub(crate) fn set_delay(&mut self, delay: f64) {
        self.delay = Some(delay);
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = Some(weight);
    }

    pub(crate) fn set_buffer_size(&mut self, buffer_size: u64) {
        self.buffer_size = Some(buffer_size);
    }
}
