//! Uniform link attribute assignment.
//!
//! Each setter writes one attribute on every edge, or on the edges joining a
//! chosen set of endpoint pairs. Assigning every edge records the supplied
//! unit on the topology. Assigning a subset keeps the recorded unit and
//! expresses the new value in it, so untouched edges stay valid.

use tracing::debug;

use crate::{
    edge::Edge,
    error::{Result, TopologyError},
    topology::{NodeId, Topology},
    units::{BufferUnit, CapacityUnit, DelayUnit},
};

impl<N: NodeId> Topology<N, Edge> {
    /// Assigns `capacity` to every edge and records `unit`.
    ///
    /// # Examples
    /// ```
    /// use netopo_core::{CapacityUnit, Edge, Topology};
    ///
    /// let mut topology: Topology = Topology::new();
    /// topology.add_edge("a", "b", Edge::new());
    /// topology.set_capacities_constant(10.0, CapacityUnit::Gbps);
    /// assert_eq!(topology.capacity_unit(), Some(CapacityUnit::Gbps));
    /// assert!(topology.edges().all(|edge| edge.attributes().capacity() == Some(10.0)));
    /// ```
    pub fn set_capacities_constant(&mut self, capacity: f64, unit: CapacityUnit) {
        self.set_capacities_on(capacity, unit, None);
    }

    /// Assigns `capacity` to the edges joining the given endpoint pairs, or to
    /// every edge when `links` is `None`.
    ///
    /// When only some links are selected and a different unit is already
    /// recorded, `capacity` is converted into the recorded unit.
    ///
    /// # Examples
    /// ```
    /// use netopo_core::{CapacityUnit, Edge, Topology};
    ///
    /// let mut topology: Topology = Topology::new();
    /// topology.add_edge("a", "b", Edge::new());
    /// topology.add_edge("b", "c", Edge::new());
    /// topology.set_capacities_constant(10.0, CapacityUnit::Gbps);
    /// let uplink = [("b".to_owned(), "c".to_owned())];
    /// topology.set_capacities_on(500.0, CapacityUnit::Mbps, Some(uplink.as_slice()));
    /// assert_eq!(topology.capacity_unit(), Some(CapacityUnit::Gbps));
    /// let capacities: Vec<_> = topology.edges().map(|e| e.attributes().capacity()).collect();
    /// assert_eq!(capacities, [Some(10.0), Some(0.5)]);
    /// ```
    pub fn set_capacities_on(&mut self, capacity: f64, unit: CapacityUnit, links: Option<&[(N, N)]>) {
        let (value, recorded) = match (links, self.capacity_unit()) {
            (Some(_), Some(recorded)) => (unit.convert(capacity, recorded), recorded),
            _ => (capacity, unit),
        };
        self.set_capacity_unit(recorded);
        self.for_each_edge_mut(links, |edge| edge.set_capacity(value));
        debug!(capacity = value, unit = %recorded, "link capacities assigned");
    }

    /// Assigns `delay` to every edge and records `unit`.
    pub fn set_delays_constant(&mut self, delay: f64, unit: DelayUnit) {
        self.set_delays_on(delay, unit, None);
    }

    /// Assigns `delay` to the edges joining the given endpoint pairs, or to
    /// every edge when `links` is `None`.
    ///
    /// When only some links are selected and a different unit is already
    /// recorded, `delay` is converted into the recorded unit.
    pub fn set_delays_on(&mut self, delay: f64, unit: DelayUnit, links: Option<&[(N, N)]>) {
        let (value, recorded) = match (links, self.delay_unit()) {
            (Some(_), Some(recorded)) => (unit.convert(delay, recorded), recorded),
            _ => (delay, unit),
        };
        self.set_delay_unit(recorded);
        self.for_each_edge_mut(links, |edge| edge.set_delay(value));
        debug!(delay = value, unit = %recorded, "link delays assigned");
    }

    /// Assigns the routing `weight` to every edge.
    pub fn set_weights_constant(&mut self, weight: f64) {
        self.set_weights_on(weight, None);
    }

    /// Assigns the routing `weight` to the edges joining the given endpoint
    /// pairs, or to every edge when `links` is `None`.
    pub fn set_weights_on(&mut self, weight: f64, links: Option<&[(N, N)]>) {
        self.for_each_edge_mut(links, |edge| edge.set_weight(weight));
    }

    /// Assigns `size` to the buffer of every edge and records `unit`.
    pub fn set_buffer_sizes_constant(&mut self, size: u64, unit: BufferUnit) {
        self.assign_buffer_sizes(size, unit, None);
    }

    /// Assigns `size` to the buffers of the edges joining the given endpoint
    /// pairs, or to every edge when `links` is `None`.
    ///
    /// # Errors
    /// Returns [`TopologyError::IncompatibleUnit`] when only some links are
    /// selected and the topology already records a different buffer unit.
    /// Packets and bytes cannot be converted into one another.
    pub fn set_buffer_sizes_on(
        &mut self,
        size: u64,
        unit: BufferUnit,
        links: Option<&[(N, N)]>,
    ) -> Result<()> {
        if let (Some(_), Some(recorded)) = (links, self.buffer_unit())
            && recorded != unit
        {
            return Err(TopologyError::IncompatibleUnit {
                kind: "buffer",
                recorded: recorded.as_str(),
                requested: unit.as_str(),
            });
        }
        self.assign_buffer_sizes(size, unit, links);
        Ok(())
    }

    fn assign_buffer_sizes(&mut self, size: u64, unit: BufferUnit, links: Option<&[(N, N)]>) {
        self.set_buffer_unit(unit);
        self.for_each_edge_mut(links, |edge| edge.set_buffer_size(size));
        debug!(size, unit = %unit, "link buffer sizes assigned");
    }
}
