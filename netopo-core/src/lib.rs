//! Netopo core library.
//!
//! Builds in-memory network topologies and converts them into graph
//! representations that downstream graph algorithms can consume.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapter;
mod datacenter;
mod edge;
mod error;
mod link_config;
mod topology;
mod units;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "petgraph")]
pub use crate::adapter::SimpleGraph;
pub use crate::{
    adapter::{
        ConversionReport, GraphAdapter, SkippedEdge, SupportsEdgeInsertion,
        SupportsVertexInsertion, UnsupportedPolicy, to_graph,
    },
    datacenter::{
        DatacenterTopology, bcube_topology, fat_tree_topology, three_tier_topology,
        two_tier_topology,
    },
    edge::Edge,
    error::{
        AdapterError, AdapterErrorCode, Result, StructureViolation, TopologyError,
        TopologyErrorCode,
    },
    topology::{EdgeRef, NodeAttributes, NodeId, NodeRole, Topology},
    units::{BufferUnit, CapacityUnit, DelayUnit},
};
