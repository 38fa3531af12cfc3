//! Property tests for topology conversion.

use std::collections::HashSet;

use petgraph::{
    graph::{DiGraph, UnGraph},
    visit::EdgeRef as _,
};
use proptest::prelude::*;

use super::*;
use crate::{edge::Edge, test_utils::suite_proptest_config};

/// Edge lists over a small identifier space so loops and parallels are common.
fn edge_list() -> impl Strategy<Value = Vec<(u8, u8, u16)>> {
    prop::collection::vec((0_u8..12, 0_u8..12, any::<u16>()), 0..48)
}

fn build(edges: &[(u8, u8, u16)], directed: bool) -> Topology<u8, u16> {
    let mut topology = if directed {
        Topology::directed()
    } else {
        Topology::new()
    };
    for &(source, target, payload) in edges {
        topology.add_edge(source, target, payload);
    }
    topology
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn multigraph_conversion_preserves_counts_and_payloads(edges in edge_list()) {
        let topology = build(&edges, false);
        let graph: UnGraph<u8, u16> = to_graph(&topology).expect("multigraph accepts all edges");

        let referenced: HashSet<u8> = edges.iter().flat_map(|&(s, t, _)| [s, t]).collect();
        prop_assert_eq!(graph.node_count(), referenced.len());
        prop_assert_eq!(graph.edge_count(), edges.len());

        let converted: Vec<(u8, u8, u16)> = graph
            .edge_references()
            .map(|edge| (graph[edge.source()], graph[edge.target()], *edge.weight()))
            .collect();
        prop_assert_eq!(converted, edges);
    }

    #[test]
    fn conversion_is_independent_of_later_mutation(
        edges in edge_list(),
        extra in edge_list(),
    ) {
        let mut topology = build(&edges, true);
        let graph: DiGraph<u8, u16> = to_graph(&topology).expect("multigraph accepts all edges");
        let (nodes, edge_count) = (graph.node_count(), graph.edge_count());

        for &(source, target, payload) in &extra {
            topology.add_edge(source.wrapping_add(100), target, payload);
        }
        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert_eq!(graph.edge_count(), edge_count);
    }

    #[test]
    fn skip_report_accounts_for_every_edge(edges in edge_list(), directed in any::<bool>()) {
        let topology = build(&edges, directed);
        let adapter = GraphAdapter::new().with_unsupported_policy(UnsupportedPolicy::Skip);
        let (edge_count, report) = if directed {
            let (graph, report) = adapter
                .convert_with_report::<SimpleGraph<u8, u16, petgraph::Directed>, _, _>(&topology)
                .expect("skip policy never fails");
            (graph.edge_count(), report)
        } else {
            let (graph, report) = adapter
                .convert_with_report::<SimpleGraph<u8, u16>, _, _>(&topology)
                .expect("skip policy never fails");
            (graph.edge_count(), report)
        };

        prop_assert_eq!(report.vertices(), topology.node_count());
        prop_assert_eq!(report.edges(), edge_count);
        prop_assert_eq!(report.edges() + report.skipped().len(), edges.len());
        for skipped in report.skipped() {
            let (source, target, _) = edges[skipped.edge_index()];
            let expected = if source == target {
                StructureViolation::SelfLoop
            } else {
                StructureViolation::ParallelEdge
            };
            prop_assert_eq!(skipped.violation(), expected);
        }
    }

    #[test]
    fn abort_fails_exactly_when_skip_would_drop(edges in edge_list()) {
        let topology = build(&edges, false);
        let (_, report) = GraphAdapter::new()
            .with_unsupported_policy(UnsupportedPolicy::Skip)
            .convert_with_report::<SimpleGraph<u8, u16>, _, _>(&topology)
            .expect("skip policy never fails");
        let aborted = to_graph::<SimpleGraph<u8, u16>, _, _>(&topology);

        match report.skipped().first() {
            None => prop_assert!(aborted.is_ok()),
            Some(first) => {
                let err = aborted.expect_err("abort must surface the first refused edge");
                let matches_first = matches!(
                    err,
                    AdapterError::UnsupportedStructure { edge_index, violation, .. }
                        if edge_index == first.edge_index() && violation == first.violation()
                );
                prop_assert!(matches_first);
            }
        }
    }
}
