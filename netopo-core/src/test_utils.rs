//! Shared test utilities for `netopo-core`.

use netopo_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    adapter::{SupportsEdgeInsertion, SupportsVertexInsertion},
    error::StructureViolation,
};

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Target that accepts every edge and remembers the order of each call.
#[derive(Debug)]
pub(crate) struct RecordingTarget<N, E> {
    pub(crate) vertices: Vec<N>,
    pub(crate) edges: Vec<(usize, usize, E)>,
}

impl<N, E> Default for RecordingTarget<N, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N, E> SupportsVertexInsertion<N> for RecordingTarget<N, E> {
    type Vertex = usize;

    fn insert_vertex(&mut self, vertex: N) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }
}

impl<N, E> SupportsEdgeInsertion<N, E> for RecordingTarget<N, E> {
    fn insert_edge(
        &mut self,
        source: usize,
        target: usize,
        edge: E,
    ) -> Result<(), StructureViolation> {
        self.edges.push((source, target, edge));
        Ok(())
    }
}
