use creatormap_core::CandidateProfile;
use serde::Serialize;

use crate::graph::{build_graph, SimilarityGraph};
use crate::metrics::{analyze, GraphMetrics};
use crate::statistics::NetworkStatistics;
use crate::types::{CreatorNode, MetricsConfig, NetworkConfig, SimilarityEdge};

/// Everything a consumer needs to render or inspect the creator network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkPayload {
    pub nodes: Vec<CreatorNode>,
    pub edges: Vec<SimilarityEdge>,
    pub metrics: GraphMetrics,
    pub statistics: NetworkStatistics,
}

impl NetworkPayload {
    /// Assemble the payload for an already built graph.
    #[must_use]
    pub fn from_graph(graph: &SimilarityGraph, metrics: &MetricsConfig) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges(),
            metrics: analyze(graph, metrics),
            statistics: NetworkStatistics::compute(graph),
        }
    }
}

/// Build the similarity graph for `candidates` and analyse it.
#[must_use]
pub fn build_network(
    candidates: &[CandidateProfile],
    network: &NetworkConfig,
    metrics: &MetricsConfig,
) -> NetworkPayload {
    let graph = build_graph(candidates, network);
    NetworkPayload::from_graph(&graph, metrics)
}
