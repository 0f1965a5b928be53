use std::collections::HashSet;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::SimilarityGraph;

/// Whole-graph summary figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_clustering: f64,
    pub component_count: usize,
    /// False for an empty graph.
    pub is_connected: bool,
}

impl NetworkStatistics {
    #[must_use]
    pub fn compute(graph: &SimilarityGraph) -> Self {
        let node_count = graph.node_count();
        let component_count = if node_count == 0 {
            0
        } else {
            connected_components(graph.inner())
        };

        Self {
            node_count,
            edge_count: graph.edge_count(),
            density: graph.density(),
            average_clustering: average_clustering(graph),
            component_count,
            is_connected: component_count == 1,
        }
    }
}

/// Mean of the unweighted local clustering coefficients; nodes with fewer than
/// two neighbours count as 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(graph: &SimilarityGraph) -> f64 {
    let g = graph.inner();
    let n = g.node_count();
    if n == 0 {
        return 0.0;
    }

    let neighbours: Vec<HashSet<usize>> = g
        .node_indices()
        .map(|ix| g.neighbors(ix).map(|v| v.index()).collect())
        .collect();

    let total: f64 = neighbours
        .iter()
        .map(|nbrs| {
            let k = nbrs.len();
            if k < 2 {
                return 0.0;
            }
            let links = nbrs
                .iter()
                .map(|&v| neighbours[v].intersection(nbrs).count())
                .sum::<usize>()
                / 2;
            2.0 * links as f64 / (k as f64 * (k as f64 - 1.0))
        })
        .sum();

    total / n as f64
}
