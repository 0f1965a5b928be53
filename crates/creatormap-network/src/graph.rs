//! Construction of the weighted, undirected creator similarity graph.

use std::collections::{HashMap, HashSet};

use creatormap_core::CandidateProfile;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use crate::similarity::{pair_similarity, NodeSignals};
use crate::types::{CreatorNode, EdgeData, NetworkConfig, SimilarityEdge};

/// Simple undirected graph: no self-loops, at most one edge per pair.
///
/// Node indices follow candidate input order, after empty and repeated ids
/// have been dropped.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    graph: UnGraph<CreatorNode, EdgeData>,
    index: HashMap<String, NodeIndex>,
}

impl SimilarityGraph {
    #[must_use]
    pub fn inner(&self) -> &UnGraph<CreatorNode, EdgeData> {
        &self.graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CreatorNode> + '_ {
        self.graph.node_indices().map(|ix| &self.graph[ix])
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&CreatorNode> {
        self.index.get(id).map(|&ix| &self.graph[ix])
    }

    /// Edges in insertion order, which is ascending `(source, target)` index order.
    #[must_use]
    pub fn edges(&self) -> Vec<SimilarityEdge> {
        self.graph
            .edge_references()
            .map(|edge| SimilarityEdge {
                source: self.graph[edge.source()].id.clone(),
                target: self.graph[edge.target()].id.clone(),
                weight: edge.weight().weight,
                terms: edge.weight().terms,
            })
            .collect()
    }

    /// Weight of the edge between two creators, in either direction.
    #[must_use]
    pub fn weight_between(&self, a: &str, b: &str) -> Option<f64> {
        let (&ia, &ib) = (self.index.get(a)?, self.index.get(b)?);
        self.graph
            .find_edge(ia, ib)
            .map(|edge| self.graph[edge].weight)
    }

    /// `2|E| / (|N| (|N| - 1))`, or 0 with fewer than two nodes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / (n as f64 * (n as f64 - 1.0))
    }
}

/// Drop candidates with an empty id and keep the first of any repeated id.
fn distinct_nodes(candidates: &[CandidateProfile]) -> Vec<CreatorNode> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let id = candidate.id.trim();
        if id.is_empty() {
            tracing::warn!(title = %candidate.title, "skipping candidate with empty id");
            continue;
        }
        if !seen.insert(id.to_string()) {
            tracing::warn!(candidate = %id, "skipping repeated candidate id");
            continue;
        }
        let mut node = CreatorNode::from_profile(candidate);
        node.id = id.to_string();
        nodes.push(node);
    }

    nodes
}

/// Pairs `(i, j)` with `i < j` whose similarity exceeds the threshold.
fn scored_pairs(
    signals: &[NodeSignals<'_>],
    config: &NetworkConfig,
) -> Vec<(usize, usize, EdgeData)> {
    let n = signals.len();
    let score_row = |i: usize| {
        (i + 1..n).filter_map(move |j| {
            let sim = pair_similarity(&signals[i], &signals[j], config.renormalize);
            (sim.weight > config.edge_threshold).then_some((
                i,
                j,
                EdgeData {
                    weight: sim.weight,
                    terms: sim.terms,
                },
            ))
        })
    };

    let mut pairs: Vec<(usize, usize, EdgeData)> = if n >= config.parallel_min_candidates {
        (0..n).into_par_iter().flat_map_iter(score_row).collect()
    } else {
        (0..n).flat_map(score_row).collect()
    };

    pairs.sort_by_key(|&(i, j, _)| (i, j));
    pairs
}

/// Build the similarity graph over a batch of candidates.
///
/// Pure: the same input always yields the same nodes and edges in the same
/// order, whether or not the pairwise pass ran in parallel.
#[must_use]
pub fn build_graph(candidates: &[CandidateProfile], config: &NetworkConfig) -> SimilarityGraph {
    let nodes = distinct_nodes(candidates);
    let pairs = {
        let signals: Vec<NodeSignals<'_>> = nodes.iter().map(NodeSignals::new).collect();
        scored_pairs(&signals, config)
    };

    let mut graph = UnGraph::with_capacity(nodes.len(), pairs.len());
    let mut index = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let id = node.id.clone();
        index.insert(id, graph.add_node(node));
    }
    for (i, j, data) in pairs {
        graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), data);
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold = config.edge_threshold,
        renormalize = config.renormalize,
        "built similarity graph"
    );

    SimilarityGraph { graph, index }
}
