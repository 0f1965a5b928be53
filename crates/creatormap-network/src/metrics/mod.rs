//! Centrality rankings and community structure of a similarity graph.
//!
//! Each metric is computed independently. A metric that cannot be produced is
//! left out of [`GraphMetrics`] and recorded in `omitted` with its reason; the
//! remaining metrics are unaffected.

mod centrality;
mod community;

use std::time::{Duration, Instant};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::graph::SimilarityGraph;
use crate::types::{CreatorNode, EdgeData, MetricsConfig};

use centrality::{betweenness_centrality, degree_centrality, pagerank};
use community::greedy_modularity_communities;

pub use centrality::{PAGERANK_DAMPING, PAGERANK_MAX_ITERATIONS};

/// Length of each centrality ranking and of the community list.
pub const TOP_K: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    DegreeCentrality,
    BetweennessCentrality,
    Pagerank,
    Communities,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::DegreeCentrality => write!(f, "degree_centrality"),
            MetricKind::BetweennessCentrality => write!(f, "betweenness_centrality"),
            MetricKind::Pagerank => write!(f, "pagerank"),
            MetricKind::Communities => write!(f, "communities"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OmissionReason {
    EmptyGraph,
    NoEdges,
    NotConverged { iterations: usize },
    DeadlineExceeded,
    NonFinite,
}

impl std::fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OmissionReason::EmptyGraph => write!(f, "graph has no nodes"),
            OmissionReason::NoEdges => write!(f, "graph has no edges"),
            OmissionReason::NotConverged { iterations } => {
                write!(f, "did not converge within {iterations} iterations")
            }
            OmissionReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            OmissionReason::NonFinite => write!(f, "produced non-finite values"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricOmission {
    pub metric: MetricKind,
    pub reason: OmissionReason,
}

/// One entry of a centrality ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeScore {
    pub id: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_centrality: Option<Vec<NodeScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betweenness_centrality: Option<Vec<NodeScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerank: Option<Vec<NodeScore>>,
    /// Largest communities first; members sorted by id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communities: Option<Vec<Vec<String>>>,
    pub omitted: Vec<MetricOmission>,
}

/// Cooperative cancellation point shared by all metrics of one pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline(Option<Instant>);

impl Deadline {
    pub(crate) fn after(budget: Option<Duration>) -> Self {
        Self(budget.and_then(|b| Instant::now().checked_add(b)))
    }

    pub(crate) fn check(self) -> Result<(), OmissionReason> {
        match self.0 {
            Some(at) if Instant::now() >= at => Err(OmissionReason::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

type Graph = UnGraph<CreatorNode, EdgeData>;

/// Top [`TOP_K`] nodes by value, descending, ties broken by node id.
fn top_ranked(graph: &Graph, values: &[f64]) -> Result<Vec<NodeScore>, OmissionReason> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(OmissionReason::NonFinite);
    }

    let mut ranked: Vec<NodeScore> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| NodeScore {
            id: graph[NodeIndex::new(i)].id.clone(),
            value,
        })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(TOP_K);
    Ok(ranked)
}

/// Map communities of node indices to ids, sorted by size descending then by
/// smallest member id, keeping the first [`TOP_K`].
fn top_communities(graph: &Graph, communities: Vec<Vec<NodeIndex>>) -> Vec<Vec<String>> {
    let mut named: Vec<Vec<String>> = communities
        .into_iter()
        .map(|members| {
            let mut ids: Vec<String> = members.into_iter().map(|ix| graph[ix].id.clone()).collect();
            ids.sort();
            ids
        })
        .collect();
    named.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    named.truncate(TOP_K);
    named
}

fn record<T>(
    omitted: &mut Vec<MetricOmission>,
    metric: MetricKind,
    result: Result<T, OmissionReason>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::warn!(%metric, %reason, "metric omitted");
            omitted.push(MetricOmission { metric, reason });
            None
        }
    }
}

/// Compute centrality rankings and communities for a graph.
///
/// The four metrics run concurrently on the rayon pool. With a deadline set,
/// any metric still running when it passes is omitted.
#[must_use]
pub fn analyze(graph: &SimilarityGraph, config: &MetricsConfig) -> GraphMetrics {
    let g = graph.inner();
    let mut metrics = GraphMetrics::default();

    if g.node_count() == 0 {
        for metric in [
            MetricKind::DegreeCentrality,
            MetricKind::BetweennessCentrality,
            MetricKind::Pagerank,
            MetricKind::Communities,
        ] {
            record::<()>(&mut metrics.omitted, metric, Err(OmissionReason::EmptyGraph));
        }
        return metrics;
    }

    let deadline = Deadline::after(config.deadline);
    let ((degree, betweenness), (rank, communities)) = rayon::join(
        || {
            rayon::join(
                || degree_centrality(g, deadline).and_then(|v| top_ranked(g, &v)),
                || betweenness_centrality(g, deadline).and_then(|v| top_ranked(g, &v)),
            )
        },
        || {
            rayon::join(
                || pagerank(g, deadline).and_then(|v| top_ranked(g, &v)),
                || greedy_modularity_communities(g, deadline).map(|c| top_communities(g, c)),
            )
        },
    );

    let omitted = &mut metrics.omitted;
    metrics.degree_centrality = record(omitted, MetricKind::DegreeCentrality, degree);
    metrics.betweenness_centrality = record(omitted, MetricKind::BetweennessCentrality, betweenness);
    metrics.pagerank = record(omitted, MetricKind::Pagerank, rank);
    metrics.communities = record(omitted, MetricKind::Communities, communities);

    tracing::info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        omitted = metrics.omitted.len(),
        "analysed similarity graph"
    );
    metrics
}
