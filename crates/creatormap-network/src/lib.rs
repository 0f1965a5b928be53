//! Creator similarity network.
//!
//! Builds a weighted undirected graph over a batch of candidate profiles,
//! computes centrality rankings, communities and summary statistics, and
//! exports the graph as GraphML.

pub mod error;
pub mod export;
pub mod graph;
pub mod metrics;
pub mod payload;
pub mod similarity;
pub mod statistics;
pub mod types;

pub use error::ExportError;
pub use export::{write_graphml, write_graphml_file};
pub use graph::{build_graph, SimilarityGraph};
pub use metrics::{analyze, GraphMetrics, MetricKind, MetricOmission, NodeScore, OmissionReason};
pub use payload::{build_network, NetworkPayload};
pub use similarity::{graph_keywords, pair_similarity, NodeSignals, PairSimilarity};
pub use statistics::NetworkStatistics;
pub use types::{
    AppliedTerms, CreatorNode, EdgeData, MetricsConfig, NetworkConfig, SimilarityEdge,
};
