use std::time::Duration;

use creatormap_core::AppConfig;
use serde::Serialize;

/// Default minimum pair similarity (exclusive) for an edge.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_PARALLEL_MIN_CANDIDATES: usize = 64;

/// Graph node: one creator and the attributes the similarity terms use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorNode {
    pub id: String,
    pub title: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    /// Lifetime views per subscriber; 0 when the channel has no subscribers.
    pub engagement_rate: f64,
    pub country: String,
    /// At most 20, explicit keywords first.
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    pub thumbnail: Option<String>,
    pub description: String,
}

/// Which similarity terms contributed to a pair's weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppliedTerms {
    pub keywords: bool,
    pub topics: bool,
    pub subscribers: bool,
    pub country: bool,
}

impl AppliedTerms {
    pub const KEYWORD_WEIGHT: f64 = 0.4;
    pub const TOPIC_WEIGHT: f64 = 0.3;
    pub const SUBSCRIBER_WEIGHT: f64 = 0.2;
    pub const COUNTRY_WEIGHT: f64 = 0.1;

    /// Highest weight reachable with these terms: the ceiling of an
    /// un-renormalised pair.
    #[must_use]
    pub fn weight_sum(self) -> f64 {
        [
            (self.keywords, Self::KEYWORD_WEIGHT),
            (self.topics, Self::TOPIC_WEIGHT),
            (self.subscribers, Self::SUBSCRIBER_WEIGHT),
            (self.country, Self::COUNTRY_WEIGHT),
        ]
        .iter()
        .filter(|(applied, _)| *applied)
        .map(|(_, weight)| weight)
        .sum()
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.keywords || self.topics || self.subscribers || self.country
    }
}

/// Weight stored on each graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeData {
    /// In `[0, 1]`.
    pub weight: f64,
    pub terms: AppliedTerms,
}

/// An undirected edge as it appears in the network payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub terms: AppliedTerms,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkConfig {
    pub edge_threshold: f64,
    pub renormalize: bool,
    /// Candidate count from which pairwise comparison runs on the rayon pool.
    pub parallel_min_candidates: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            renormalize: false,
            parallel_min_candidates: DEFAULT_PARALLEL_MIN_CANDIDATES,
        }
    }
}

impl From<&AppConfig> for NetworkConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            edge_threshold: config.edge_threshold,
            renormalize: config.renormalize_similarity,
            parallel_min_candidates: config.parallel_min_candidates,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Wall-clock budget for the whole metrics pass; `None` means unbounded.
    pub deadline: Option<Duration>,
}

impl From<&AppConfig> for MetricsConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            deadline: config.metrics_deadline_ms.map(Duration::from_millis),
        }
    }
}
