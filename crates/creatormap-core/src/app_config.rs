#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Pairs at or below this similarity get no edge.
    pub edge_threshold: f64,
    /// Divide pair similarity by the weight of the terms that applied.
    pub renormalize_similarity: bool,
    /// Candidate count from which pairwise similarity runs on the rayon pool.
    pub parallel_min_candidates: usize,
    pub metrics_deadline_ms: Option<u64>,
    pub top_n: usize,
}
