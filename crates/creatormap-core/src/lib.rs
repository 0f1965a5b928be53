//! Shared data model, text normalisation and configuration for creatormap.

pub mod app_config;
pub mod config;
pub mod outcome;
pub mod profiles;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use outcome::{Degradation, Outcome};
pub use profiles::{
    load_brief, load_candidates, load_search_hits, Brief, CandidateHits, CandidateProfile, SearchHits,
    SubscriberBounds, VideoRecord, MAX_RECENT_VIDEOS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read input file {path}: {source}")]
    InputFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input file {path}: {source}")]
    InputFileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
