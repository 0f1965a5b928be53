use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Only the first this-many recent videos of a profile are analysed.
pub const MAX_RECENT_VIDEOS: usize = 10;

/// A single uploaded video as reported by the profile source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// RFC 3339 publish time exactly as supplied; may be malformed.
    pub published_at: String,
}

/// Snapshot of one content creator for a single analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    /// ISO country code, empty when unknown.
    pub country: String,
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    /// Newest-relevant first.
    pub recent_videos: Vec<VideoRecord>,
    pub thumbnail: Option<String>,
}

impl CandidateProfile {
    /// The recent videos that take part in scoring, capped at [`MAX_RECENT_VIDEOS`].
    #[must_use]
    pub fn analysed_videos(&self) -> &[VideoRecord] {
        let end = self.recent_videos.len().min(MAX_RECENT_VIDEOS);
        &self.recent_videos[..end]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriberBounds {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SubscriberBounds {
    /// Whether a subscriber count lies within the (inclusive) bounds.
    #[must_use]
    pub fn admits(&self, subscribers: u64) -> bool {
        self.min.is_none_or(|min| subscribers >= min)
            && self.max.is_none_or(|max| subscribers <= max)
    }
}

/// A campaign brief: what the brand is looking for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brief {
    pub text: String,
    pub keywords: Vec<String>,
    pub target_audience: Option<Vec<String>>,
    pub subscriber_bounds: Option<SubscriberBounds>,
}

impl Brief {
    /// Lower-cased, trimmed, non-empty brief keywords.
    #[must_use]
    pub fn keyword_set(&self) -> BTreeSet<String> {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Target-audience terms, or `None` when none were supplied.
    #[must_use]
    pub fn audience_terms(&self) -> Option<&[String]> {
        self.target_audience
            .as_deref()
            .filter(|terms| !terms.is_empty())
    }
}

/// How often a candidate surfaced across independent keyword searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateHits {
    pub count: usize,
    pub video_ids: Vec<String>,
}

/// Popularity signal gathered by the external search step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHits {
    /// Keywords that were searched, in search order.
    pub keywords: Vec<String>,
    /// Candidate id to its hits.
    pub hits: BTreeMap<String, CandidateHits>,
}

#[derive(Debug, Deserialize)]
struct CandidatesFile {
    candidates: Vec<CandidateProfile>,
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::InputFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load and validate candidate profiles from a YAML (or JSON) file with a
/// top-level `candidates` list.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateProfile>, ConfigError> {
    let file: CandidatesFile = read_yaml(path)?;
    validate_candidates(&file.candidates)?;
    Ok(file.candidates)
}

/// Load and validate a campaign brief.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brief(path: &Path) -> Result<Brief, ConfigError> {
    let brief: Brief = read_yaml(path)?;
    validate_brief(&brief)?;
    Ok(brief)
}

/// Load keyword-search hit counts.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_search_hits(path: &Path) -> Result<SearchHits, ConfigError> {
    read_yaml(path)
}

fn validate_candidates(candidates: &[CandidateProfile]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for candidate in candidates {
        if candidate.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "candidate '{}' has an empty id",
                candidate.title
            )));
        }

        if !seen.insert(candidate.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate candidate id: '{}'",
                candidate.id
            )));
        }
    }

    Ok(())
}

fn validate_brief(brief: &Brief) -> Result<(), ConfigError> {
    if let Some(SubscriberBounds {
        min: Some(min),
        max: Some(max),
    }) = brief.subscriber_bounds
    {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "subscriber bounds are inverted: min {min} > max {max}"
            )));
        }
    }

    Ok(())
}
