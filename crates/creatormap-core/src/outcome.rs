//! Explicit degradation records.
//!
//! Scoring never fails a candidate: a sub-score that cannot be computed falls
//! back to zero or a neutral value. [`Outcome`] records which of the two
//! happened and why, so callers and tests can tell a genuine zero from a
//! fallback.

use serde::{Deserialize, Serialize};

/// Why a value fell back to its zero or neutral default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// One of the compared documents had no usable text.
    EmptyText,
    /// Stop-word removal and document-frequency pruning left no terms.
    EmptyVocabulary,
    /// The brief carried no keywords to match against.
    NoBriefKeywords,
    NoRecentVideos,
    ZeroVideoCount,
    /// Recent videos exist but report no views, so rates are zero.
    ZeroTotalViews,
    /// No recent video has a nonzero view count.
    NoViewedVideos,
    /// Some publish timestamps could not be parsed and counted as not recent.
    UnparsableTimestamps { count: usize },
    /// No target-audience terms were supplied; the neutral value is used.
    NoAudienceTerms,
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degradation::EmptyText => write!(f, "empty text"),
            Degradation::EmptyVocabulary => write!(f, "empty vocabulary"),
            Degradation::NoBriefKeywords => write!(f, "no brief keywords"),
            Degradation::NoRecentVideos => write!(f, "no recent videos"),
            Degradation::ZeroVideoCount => write!(f, "zero video count"),
            Degradation::ZeroTotalViews => write!(f, "zero total views"),
            Degradation::NoViewedVideos => write!(f, "no videos with views"),
            Degradation::UnparsableTimestamps { count } => {
                write!(f, "{count} unparsable publish timestamp(s)")
            }
            Degradation::NoAudienceTerms => write!(f, "no target audience terms"),
        }
    }
}

/// Whether a value was computed normally or fell back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    Degraded { reason: Degradation },
}

impl Outcome {
    #[must_use]
    pub fn degraded(reason: Degradation) -> Self {
        Outcome::Degraded { reason }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    /// The degradation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&Degradation> {
        match self {
            Outcome::Ok => None,
            Outcome::Degraded { reason } => Some(reason),
        }
    }
}
