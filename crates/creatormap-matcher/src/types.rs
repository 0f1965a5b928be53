use chrono::{DateTime, Utc};
use creatormap_core::Outcome;
use serde::Serialize;

/// The five components of a composite match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    ContentRelevance,
    KeywordMatch,
    Engagement,
    AudienceFit,
    Authority,
}

impl SubScoreKind {
    pub const ALL: [SubScoreKind; 5] = [
        SubScoreKind::ContentRelevance,
        SubScoreKind::KeywordMatch,
        SubScoreKind::Engagement,
        SubScoreKind::AudienceFit,
        SubScoreKind::Authority,
    ];

    /// Fixed weight in the composite score. The five weights sum to 1.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            SubScoreKind::ContentRelevance => 0.35,
            SubScoreKind::KeywordMatch => 0.30,
            SubScoreKind::Engagement => 0.20,
            SubScoreKind::AudienceFit => 0.10,
            SubScoreKind::Authority => 0.05,
        }
    }
}

impl std::fmt::Display for SubScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubScoreKind::ContentRelevance => write!(f, "content_relevance"),
            SubScoreKind::KeywordMatch => write!(f, "keyword_match"),
            SubScoreKind::Engagement => write!(f, "engagement"),
            SubScoreKind::AudienceFit => write!(f, "audience_fit"),
            SubScoreKind::Authority => write!(f, "authority"),
        }
    }
}

/// One bounded sub-score and how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    /// Always in `[0, 1]`.
    pub value: f64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl SubScore {
    #[must_use]
    pub fn ok(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            outcome: Outcome::Ok,
        }
    }

    #[must_use]
    pub fn with_outcome(value: f64, outcome: Outcome) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBreakdown {
    pub content_relevance: SubScore,
    pub keyword_match: SubScore,
    pub engagement: SubScore,
    pub audience_fit: SubScore,
    pub authority: SubScore,
}

impl MatchBreakdown {
    #[must_use]
    pub fn get(&self, kind: SubScoreKind) -> &SubScore {
        match kind {
            SubScoreKind::ContentRelevance => &self.content_relevance,
            SubScoreKind::KeywordMatch => &self.keyword_match,
            SubScoreKind::Engagement => &self.engagement,
            SubScoreKind::AudienceFit => &self.audience_fit,
            SubScoreKind::Authority => &self.authority,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubScoreKind, &SubScore)> + '_ {
        SubScoreKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Weighted sum of the sub-scores, capped at 1.
    #[must_use]
    pub fn composite(&self) -> f64 {
        self.iter()
            .map(|(kind, sub)| kind.weight() * sub.value)
            .sum::<f64>()
            .min(1.0)
    }
}

/// Relevance of one candidate to a brief.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub title: String,
    pub subscriber_count: u64,
    pub country: String,
    /// In `[0, 1]`.
    pub composite_score: f64,
    pub breakdown: MatchBreakdown,
}

/// Inputs to scoring that do not come from the candidate or the brief.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    /// Reference instant for the recent-activity window.
    pub now: DateTime<Utc>,
}

impl ScoringContext {
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Context anchored at the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }
}
