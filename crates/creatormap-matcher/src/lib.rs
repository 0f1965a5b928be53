//! Campaign-brief matching for creator profiles.
//!
//! Scores each candidate on content relevance (TF-IDF cosine), keyword
//! overlap, engagement, audience fit and channel authority, then merges the
//! composite score with keyword-search hit counts into the final ranking.

pub mod matcher;
pub mod ranking;
pub mod scorer;
pub mod types;
pub mod vectorizer;

pub use matcher::{find_matches, score_candidates};
pub use ranking::{rank_candidates, RankedCandidate};
pub use scorer::score;
pub use types::{MatchBreakdown, MatchResult, ScoringContext, SubScore, SubScoreKind};
pub use vectorizer::{similarity, similarity_with_outcome, VectorizerConfig};
