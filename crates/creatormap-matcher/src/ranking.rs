//! Final ranking: match score blended with keyword-search popularity.

use creatormap_core::SearchHits;
use serde::Serialize;

use crate::types::MatchResult;

/// Keywords beyond this many are ignored when normalising hit counts.
pub const MAX_SEARCH_KEYWORDS: usize = 40;
/// Candidates found by at least this many searches get a bonus.
pub const BONUS_MIN_HITS: usize = 3;
const BONUS_FACTOR: f64 = 1.1;
const MATCH_WEIGHT: f64 = 0.7;
const HIT_WEIGHT: f64 = 0.3;
const SAMPLED_VIDEOS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub matched: MatchResult,
    pub hit_count: usize,
    pub hit_score: f64,
    pub final_score: f64,
    /// Up to three videos that surfaced this candidate in search.
    pub sampled_videos: Vec<String>,
}

/// Blend each match with its hit count, sort by final score and keep `top_n`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_candidates(
    matches: Vec<MatchResult>,
    hits: &SearchHits,
    top_n: usize,
) -> Vec<RankedCandidate> {
    let searched = hits.keywords.len().min(MAX_SEARCH_KEYWORDS).max(1) as f64;

    let mut ranked: Vec<RankedCandidate> = matches
        .into_iter()
        .map(|matched| {
            let entry = hits.hits.get(&matched.candidate_id);
            let hit_count = entry.map_or(0, |h| h.count);
            let hit_score = (hit_count as f64 / searched).min(1.0);

            let mut final_score = matched.composite_score * MATCH_WEIGHT + hit_score * HIT_WEIGHT;
            if hit_count >= BONUS_MIN_HITS {
                final_score = (final_score * BONUS_FACTOR).min(1.0);
            }

            let sampled_videos = entry
                .map(|h| h.video_ids.iter().take(SAMPLED_VIDEOS).cloned().collect())
                .unwrap_or_default();

            RankedCandidate {
                matched,
                hit_count,
                hit_score,
                final_score,
                sampled_videos,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    ranked.truncate(top_n);
    ranked
}
