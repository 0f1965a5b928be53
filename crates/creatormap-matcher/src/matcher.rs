use creatormap_core::{Brief, CandidateProfile};

use crate::scorer::score;
use crate::types::{MatchResult, ScoringContext};

/// Score every candidate that passes the brief's subscriber bounds and return
/// them best first.
///
/// An empty candidate list or a brief without keywords yields an empty list.
#[must_use]
pub fn find_matches(
    candidates: &[CandidateProfile],
    brief: &Brief,
    ctx: &ScoringContext,
) -> Vec<MatchResult> {
    if candidates.is_empty() || brief.keyword_set().is_empty() {
        tracing::info!(
            candidates = candidates.len(),
            keywords = brief.keywords.len(),
            "nothing to match"
        );
        return Vec::new();
    }

    let bounds = brief.subscriber_bounds.unwrap_or_default();
    let mut matches: Vec<MatchResult> = candidates
        .iter()
        .filter(|c| bounds.admits(c.subscriber_count))
        .map(|c| score(c, brief, ctx))
        .collect();

    matches.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

    tracing::info!(
        candidates = candidates.len(),
        scored = matches.len(),
        "matched candidates against brief"
    );
    matches
}

/// In-process entry point for the ranking flow; same as [`find_matches`].
#[must_use]
pub fn score_candidates(
    candidates: &[CandidateProfile],
    brief: &Brief,
    ctx: &ScoringContext,
) -> Vec<MatchResult> {
    find_matches(candidates, brief, ctx)
}
