//! `score` and `rank` command handlers.

use std::path::Path;

use chrono::{DateTime, Utc};
use creatormap_core::{load_brief, load_candidates, load_search_hits};
use creatormap_matcher::{rank_candidates, score_candidates, ScoringContext};

fn scoring_context(at: Option<DateTime<Utc>>) -> ScoringContext {
    at.map_or_else(ScoringContext::now, ScoringContext::at)
}

/// Score all candidates against the brief and print the matches.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the output cannot be
/// serialised.
pub(crate) fn run_score(
    candidates_path: &Path,
    brief_path: &Path,
    at: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let candidates = load_candidates(candidates_path)?;
    let brief = load_brief(brief_path)?;

    let matches = score_candidates(&candidates, &brief, &scoring_context(at));
    tracing::info!(
        candidates = candidates.len(),
        matches = matches.len(),
        "scoring complete"
    );

    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

/// Score, blend with search hits, and print the top `top_n` candidates.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the output cannot be
/// serialised.
pub(crate) fn run_rank(
    candidates_path: &Path,
    brief_path: &Path,
    hits_path: &Path,
    top_n: usize,
    at: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let candidates = load_candidates(candidates_path)?;
    let brief = load_brief(brief_path)?;
    let hits = load_search_hits(hits_path)?;

    let matches = score_candidates(&candidates, &brief, &scoring_context(at));
    let ranked = rank_candidates(matches, &hits, top_n);
    tracing::info!(
        candidates = candidates.len(),
        searched_keywords = hits.keywords.len(),
        ranked = ranked.len(),
        top_n,
        "ranking complete"
    );

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
