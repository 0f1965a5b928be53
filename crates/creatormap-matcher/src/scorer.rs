//! Per-candidate sub-scores and the composite match score.
//!
//! Every sub-score is computed independently. Missing or malformed data makes
//! that one sub-score fall back to zero (or its neutral value) with a
//! [`Degradation`] reason; it never stops the candidate from being scored.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use creatormap_core::text::long_word_set;
use creatormap_core::{
    Brief, CandidateProfile, Degradation, Outcome, VideoRecord, MAX_RECENT_VIDEOS,
};

use crate::types::{MatchBreakdown, MatchResult, ScoringContext, SubScore};
use crate::vectorizer::{similarity_with_outcome, VectorizerConfig};

/// Videos published within this many days count as recent activity.
const ACTIVITY_WINDOW_DAYS: i64 = 180;

/// Like rate treated as full marks before the doubling multiplier.
const GOOD_LIKE_RATE: f64 = 0.05;
const GOOD_COMMENT_RATE: f64 = 0.005;
/// Comments are worth this many likes in the average-engagement term.
const COMMENT_WEIGHT: f64 = 10.0;

/// Neutral audience-fit value used when the brief names no audience.
const NEUTRAL_AUDIENCE_FIT: f64 = 0.5;
/// Consistency assumed when only one video has views.
const SINGLE_VIDEO_CONSISTENCY: f64 = 0.5;

/// Score one candidate against a brief.
#[must_use]
pub fn score(candidate: &CandidateProfile, brief: &Brief, ctx: &ScoringContext) -> MatchResult {
    let brief_keywords = brief.keyword_set();
    let brief_text = brief
        .keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let breakdown = MatchBreakdown {
        content_relevance: content_relevance(candidate, &brief_text),
        keyword_match: keyword_match(candidate, &brief_keywords),
        engagement: engagement(candidate),
        audience_fit: audience_fit(candidate, brief.audience_terms()),
        authority: authority(candidate, ctx.now),
    };

    for (kind, sub) in breakdown.iter() {
        if let Some(reason) = sub.outcome.reason() {
            tracing::debug!(
                candidate = %candidate.id,
                sub_score = %kind,
                value = sub.value,
                %reason,
                "sub-score degraded"
            );
        }
    }

    MatchResult {
        candidate_id: candidate.id.clone(),
        title: candidate.title.clone(),
        subscriber_count: candidate.subscriber_count,
        country: candidate.country.clone(),
        composite_score: breakdown.composite(),
        breakdown,
    }
}

/// TF-IDF cosine similarity between the candidate's own text and the brief keywords.
#[must_use]
pub fn content_relevance(candidate: &CandidateProfile, brief_text: &str) -> SubScore {
    let mut channel_text = candidate.description.to_lowercase();
    for video in candidate.analysed_videos() {
        channel_text.push(' ');
        channel_text.push_str(&video.title.to_lowercase());
        channel_text.push(' ');
        channel_text.push_str(&video.description.to_lowercase());
    }

    if channel_text.trim().is_empty() || brief_text.trim().is_empty() {
        return SubScore::with_outcome(0.0, Outcome::degraded(Degradation::EmptyText));
    }

    let (value, outcome) =
        similarity_with_outcome(&channel_text, brief_text, &VectorizerConfig::default());
    SubScore::with_outcome(value, outcome)
}

/// Explicit keywords plus long words from the description and video titles.
#[must_use]
pub fn candidate_keywords(candidate: &CandidateProfile) -> BTreeSet<String> {
    let texts = std::iter::once(candidate.description.as_str()).chain(
        candidate
            .analysed_videos()
            .iter()
            .map(|v| v.title.as_str()),
    );

    let mut keywords = long_word_set(texts, false);
    keywords.extend(
        candidate
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty()),
    );
    keywords
}

/// Share of brief keywords that the candidate's keyword set covers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn keyword_match(candidate: &CandidateProfile, brief_keywords: &BTreeSet<String>) -> SubScore {
    if brief_keywords.is_empty() {
        return SubScore::with_outcome(0.0, Outcome::degraded(Degradation::NoBriefKeywords));
    }

    let ours = candidate_keywords(candidate);
    let overlap = brief_keywords.intersection(&ours).count();
    SubScore::ok((overlap as f64 / brief_keywords.len() as f64).min(1.0))
}

/// Like/comment rates, upload consistency and average interactions per video.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement(candidate: &CandidateProfile) -> SubScore {
    if candidate.video_count == 0 {
        return SubScore::with_outcome(0.0, Outcome::degraded(Degradation::ZeroVideoCount));
    }

    let videos = candidate.analysed_videos();
    if videos.is_empty() {
        return SubScore::with_outcome(0.0, Outcome::degraded(Degradation::NoRecentVideos));
    }

    let likes: u64 = videos.iter().map(|v| v.like_count).sum();
    let comments: u64 = videos.iter().map(|v| v.comment_count).sum();
    let views: u64 = videos.iter().map(|v| v.view_count).sum();
    let (like_rate, comment_rate, outcome) = if views == 0 {
        (0.0, 0.0, Outcome::degraded(Degradation::ZeroTotalViews))
    } else {
        (
            likes as f64 / views as f64,
            comments as f64 / views as f64,
            Outcome::Ok,
        )
    };

    // Both rate terms may reach 2.0 before the final cap.
    let like_score = (like_rate / GOOD_LIKE_RATE).min(1.0) * 2.0;
    let comment_score = (comment_rate / GOOD_COMMENT_RATE).min(1.0) * 2.0;
    let consistency_score = (candidate.video_count as f64 / 100.0).min(1.0);

    let avg_engagement =
        (likes as f64 + comments as f64 * COMMENT_WEIGHT) / videos.len() as f64;
    let avg_engagement_score = ((avg_engagement + 1.0).log10() / 4.0).min(1.0);

    let value = (like_score * 0.40
        + comment_score * 0.30
        + consistency_score * 0.15
        + avg_engagement_score * 0.15)
        .min(1.0);
    SubScore::with_outcome(value, outcome)
}

/// Fraction of target-audience terms that appear in the channel's own text.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn audience_fit(candidate: &CandidateProfile, terms: Option<&[String]>) -> SubScore {
    let Some(terms) = terms else {
        return SubScore::with_outcome(
            NEUTRAL_AUDIENCE_FIT,
            Outcome::degraded(Degradation::NoAudienceTerms),
        );
    };

    let channel_text = format!(
        "{} {}",
        candidate.description.to_lowercase(),
        candidate.keywords.join(" ").to_lowercase()
    );

    let matches = terms
        .iter()
        .filter(|term| channel_text.contains(&term.to_lowercase()))
        .count();
    SubScore::ok((matches as f64 / terms.len() as f64).min(1.0))
}

/// Establishment and activity of the channel, independent of its size.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn authority(candidate: &CandidateProfile, now: DateTime<Utc>) -> SubScore {
    let video_score = ((candidate.video_count as f64 + 1.0).log10() / 3.0).min(1.0);

    let videos = candidate.analysed_videos();
    if videos.is_empty() {
        return SubScore::with_outcome(
            video_score * 0.40,
            Outcome::degraded(Degradation::NoRecentVideos),
        );
    }

    let (recent, unparsable) = count_recent(videos, now);
    let activity_score = (recent as f64 / MAX_RECENT_VIDEOS as f64).min(1.0);

    let viewed: Vec<f64> = videos
        .iter()
        .filter(|v| v.view_count > 0)
        .map(|v| v.view_count as f64)
        .collect();
    let quality_score = view_quality(&viewed);

    let outcome = if unparsable > 0 {
        Outcome::degraded(Degradation::UnparsableTimestamps { count: unparsable })
    } else if viewed.is_empty() {
        Outcome::degraded(Degradation::NoViewedVideos)
    } else {
        Outcome::Ok
    };

    let value = (video_score * 0.40 + activity_score * 0.30 + quality_score * 0.30).min(1.0);
    SubScore::with_outcome(value, outcome)
}

/// Count videos inside the activity window; unparsable timestamps are counted
/// separately and treated as not recent.
fn count_recent(videos: &[VideoRecord], now: DateTime<Utc>) -> (usize, usize) {
    let threshold = now - Duration::days(ACTIVITY_WINDOW_DAYS);
    let mut recent = 0;
    let mut unparsable = 0;

    for video in videos {
        match DateTime::parse_from_rfc3339(video.published_at.trim()) {
            Ok(published) if published.with_timezone(&Utc) > threshold => recent += 1,
            Ok(_) => {}
            Err(_) => unparsable += 1,
        }
    }

    (recent, unparsable)
}

/// Log-scaled average views, discounted by how uneven the views are.
#[allow(clippy::cast_precision_loss)]
fn view_quality(viewed: &[f64]) -> f64 {
    if viewed.is_empty() {
        return 0.0;
    }

    let n = viewed.len() as f64;
    let avg = viewed.iter().sum::<f64>() / n;
    let consistency = if viewed.len() > 1 {
        let variance = viewed.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;
        1.0 - (variance.sqrt() / (avg + 1.0)).min(1.0)
    } else {
        SINGLE_VIDEO_CONSISTENCY
    };

    ((avg + 1.0).log10() / 6.0).min(1.0) * consistency
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
