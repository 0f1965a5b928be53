//! Integration tests for the scoring and ranking flow.
//!
//! Candidates are built in code so the expected ordering can be read off the
//! fixtures directly.

use chrono::{TimeZone, Utc};
use creatormap_core::{
    Brief, CandidateHits, CandidateProfile, Degradation, SearchHits, SubscriberBounds, VideoRecord,
};
use creatormap_matcher::{
    find_matches, rank_candidates, score, score_candidates, similarity, ScoringContext,
};

fn ctx() -> ScoringContext {
    ScoringContext::at(Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap())
}

fn video(id: &str, title: &str, views: u64, likes: u64, comments: u64) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        view_count: views,
        like_count: likes,
        comment_count: comments,
        published_at: "2026-09-15T12:00:00Z".to_string(),
    }
}

fn fitness_channel() -> CandidateProfile {
    CandidateProfile {
        id: "UC-fit".to_string(),
        title: "Fit With Asha".to_string(),
        description: "Home fitness workouts, yoga flows and protein recipes for busy people."
            .to_string(),
        subscriber_count: 250_000,
        video_count: 320,
        view_count: 40_000_000,
        country: "IN".to_string(),
        keywords: vec!["fitness".to_string(), "yoga".to_string()],
        topics: vec!["Health".to_string(), "Lifestyle".to_string()],
        recent_videos: vec![
            video("f1", "Morning yoga flow for beginners", 40_000, 2_100, 180),
            video("f2", "High protein breakfast ideas", 35_000, 1_800, 150),
            video("f3", "Full body fitness workout at home", 52_000, 2_600, 240),
        ],
        thumbnail: None,
    }
}

fn gaming_channel() -> CandidateProfile {
    CandidateProfile {
        id: "UC-game".to_string(),
        title: "Pixel Rush".to_string(),
        description: "Speedruns, retro consoles and game reviews.".to_string(),
        subscriber_count: 900_000,
        video_count: 1_200,
        view_count: 300_000_000,
        country: "US".to_string(),
        keywords: vec!["gaming".to_string(), "speedrun".to_string()],
        topics: vec!["Video game culture".to_string()],
        recent_videos: vec![
            video("g1", "Any percent world record attempt", 120_000, 6_000, 900),
            video("g2", "Ranking every retro console", 95_000, 4_000, 700),
        ],
        thumbnail: None,
    }
}

fn empty_channel() -> CandidateProfile {
    CandidateProfile {
        id: "UC-new".to_string(),
        title: "Brand New".to_string(),
        video_count: 0,
        ..CandidateProfile::default()
    }
}

fn fitness_brief() -> Brief {
    Brief {
        text: "Launch campaign for a plant-based protein powder".to_string(),
        keywords: vec![
            "fitness".to_string(),
            "protein".to_string(),
            "yoga".to_string(),
            "workout".to_string(),
        ],
        target_audience: Some(vec!["home".to_string(), "busy".to_string()]),
        subscriber_bounds: None,
    }
}

#[test]
fn relevant_channel_ranks_first() {
    let candidates = [gaming_channel(), empty_channel(), fitness_channel()];
    let matches = find_matches(&candidates, &fitness_brief(), &ctx());

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].candidate_id, "UC-fit");
    assert!(matches[0].composite_score > matches[1].composite_score);
}

#[test]
fn zero_video_count_gives_zero_engagement() {
    let result = score(&empty_channel(), &fitness_brief(), &ctx());
    assert_eq!(result.breakdown.engagement.value, 0.0);
    assert_eq!(
        result.breakdown.engagement.outcome.reason(),
        Some(&Degradation::ZeroVideoCount)
    );
    assert!((0.0..=1.0).contains(&result.composite_score));
}

#[test]
fn empty_brief_keywords_return_nothing() {
    let brief = Brief {
        keywords: Vec::new(),
        ..fitness_brief()
    };
    let matches = find_matches(&[fitness_channel(), gaming_channel()], &brief, &ctx());
    assert!(matches.is_empty());
}

#[test]
fn subscriber_bounds_drop_out_of_range_channels() {
    let brief = Brief {
        subscriber_bounds: Some(SubscriberBounds {
            min: Some(100_000),
            max: Some(500_000),
        }),
        ..fitness_brief()
    };
    let matches = score_candidates(&[fitness_channel(), gaming_channel()], &brief, &ctx());
    let ids: Vec<&str> = matches.iter().map(|m| m.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["UC-fit"]);
}

#[test]
fn every_score_stays_in_unit_interval() {
    let candidates = [fitness_channel(), gaming_channel(), empty_channel()];
    for result in find_matches(&candidates, &fitness_brief(), &ctx()) {
        assert!((0.0..=1.0).contains(&result.composite_score));
        for (kind, sub) in result.breakdown.iter() {
            assert!(
                (0.0..=1.0).contains(&sub.value),
                "{} {kind} = {}",
                result.candidate_id,
                sub.value
            );
        }
    }
}

#[test]
fn search_hits_can_lift_a_weaker_match() {
    let candidates = [fitness_channel(), gaming_channel()];
    let matches = find_matches(&candidates, &fitness_brief(), &ctx());

    let mut hits = SearchHits {
        keywords: vec!["fitness".to_string(), "protein".to_string(), "yoga".to_string()],
        ..SearchHits::default()
    };
    hits.hits.insert(
        "UC-game".to_string(),
        CandidateHits {
            count: 3,
            video_ids: vec!["g1".into(), "g2".into(), "g3".into(), "g4".into()],
        },
    );

    let ranked = rank_candidates(matches, &hits, 20);
    assert_eq!(ranked.len(), 2);
    let game = ranked
        .iter()
        .find(|r| r.matched.candidate_id == "UC-game")
        .unwrap();
    assert_eq!(game.hit_score, 1.0);
    assert_eq!(game.sampled_videos, vec!["g1", "g2", "g3"]);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].final_score >= w[1].final_score));
}

#[test]
fn ranked_output_serializes_flat() {
    let matches = find_matches(&[fitness_channel()], &fitness_brief(), &ctx());
    let ranked = rank_candidates(matches, &SearchHits::default(), 5);
    let json = serde_json::to_value(&ranked).unwrap();

    let first = &json[0];
    assert_eq!(first["candidate_id"], "UC-fit");
    assert_eq!(first["hit_count"], 0);
    assert!(first["composite_score"].is_number());
    assert!(first["breakdown"]["content_relevance"]["value"].is_number());
}

#[test]
fn similarity_is_symmetric_and_bounded() {
    let a = "home fitness workouts and yoga";
    let b = "yoga for beginners at home";
    let ab = similarity(a, b);
    let ba = similarity(b, a);
    assert!((ab - ba).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&ab));
    assert_eq!(similarity("", b), 0.0);
}
