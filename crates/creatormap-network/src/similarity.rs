//! Multi-factor similarity between two creators.
//!
//! The weight is the sum of the terms that apply to the pair:
//!
//! | term | weight | applies when |
//! |---|---|---|
//! | keyword Jaccard | 0.4 | either side has keywords |
//! | topic Jaccard | 0.3 | either side has topics |
//! | log-scale subscriber closeness | 0.2 | both subscriber counts > 0 |
//! | country match | 0.1 | both countries known |
//!
//! A pair with missing data therefore has a lower ceiling than 1.0 unless the
//! sum is renormalised by the weight of the terms that applied.

use std::collections::BTreeSet;

use creatormap_core::text::{is_stop_word, long_words};
use creatormap_core::CandidateProfile;

use crate::types::{AppliedTerms, CreatorNode};

/// Cap on the graph keyword set of one creator.
pub const MAX_GRAPH_KEYWORDS: usize = 20;

/// Graph keyword set: explicit keywords first, then long non-stop words from
/// the description and video titles in lexicographic order, capped at
/// [`MAX_GRAPH_KEYWORDS`].
#[must_use]
pub fn graph_keywords(candidate: &CandidateProfile) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut keywords = Vec::new();

    for keyword in &candidate.keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }

    let derived: BTreeSet<String> = std::iter::once(candidate.description.as_str())
        .chain(candidate.analysed_videos().iter().map(|v| v.title.as_str()))
        .flat_map(long_words)
        .filter(|w| !is_stop_word(w))
        .collect();

    for word in derived {
        if keywords.len() >= MAX_GRAPH_KEYWORDS {
            break;
        }
        if seen.insert(word.clone()) {
            keywords.push(word);
        }
    }

    keywords.truncate(MAX_GRAPH_KEYWORDS);
    keywords
}

impl CreatorNode {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_profile(candidate: &CandidateProfile) -> Self {
        let engagement_rate = if candidate.subscriber_count > 0 {
            candidate.view_count as f64 / candidate.subscriber_count as f64
        } else {
            0.0
        };

        Self {
            id: candidate.id.clone(),
            title: candidate.title.clone(),
            subscriber_count: candidate.subscriber_count,
            video_count: candidate.video_count,
            view_count: candidate.view_count,
            engagement_rate,
            country: candidate.country.clone(),
            keywords: graph_keywords(candidate),
            topics: candidate.topics.clone(),
            thumbnail: candidate.thumbnail.clone(),
            description: candidate.description.clone(),
        }
    }
}

/// Per-node inputs to [`pair_similarity`], computed once per graph build.
#[derive(Debug, Clone)]
pub struct NodeSignals<'a> {
    keywords: BTreeSet<&'a str>,
    topics: BTreeSet<&'a str>,
    /// `log10(subscribers + 1)`, present only for channels with subscribers.
    log_subscribers: Option<f64>,
    country: &'a str,
}

impl<'a> NodeSignals<'a> {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(node: &'a CreatorNode) -> Self {
        Self {
            keywords: node.keywords.iter().map(String::as_str).collect(),
            topics: node.topics.iter().map(String::as_str).collect(),
            log_subscribers: (node.subscriber_count > 0)
                .then(|| (node.subscriber_count as f64 + 1.0).log10()),
            country: node.country.as_str(),
        }
    }
}

/// Similarity of one pair and the terms it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSimilarity {
    pub weight: f64,
    pub terms: AppliedTerms,
}

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// `1 - |la - lb| / max(la, lb)` on log10 subscriber counts, floored at 0.
fn subscriber_closeness(a: f64, b: f64) -> f64 {
    let ratio = (a - b).abs() / a.max(b);
    1.0 - ratio.min(1.0)
}

/// Weighted similarity of two creators.
///
/// With `renormalize` the sum is divided by the weight of the terms that
/// applied, so a pair is not penalised for data neither side has.
#[must_use]
pub fn pair_similarity(a: &NodeSignals<'_>, b: &NodeSignals<'_>, renormalize: bool) -> PairSimilarity {
    let mut terms = AppliedTerms::default();
    let mut weight = 0.0;

    if !a.keywords.is_empty() || !b.keywords.is_empty() {
        terms.keywords = true;
        weight += jaccard(&a.keywords, &b.keywords) * AppliedTerms::KEYWORD_WEIGHT;
    }

    if !a.topics.is_empty() || !b.topics.is_empty() {
        terms.topics = true;
        weight += jaccard(&a.topics, &b.topics) * AppliedTerms::TOPIC_WEIGHT;
    }

    if let (Some(la), Some(lb)) = (a.log_subscribers, b.log_subscribers) {
        terms.subscribers = true;
        weight += subscriber_closeness(la, lb) * AppliedTerms::SUBSCRIBER_WEIGHT;
    }

    if !a.country.is_empty() && !b.country.is_empty() {
        terms.country = true;
        if a.country == b.country {
            weight += AppliedTerms::COUNTRY_WEIGHT;
        }
    }

    if renormalize && terms.any() {
        weight /= terms.weight_sum();
    }

    PairSimilarity {
        weight: weight.clamp(0.0, 1.0),
        terms,
    }
}

#[cfg(test)]
mod tests {
    use creatormap_core::VideoRecord;

    use super::*;

    fn profile(id: &str, keywords: &[&str], topics: &[&str], subs: u64, country: &str) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            subscriber_count: subs,
            country: country.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            topics: topics.iter().map(|t| (*t).to_string()).collect(),
            ..CandidateProfile::default()
        }
    }

    fn similarity(a: &CandidateProfile, b: &CandidateProfile, renormalize: bool) -> PairSimilarity {
        let (na, nb) = (CreatorNode::from_profile(a), CreatorNode::from_profile(b));
        pair_similarity(&NodeSignals::new(&na), &NodeSignals::new(&nb), renormalize)
    }

    #[test]
    fn near_identical_creators_score_close_to_one() {
        let a = profile("a", &["fitness", "vlog"], &["Health"], 100_000, "IN");
        let b = profile("b", &["fitness", "vlog"], &["Health"], 105_000, "IN");
        let sim = similarity(&a, &b, false);
        let expected = 0.4 + 0.3 + 0.1 + 0.2 * (1.0 - (105_001f64.log10() - 100_001f64.log10()) / 105_001f64.log10());
        assert!((sim.weight - expected).abs() < 1e-12, "got {}", sim.weight);
        assert!(sim.weight > 0.99);
        assert!((sim.terms.weight_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unrelated_creators_stay_below_threshold() {
        let a = profile("a", &["fitness"], &["Health"], 500, "IN");
        let b = profile("b", &["finance"], &["Business"], 5_000_000, "US");
        let sim = similarity(&a, &b, false);
        assert!(sim.weight < 0.1, "got {}", sim.weight);
    }

    #[test]
    fn missing_data_lowers_the_ceiling() {
        let a = profile("a", &["fitness"], &[], 0, "");
        let b = profile("b", &["fitness"], &[], 0, "");
        let sim = similarity(&a, &b, false);
        assert!((sim.weight - 0.4).abs() < 1e-12);
        assert!(sim.terms.keywords);
        assert!(!sim.terms.topics && !sim.terms.subscribers && !sim.terms.country);
    }

    #[test]
    fn renormalize_divides_by_applied_weight() {
        let a = profile("a", &["fitness"], &[], 0, "IN");
        let b = profile("b", &["fitness"], &[], 0, "IN");
        assert!((similarity(&a, &b, false).weight - 0.5).abs() < 1e-12);
        assert!((similarity(&a, &b, true).weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_applicable_terms_is_zero_even_renormalized() {
        let a = profile("a", &[], &[], 0, "");
        let b = profile("b", &[], &[], 0, "IN");
        let sim = similarity(&a, &b, true);
        assert_eq!(sim.weight, 0.0);
        assert!(!sim.terms.any());
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = profile("a", &["fitness", "yoga"], &["Health", "Sport"], 12_000, "IN");
        let b = profile("b", &["yoga", "travel"], &["Health"], 800_000, "IN");
        assert_eq!(similarity(&a, &b, false), similarity(&b, &a, false));
    }

    #[test]
    fn graph_keywords_put_explicit_first_and_cap_at_twenty() {
        let mut p = profile("a", &["Zumba", "fitness", "zumba"], &[], 0, "");
        p.description = (0..30).map(|i| format!("word{i:02}")).collect::<Vec<_>>().join(" ");
        let keywords = graph_keywords(&p);
        assert_eq!(keywords.len(), MAX_GRAPH_KEYWORDS);
        assert_eq!(&keywords[..3], &["zumba", "fitness", "word00"]);
        assert_eq!(keywords[19], "word17");
    }

    #[test]
    fn graph_keywords_skip_stop_words_and_short_words() {
        let mut p = profile("a", &[], &[], 0, "");
        p.description = "Where there is yoga, there is calm.".to_string();
        p.recent_videos = vec![VideoRecord {
            title: "Yoga with Mira".to_string(),
            ..VideoRecord::default()
        }];
        assert_eq!(graph_keywords(&p), vec!["calm", "mira", "yoga"]);
    }

    #[test]
    fn engagement_rate_guards_zero_subscribers() {
        let mut p = profile("a", &[], &[], 0, "");
        p.view_count = 1_000;
        assert_eq!(CreatorNode::from_profile(&p).engagement_rate, 0.0);
        p.subscriber_count = 100;
        assert_eq!(CreatorNode::from_profile(&p).engagement_rate, 10.0);
    }
}
