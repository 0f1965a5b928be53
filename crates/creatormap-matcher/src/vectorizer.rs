//! Two-document TF-IDF cosine similarity.
//!
//! The vocabulary is fitted on exactly the two documents being compared and
//! discarded afterwards, so the result depends only on the inputs.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use creatormap_core::text::is_stop_word;
use creatormap_core::{Degradation, Outcome};
use regex::Regex;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Vocabulary limits for the vectorizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorizerConfig {
    /// Keep at most this many terms, by total count across both documents.
    pub max_features: usize,
    /// Drop terms found in fewer documents than this.
    pub min_df: usize,
    /// Drop terms found in more than `ceil(max_df_ratio * n_docs)` documents.
    pub max_df_ratio: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            min_df: 1,
            max_df_ratio: 0.95,
        }
    }
}

/// Unigrams and bigrams of a document after lower-casing and stop-word removal.
fn analyze(doc: &str) -> Vec<String> {
    let lowered = doc.to_lowercase();
    let words: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !is_stop_word(w))
        .collect();

    let mut terms: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    terms.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

fn term_counts(terms: Vec<String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity of two documents under default settings, in `[0, 1]`.
#[must_use]
pub fn similarity(doc_a: &str, doc_b: &str) -> f64 {
    similarity_with_outcome(doc_a, doc_b, &VectorizerConfig::default()).0
}

/// Cosine similarity plus a record of why it fell back to zero, if it did.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity_with_outcome(
    doc_a: &str,
    doc_b: &str,
    config: &VectorizerConfig,
) -> (f64, Outcome) {
    let terms_a = analyze(doc_a);
    let terms_b = analyze(doc_b);
    if terms_a.is_empty() || terms_b.is_empty() {
        return (0.0, Outcome::degraded(Degradation::EmptyText));
    }

    let docs = [term_counts(terms_a), term_counts(terms_b)];
    let n_docs = docs.len();

    // term -> (document frequency, total count)
    let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for doc in &docs {
        for (term, &count) in doc {
            let entry = stats.entry(term.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += count;
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_doc_count = (config.max_df_ratio * n_docs as f64).ceil() as usize;

    let mut vocabulary: Vec<(&str, usize, usize)> = stats
        .into_iter()
        .filter(|(_, (df, _))| *df >= config.min_df && *df <= max_doc_count)
        .map(|(term, (df, total))| (term, df, total))
        .collect();

    if vocabulary.len() > config.max_features {
        vocabulary.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
        vocabulary.truncate(config.max_features);
    }

    if vocabulary.is_empty() {
        return (0.0, Outcome::degraded(Degradation::EmptyVocabulary));
    }

    let n = n_docs as f64;
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (term, df, _) in &vocabulary {
        let idf = ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0;
        let wa = docs[0].get(*term).copied().unwrap_or(0) as f64 * idf;
        let wb = docs[1].get(*term).copied().unwrap_or(0) as f64 * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return (0.0, Outcome::degraded(Degradation::EmptyVocabulary));
    }

    let cosine = dot / (norm_a.sqrt() * norm_b.sqrt());
    (cosine.clamp(0.0, 1.0), Outcome::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_documents_score_one() {
        let s = similarity("home workout routine", "home workout routine");
        assert!((s - 1.0).abs() < 1e-9, "expected 1.0, got {s}");
    }

    #[test]
    fn disjoint_documents_score_zero() {
        let (s, outcome) = similarity_with_outcome(
            "guitar lessons",
            "protein recipes",
            &VectorizerConfig::default(),
        );
        assert_eq!(s, 0.0);
        assert!(outcome.is_ok(), "disjoint docs are a real zero, got {outcome:?}");
    }

    #[test]
    fn partial_overlap_is_between_zero_and_one() {
        let s = similarity(
            "daily fitness vlog with home workout tips",
            "fitness workout",
        );
        assert!(s > 0.0 && s < 1.0, "expected (0, 1), got {s}");
    }

    #[test]
    fn empty_document_degrades() {
        let (s, outcome) = similarity_with_outcome("", "fitness", &VectorizerConfig::default());
        assert_eq!(s, 0.0);
        assert_eq!(outcome.reason(), Some(&Degradation::EmptyText));
    }

    #[test]
    fn stop_words_only_document_degrades() {
        let (s, outcome) =
            similarity_with_outcome("the and of it", "fitness", &VectorizerConfig::default());
        assert_eq!(s, 0.0);
        assert_eq!(outcome.reason(), Some(&Degradation::EmptyText));
    }

    #[test]
    fn strict_max_df_prunes_shared_terms() {
        let config = VectorizerConfig {
            max_df_ratio: 0.5,
            ..VectorizerConfig::default()
        };
        let (s, outcome) = similarity_with_outcome("fitness", "fitness", &config);
        assert_eq!(s, 0.0);
        assert_eq!(outcome.reason(), Some(&Degradation::EmptyVocabulary));
    }

    #[test]
    fn bigrams_reward_word_order() {
        let ordered = similarity("home workout plan", "home workout");
        let shuffled = similarity("workout home plan", "home workout");
        assert!(ordered > shuffled, "{ordered} should exceed {shuffled}");
    }

    #[test]
    fn result_does_not_depend_on_call_order() {
        let first = similarity("yoga for beginners", "beginner yoga flow");
        let _ = similarity("completely unrelated text about cars", "cars");
        let again = similarity("yoga for beginners", "beginner yoga flow");
        assert_eq!(first.to_bits(), again.to_bits());
    }

    #[test]
    fn feature_cap_limits_vocabulary() {
        let config = VectorizerConfig {
            max_features: 1,
            ..VectorizerConfig::default()
        };
        // "fitness" has the highest total count and is shared, so the capped
        // vocabulary still finds the overlap.
        let (s, _) = similarity_with_outcome("fitness fitness yoga", "fitness cars", &config);
        assert!((s - 1.0).abs() < 1e-9, "expected 1.0, got {s}");
    }
}
