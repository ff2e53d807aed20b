//! Pairwise similarity measures between jokes
//!
//! All measures operate on normalized text and return values in `[0, 1]`:
//! word-set Jaccard, weighted cultural-term overlap and edit-distance ratio.
//! [`SimilarityEngine`] bundles them with the structural pattern table and
//! caches per-text work in a [`TextProfile`] so a candidate is analysed once
//! per history scan.

use ahash::AHashSet;
use std::sync::Arc;

use crate::patterns::{PatternRegistry, TermSet};
use crate::processing::normalizer::{normalize, padded};
use crate::processing::types::SimilarityResult;

/// Tokens shorter than this are ignored by word-overlap measures
pub const MIN_TOKEN_LEN: usize = 3;

/// Classic dynamic-programming edit distance over characters
///
/// Insert, delete and substitute all cost 1. Uses two rows sized by the
/// shorter input.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

fn word_set(normalized: &str) -> AHashSet<&str> {
    normalized
        .split(' ')
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

fn set_jaccard(a: &AHashSet<&str>, b: &AHashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Word-set Jaccard similarity; 0 when both sides have no usable tokens
pub fn jaccard(a: &str, b: &str) -> f64 {
    let (na, nb) = (normalize(a), normalize(b));
    set_jaccard(&word_set(&na), &word_set(&nb))
}

/// Weighted Jaccard over the cultural terms each text contains
///
/// Returns 0 when either text contains no term from `terms`.
pub fn cultural_overlap(a: &str, b: &str, terms: &TermSet) -> f64 {
    let matched_a = matched_terms(&padded(&normalize(a)), terms);
    let matched_b = matched_terms(&padded(&normalize(b)), terms);
    weighted_overlap(&matched_a, &matched_b, terms)
}

fn matched_terms(padded_text: &str, terms: &TermSet) -> AHashSet<String> {
    terms
        .matches(padded_text)
        .into_iter()
        .map(|t| t.term.clone())
        .collect()
}

fn weighted_overlap(a: &AHashSet<String>, b: &AHashSet<String>, terms: &TermSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let weight = |t: &String| terms.weight_of(t).max(1) as f64;
    let shared: f64 = a.intersection(b).map(weight).sum();
    let total: f64 = a.union(b).map(weight).sum();
    if total == 0.0 {
        0.0
    } else {
        shared / total
    }
}

fn edit_ratio(na: &str, nb: &str) -> f64 {
    let max_len = na.chars().count().max(nb.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(na, nb) as f64 / max_len as f64
}

/// `1 - levenshtein / max_len` over normalized text; 1 when both are empty
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    edit_ratio(&normalize(a), &normalize(b))
}

/// Precomputed view of one text
#[derive(Debug, Clone)]
pub struct TextProfile {
    pub normalized: String,
    pub cultural_terms: AHashSet<String>,
    pub entities: AHashSet<String>,
    pub structures: Vec<String>,
}

impl TextProfile {
    pub fn words(&self) -> AHashSet<&str> {
        word_set(&self.normalized)
    }
}

/// Similarity measures bound to a pattern registry
pub struct SimilarityEngine {
    patterns: Arc<PatternRegistry>,
}

impl SimilarityEngine {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }

    /// Analyse a text once for repeated comparisons
    pub fn profile(&self, text: &str) -> TextProfile {
        let normalized = normalize(text);
        let padded_text = padded(&normalized);
        TextProfile {
            cultural_terms: matched_terms(&padded_text, &self.patterns.similarity_terms),
            entities: matched_terms(&padded_text, &self.patterns.specific_entities),
            structures: self
                .patterns
                .structural_matches(&normalized)
                .into_iter()
                .map(str::to_string)
                .collect(),
            normalized,
        }
    }

    pub fn jaccard(&self, a: &TextProfile, b: &TextProfile) -> f64 {
        set_jaccard(&a.words(), &b.words())
    }

    pub fn cultural_similarity(&self, a: &TextProfile, b: &TextProfile) -> f64 {
        weighted_overlap(
            &a.cultural_terms,
            &b.cultural_terms,
            &self.patterns.similarity_terms,
        )
    }

    pub fn edit_similarity(&self, a: &TextProfile, b: &TextProfile) -> f64 {
        edit_ratio(&a.normalized, &b.normalized)
    }

    /// True when both texts match the same structural joke pattern
    pub fn structural_match(&self, a: &TextProfile, b: &TextProfile) -> bool {
        a.structures.iter().any(|s| b.structures.contains(s))
    }

    pub fn shares_entity(&self, a: &TextProfile, b: &TextProfile) -> bool {
        !a.entities.is_disjoint(&b.entities)
    }

    /// All measures between two profiles
    pub fn compare_profiles(&self, a: &TextProfile, b: &TextProfile) -> SimilarityResult {
        SimilarityResult {
            jaccard: self.jaccard(a, b),
            cultural_similarity: self.cultural_similarity(a, b),
            edit_similarity: self.edit_similarity(a, b),
            structural_match: self.structural_match(a, b),
        }
    }

    /// All measures between two raw texts
    pub fn compare(&self, a: &str, b: &str) -> SimilarityResult {
        self.compare_profiles(&self.profile(a), &self.profile(b))
    }
}
