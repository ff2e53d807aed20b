// Duplicate detection against previously accepted jokes
use std::sync::Arc;

use crate::config::DuplicatesConfig;
use crate::patterns::PatternRegistry;
use crate::processing::normalizer::normalize;
use crate::processing::similarity::{SimilarityEngine, TextProfile};
use crate::processing::types::{DuplicateMatch, DuplicateRule, SimilarityResult};

/// Classifies a candidate joke as a duplicate of any history entry
///
/// History is treated as a set; its order has no effect on the outcome.
pub trait DuplicateDetector: Send + Sync {
    /// The first rule that fired, or `None` for a fresh joke
    fn find_duplicate(&self, candidate: &str, history: &[String]) -> Option<DuplicateMatch>;

    fn is_duplicate(&self, candidate: &str, history: &[String]) -> bool {
        self.find_duplicate(candidate, history).is_some()
    }

    fn name(&self) -> &'static str;
}

/// Candidates shorter than the configured minimum are never usable
fn is_unusable(candidate: &str, config: &DuplicatesConfig) -> bool {
    candidate.trim().chars().count() < config.min_candidate_chars
}

/// Multi-heuristic detector: exact, cultural, entity, edit distance,
/// structural pattern and word overlap rules
pub struct EnhancedDuplicateDetector {
    engine: SimilarityEngine,
    config: DuplicatesConfig,
}

impl EnhancedDuplicateDetector {
    pub fn new(patterns: Arc<PatternRegistry>, config: DuplicatesConfig) -> Self {
        Self {
            engine: SimilarityEngine::new(patterns),
            config,
        }
    }

    /// Apply rules 3-7 to one candidate/entry pair
    fn match_rule(
        &self,
        candidate: &TextProfile,
        entry: &TextProfile,
        similarity: &SimilarityResult,
    ) -> Option<DuplicateRule> {
        let cfg = &self.config;

        if candidate.normalized == entry.normalized {
            return Some(DuplicateRule::ExactMatch);
        }

        if !candidate.cultural_terms.is_empty() && !entry.cultural_terms.is_empty() {
            if similarity.cultural_similarity > cfg.cultural_overlap
                && similarity.jaccard > cfg.cultural_jaccard
            {
                return Some(DuplicateRule::CulturalOverlap);
            }
            if self.engine.shares_entity(candidate, entry) && similarity.jaccard > cfg.entity_jaccard
            {
                return Some(DuplicateRule::SharedEntity);
            }
        }

        if similarity.edit_similarity > cfg.edit_similarity {
            return Some(DuplicateRule::EditDistance);
        }

        if similarity.structural_match && similarity.jaccard > cfg.structural_jaccard {
            return Some(DuplicateRule::StructuralPattern);
        }

        if similarity.jaccard > cfg.jaccard {
            return Some(DuplicateRule::WordOverlap);
        }

        None
    }
}

impl DuplicateDetector for EnhancedDuplicateDetector {
    fn find_duplicate(&self, candidate: &str, history: &[String]) -> Option<DuplicateMatch> {
        if is_unusable(candidate, &self.config) {
            tracing::debug!("Candidate too short to use: {:?}", candidate);
            return Some(DuplicateMatch::unusable());
        }
        if history.is_empty() {
            return None;
        }

        let candidate_profile = self.engine.profile(candidate);

        for (index, entry) in history.iter().enumerate() {
            let entry_profile = self.engine.profile(entry);
            let similarity = self
                .engine
                .compare_profiles(&candidate_profile, &entry_profile);

            if let Some(rule) = self.match_rule(&candidate_profile, &entry_profile, &similarity) {
                tracing::debug!(
                    "Duplicate via {:?} against history[{}] (jaccard {:.2}, cultural {:.2}, edit {:.2})",
                    rule,
                    index,
                    similarity.jaccard,
                    similarity.cultural_similarity,
                    similarity.edit_similarity
                );
                return Some(DuplicateMatch {
                    rule,
                    history_index: Some(index),
                    similarity: Some(similarity),
                });
            }
        }

        None
    }

    fn name(&self) -> &'static str {
        "enhanced"
    }
}

/// Exact-match detector over normalized text
pub struct BasicDuplicateDetector {
    config: DuplicatesConfig,
}

impl BasicDuplicateDetector {
    pub fn new(config: DuplicatesConfig) -> Self {
        Self { config }
    }
}

impl DuplicateDetector for BasicDuplicateDetector {
    fn find_duplicate(&self, candidate: &str, history: &[String]) -> Option<DuplicateMatch> {
        if is_unusable(candidate, &self.config) {
            return Some(DuplicateMatch::unusable());
        }

        let normalized = normalize(candidate);
        history
            .iter()
            .position(|entry| normalize(entry) == normalized)
            .map(|index| DuplicateMatch {
                rule: DuplicateRule::ExactMatch,
                history_index: Some(index),
                similarity: None,
            })
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
