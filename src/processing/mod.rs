//! Joke processing pipeline
//!
//! [`JokePipeline`] chains the stages for one generated response:
//!
//! 1. **Cleaning** strips wrappers, commentary and tracking leaks
//! 2. **Length gates** check character and word counts
//! 3. **Duplicate detection** compares against caller-supplied history
//! 4. **Scoring** computes the relevance score for the category
//!
//! Each stage has an enhanced and a basic implementation selected by
//! [`StageModes`] at construction. The pipeline holds only immutable tables
//! and is safe to share across threads; history is always owned by the caller.

pub mod cleaner;
pub mod duplicate;
pub mod normalizer;
pub mod relevance;
pub mod similarity;
pub mod simplify;
mod types;

pub use cleaner::{BasicCleaner, EnhancedCleaner, ResponseCleaner};
pub use duplicate::{BasicDuplicateDetector, DuplicateDetector, EnhancedDuplicateDetector};
pub use relevance::{BasicScorer, EnhancedScorer, RelevanceScorer};
pub use similarity::SimilarityEngine;
pub use simplify::ComplexityReport;
pub use types::*;

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, DuplicatesConfig, ValidityConfig};
use crate::error::Result;
use crate::patterns::PatternRegistry;

/// Cleaning, duplicate detection and scoring for generated jokes
pub struct JokePipeline {
    patterns: Arc<PatternRegistry>,
    validity: ValidityConfig,
    stages: StageModes,
    cleaner: Box<dyn ResponseCleaner>,
    detector: Box<dyn DuplicateDetector>,
    scorer: Box<dyn RelevanceScorer>,
    conversational: EnhancedScorer,
    similarity: SimilarityEngine,
}

impl JokePipeline {
    /// Build a pipeline from compiled tables and configuration
    pub fn new(patterns: Arc<PatternRegistry>, config: &Config) -> Self {
        let stages = config.pipeline;

        let cleaner: Box<dyn ResponseCleaner> = match stages.cleaning {
            StageMode::Enhanced => Box::new(EnhancedCleaner::new(Arc::clone(&patterns))),
            StageMode::Basic => Box::new(BasicCleaner::new()),
        };
        let detector = Self::build_detector(&patterns, stages.duplicates, &config.duplicates);
        let scorer: Box<dyn RelevanceScorer> = match stages.scoring {
            StageMode::Enhanced => Box::new(EnhancedScorer::new(Arc::clone(&patterns))),
            StageMode::Basic => Box::new(BasicScorer::new(Arc::clone(&patterns))),
        };

        tracing::debug!(
            "Pipeline stages: cleaning={}, duplicates={}, scoring={}",
            cleaner.name(),
            detector.name(),
            scorer.name()
        );

        Self {
            conversational: EnhancedScorer::new(Arc::clone(&patterns)),
            similarity: SimilarityEngine::new(Arc::clone(&patterns)),
            patterns,
            validity: config.validity.clone(),
            stages,
            cleaner,
            detector,
            scorer,
        }
    }

    fn build_detector(
        patterns: &Arc<PatternRegistry>,
        mode: StageMode,
        config: &DuplicatesConfig,
    ) -> Box<dyn DuplicateDetector> {
        match mode {
            StageMode::Enhanced => Box::new(EnhancedDuplicateDetector::new(
                Arc::clone(patterns),
                config.clone(),
            )),
            StageMode::Basic => Box::new(BasicDuplicateDetector::new(config.clone())),
        }
    }

    /// Load pattern tables as configured and build the pipeline
    pub fn from_config(config: &Config) -> Result<Self> {
        let patterns = Arc::new(config.pattern_registry()?);
        Ok(Self::new(patterns, config))
    }

    /// Pipeline with built-in tables and default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn patterns(&self) -> &Arc<PatternRegistry> {
        &self.patterns
    }

    pub fn stages(&self) -> StageModes {
        self.stages
    }

    /// Clean a raw response; `""` means unusable
    pub fn clean(&self, raw: &str) -> String {
        self.cleaner.clean(raw)
    }

    /// `clean` for an absent response
    pub fn clean_opt(&self, raw: Option<&str>) -> String {
        self.clean(raw.unwrap_or_default())
    }

    pub fn is_duplicate(&self, candidate: &str, history: &[String]) -> bool {
        self.detector.is_duplicate(candidate, history)
    }

    pub fn find_duplicate(&self, candidate: &str, history: &[String]) -> Option<DuplicateMatch> {
        self.detector.find_duplicate(candidate, history)
    }

    pub fn score(&self, joke: &str, category: Category) -> RelevanceScore {
        self.scorer.score(joke, category)
    }

    pub fn similarity(&self, a: &str, b: &str) -> SimilarityResult {
        self.similarity.compare(a, b)
    }

    pub fn is_conversational(&self, text: &str) -> bool {
        self.conversational.is_conversational(text)
    }

    pub fn check_complexity(&self, text: &str) -> ComplexityReport {
        simplify::check_complexity(text, &self.patterns)
    }

    pub fn simplify(&self, text: &str) -> String {
        simplify::simplify(text, &self.patterns)
    }

    /// Clean, gate, deduplicate and score one response
    ///
    /// Never fails. An unusable response yields an empty joke that is a
    /// duplicate, scores zero and is invalid.
    pub fn process(&self, raw: &str, category: Category, history: &[String]) -> ProcessResult {
        let started = Instant::now();
        let v = &self.validity;

        let cleaned_joke = self.clean(raw);
        let char_count = cleaned_joke.chars().count();
        let word_count = normalizer::word_count(&cleaned_joke);
        let length_ok = (v.min_chars..=v.max_chars).contains(&char_count);
        let word_count_ok = (v.min_words..=v.max_words).contains(&word_count);

        let duplicate_match = self.find_duplicate(&cleaned_joke, history);
        let is_duplicate = duplicate_match.is_some();

        let relevance_score = if cleaned_joke.is_empty() {
            RelevanceScore::zero()
        } else {
            self.score(&cleaned_joke, category)
        };
        let breakdown = &relevance_score.breakdown;
        let meets_score_threshold = relevance_score.total >= v.min_total_score;
        let meets_cultural_threshold = breakdown.cultural_references >= v.min_cultural_score;
        let meets_humor_threshold = breakdown.humor >= v.min_humor_score;

        let is_valid = length_ok
            && word_count_ok
            && !is_duplicate
            && (meets_score_threshold || meets_cultural_threshold || meets_humor_threshold);

        tracing::debug!(
            "Processed {} joke: valid={} duplicate={} score={} chars={} words={}",
            category,
            is_valid,
            is_duplicate,
            relevance_score.total,
            char_count,
            word_count
        );

        ProcessResult {
            cleaned_joke,
            is_duplicate,
            is_valid,
            relevance_score,
            metadata: ProcessMetadata {
                category,
                char_count,
                word_count,
                length_ok,
                word_count_ok,
                meets_score_threshold,
                meets_cultural_threshold,
                meets_humor_threshold,
                duplicate_match,
                history_size: history.len(),
                stages: self.stages,
                processed_at: chrono::Utc::now(),
                processing_time_us: started.elapsed().as_micros() as u64,
            },
        }
    }

    /// `process` for an absent response
    pub fn process_opt(
        &self,
        raw: Option<&str>,
        category: Category,
        history: &[String],
    ) -> ProcessResult {
        self.process(raw.unwrap_or_default(), category, history)
    }

    /// `process` with a free-form category name; unknown names fall back to family
    pub fn process_with_category(
        &self,
        raw: &str,
        category: &str,
        history: &[String],
    ) -> ProcessResult {
        self.process(raw, Category::parse_lossy(category), history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRICKET: &str = "Why did the cricket player go to the bank? To get his balance!";

    fn pipeline() -> JokePipeline {
        JokePipeline::with_defaults().unwrap()
    }

    #[test]
    fn test_empty_input() {
        let result = pipeline().process("", Category::Family, &[]);
        assert_eq!(result.cleaned_joke, "");
        assert!(result.is_duplicate);
        assert!(!result.is_valid);
        assert_eq!(result.relevance_score.total, 0);
        assert_eq!(
            result.metadata.duplicate_match.map(|m| m.rule),
            Some(DuplicateRule::Unusable)
        );
    }

    #[test]
    fn test_absent_input_matches_empty() {
        let p = pipeline();
        let result = p.process_opt(None, Category::Adult, &[]);
        assert_eq!(result.cleaned_joke, "");
        assert!(!result.is_valid);
        assert_eq!(p.clean_opt(None), "");
    }

    #[test]
    fn test_valid_joke_accepted() {
        let raw = "Here's a joke: Why did the cricket player go to the bank? To get his balance! 😂";
        let result = pipeline().process(raw, Category::Family, &[]);
        assert_eq!(result.cleaned_joke, CRICKET);
        assert!(result.metadata.length_ok);
        assert!(result.metadata.word_count_ok);
        assert!(!result.is_duplicate);
        assert!(result.is_valid);
        assert_eq!(result.metadata.history_size, 0);
    }

    #[test]
    fn test_duplicate_rejected() {
        let history = vec![CRICKET.to_string()];
        let result = pipeline().process(CRICKET, Category::Family, &history);
        assert!(result.is_duplicate);
        assert!(!result.is_valid);
        let found = result.metadata.duplicate_match.unwrap();
        assert_eq!(found.rule, DuplicateRule::ExactMatch);
        assert_eq!(found.history_index, Some(0));
    }

    #[test]
    fn test_history_not_mutated() {
        let history = vec![CRICKET.to_string()];
        let before = history.clone();
        pipeline().process("What do you call a lazy kangaroo? A pouch potato!", Category::Family, &history);
        assert_eq!(history, before);
    }

    #[test]
    fn test_too_many_words_invalid() {
        let long = "Why did the uncle ".to_string() + &"keep talking ".repeat(30) + "at the wedding?";
        let result = pipeline().process(&long, Category::Family, &[]);
        assert!(!result.metadata.word_count_ok);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let result = pipeline().process_with_category(CRICKET, "toddlers", &[]);
        assert_eq!(result.metadata.category, Category::Family);
    }

    #[test]
    fn test_basic_stages_selected() {
        let mut config = Config::default();
        config.pipeline = StageModes {
            cleaning: StageMode::Basic,
            duplicates: StageMode::Basic,
            scoring: StageMode::Basic,
        };
        let p = JokePipeline::from_config(&config).unwrap();
        assert_eq!(p.stages(), config.pipeline);

        // The basic cleaner leaves prefixes alone
        assert_eq!(
            p.clean("Here's a joke: Why did the chai go cold?"),
            "Here's a joke: Why did the chai go cold?"
        );
        let result = p.process(CRICKET, Category::Family, &[]);
        assert_eq!(result.metadata.stages.scoring, StageMode::Basic);
        assert_eq!(result.relevance_score.breakdown.language_patterns, 0);
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JokePipeline>();
    }
}
