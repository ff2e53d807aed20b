//! Multi-factor relevance scoring
//!
//! A joke earns points in five capped categories: cultural references,
//! language patterns, category fit, simplicity and humor structure. The
//! subscores sum to a total in `[0, 100]` which maps onto a letter grade.

use std::sync::Arc;

use crate::patterns::PatternRegistry;
use crate::processing::normalizer::{normalize, padded, word_count};
use crate::processing::simplify::check_complexity;
use crate::processing::types::{Category, RelevanceScore, ScoreBreakdown};

/// Points per category cultural element, on top of tier weights
const CATEGORY_ELEMENT_POINTS: u32 = 2;

const DIALECT_POINTS: u32 = 3;
const DIALECT_CAP: u32 = 12;
const CONVERSATIONAL_POINTS: u32 = 2;
const CONVERSATIONAL_CAP: u32 = 8;

const CATEGORY_BASE: u32 = 15;
const EXCELLENCE_POINTS: u32 = 2;
const EXCELLENCE_CAP: u32 = 5;

const SIMPLE_BASE: u32 = 12;
const VERY_SIMPLE_BONUS: u32 = 3;
const COMPLEX_WORD_PENALTY: u32 = 2;

const WORDPLAY_POINTS: u32 = 2;
const OPTIMAL_LENGTH_POINTS: u32 = 2;
const ACCEPTABLE_LENGTH_POINTS: u32 = 1;
const SURPRISE_POINTS: u32 = 1;

/// Texts shorter than this are conversational by default
const SHORT_TEXT_CHARS: usize = 100;

/// Scores a cleaned joke for a category
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, joke: &str, category: Category) -> RelevanceScore;

    fn name(&self) -> &'static str;
}

/// Sum of tier weights of the cultural terms present
fn tier_points(patterns: &PatternRegistry, padded_text: &str) -> u32 {
    patterns
        .cultural_terms
        .matches(padded_text)
        .iter()
        .map(|t| t.weight)
        .sum()
}

/// Points for word count: optimal band first, then the acceptable band
fn length_points(words: usize) -> u32 {
    match words {
        10..=25 => OPTIMAL_LENGTH_POINTS,
        8..=35 => ACCEPTABLE_LENGTH_POINTS,
        _ => 0,
    }
}

/// Full five-factor scorer
pub struct EnhancedScorer {
    patterns: Arc<PatternRegistry>,
}

impl EnhancedScorer {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }

    pub fn cultural_references(&self, padded_text: &str, category: Category) -> u32 {
        let elements = self
            .patterns
            .category_terms(category)
            .cultural_elements
            .matches(padded_text)
            .len() as u32;
        tier_points(&self.patterns, padded_text) + elements * CATEGORY_ELEMENT_POINTS
    }

    /// Dialect indicators on the raw text; immediate word repetition counts as one
    fn dialect_indicators(&self, text: &str, normalized: &str) -> u32 {
        let matched = self
            .patterns
            .dialect_patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .count() as u32;
        matched + u32::from(has_word_repetition(normalized))
    }

    fn conversational_indicators(&self, text: &str, padded_text: &str) -> u32 {
        let colloquial = self.patterns.colloquial.matches(padded_text).len() as u32;
        let patterns = self
            .patterns
            .conversational_patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .count() as u32;
        colloquial + patterns
    }

    pub fn language_patterns(&self, text: &str) -> u32 {
        let normalized = normalize(text);
        let padded_text = padded(&normalized);
        let dialect = (self.dialect_indicators(text, &normalized) * DIALECT_POINTS).min(DIALECT_CAP);
        let conversational = (self.conversational_indicators(text, &padded_text)
            * CONVERSATIONAL_POINTS)
            .min(CONVERSATIONAL_CAP);
        dialect + conversational
    }

    pub fn category_fit(&self, padded_text: &str, category: Category) -> u32 {
        let terms = self.patterns.category_terms(category);
        let base = if terms.cultural_elements.matches(padded_text).is_empty() {
            0
        } else {
            CATEGORY_BASE
        };
        let excellence = (terms.excellence_terms.matches(padded_text).len() as u32
            * EXCELLENCE_POINTS)
            .min(EXCELLENCE_CAP);
        base + excellence
    }

    pub fn simplicity(&self, text: &str) -> u32 {
        let report = check_complexity(text, &self.patterns);
        if report.is_simple {
            if report.score < 0.1 {
                SIMPLE_BASE + VERY_SIMPLE_BONUS
            } else {
                SIMPLE_BASE
            }
        } else {
            SIMPLE_BASE.saturating_sub(COMPLEX_WORD_PENALTY * report.complex_words.len() as u32)
        }
    }

    pub fn humor(&self, text: &str, padded_text: &str) -> u32 {
        let mut points = self.patterns.humor_structure_points(text);
        if !self.patterns.wordplay_indicators.matches(padded_text).is_empty() {
            points += WORDPLAY_POINTS;
        }
        points += length_points(word_count(text));
        if !self.patterns.surprise_words.matches(padded_text).is_empty() {
            points += SURPRISE_POINTS;
        }
        points
    }

    /// True for short texts and for texts with any colloquial or dialect marker
    pub fn is_conversational(&self, text: &str) -> bool {
        if text.chars().count() < SHORT_TEXT_CHARS {
            return true;
        }
        let normalized = normalize(text);
        let padded_text = padded(&normalized);
        self.conversational_indicators(text, &padded_text) > 0
            || self.dialect_indicators(text, &normalized) > 0
    }
}

impl RelevanceScorer for EnhancedScorer {
    fn score(&self, joke: &str, category: Category) -> RelevanceScore {
        let normalized = normalize(joke);
        if normalized.is_empty() {
            return RelevanceScore::zero();
        }
        let padded_text = padded(&normalized);

        let score = RelevanceScore::from_breakdown(ScoreBreakdown {
            cultural_references: self.cultural_references(&padded_text, category),
            language_patterns: self.language_patterns(joke),
            category_fit: self.category_fit(&padded_text, category),
            simplicity: self.simplicity(joke),
            humor: self.humor(joke, &padded_text),
        });

        tracing::debug!(
            "Scored {} joke: {} ({}) {:?}",
            category,
            score.total,
            score.grade,
            score.breakdown
        );
        score
    }

    fn name(&self) -> &'static str {
        "enhanced"
    }
}

/// Reduced scorer: tier weights, category presence, simplicity and length
pub struct BasicScorer {
    patterns: Arc<PatternRegistry>,
}

impl BasicScorer {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }
}

impl RelevanceScorer for BasicScorer {
    fn score(&self, joke: &str, category: Category) -> RelevanceScore {
        let normalized = normalize(joke);
        if normalized.is_empty() {
            return RelevanceScore::zero();
        }
        let padded_text = padded(&normalized);

        let has_element = !self
            .patterns
            .category_terms(category)
            .cultural_elements
            .matches(&padded_text)
            .is_empty();
        let simplicity = if check_complexity(joke, &self.patterns).is_simple {
            SIMPLE_BASE
        } else {
            0
        };

        RelevanceScore::from_breakdown(ScoreBreakdown {
            cultural_references: tier_points(&self.patterns, &padded_text),
            language_patterns: 0,
            category_fit: if has_element { CATEGORY_BASE } else { 0 },
            simplicity,
            humor: length_points(word_count(joke)),
        })
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

/// Same word twice in a row ("very very", "knock knock")
fn has_word_repetition(normalized: &str) -> bool {
    let words: Vec<&str> = normalized.split(' ').collect();
    words
        .windows(2)
        .any(|pair| pair[0] == pair[1] && pair[0].chars().count() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::types::{
        Grade, MAX_CATEGORY_FIT, MAX_CULTURAL, MAX_HUMOR, MAX_LANGUAGE, MAX_SIMPLICITY,
    };

    const RICH_FAMILY: &str = "Why did Pappu bring chai, samosa and jalebi to the Diwali cricket match, yaar? Because his mummy said only winners get sweets!";

    fn scorer() -> EnhancedScorer {
        EnhancedScorer::new(Arc::new(PatternRegistry::builtin().unwrap()))
    }

    #[test]
    fn test_rich_family_joke_scores_well() {
        let score = scorer().score(RICH_FAMILY, Category::Family);
        assert!(score.total > 50, "{:?}", score);
        assert!(score.grade >= Grade::Good, "{:?}", score);
        // chai, samosa, jalebi, diwali, cricket (3 each) + mummy (2)
        // + 4 family elements (2 each)
        assert_eq!(score.breakdown.cultural_references, 25);
        assert_eq!(score.breakdown.simplicity, MAX_SIMPLICITY);
        assert_eq!(score.breakdown.humor, MAX_HUMOR);
        assert_eq!(score.total, 80);
        assert_eq!(score.grade, Grade::VeryGood);
    }

    #[test]
    fn test_category_changes_fit() {
        let s = scorer();
        let office = "My boss said the salary hike will come after the appraisal meeting, yaar.";
        let adult = s.score(office, Category::Adult);
        let family = s.score(office, Category::Family);
        assert!(adult.breakdown.category_fit >= CATEGORY_BASE);
        assert_eq!(family.breakdown.category_fit, 0);
        assert!(adult.total > family.total);
    }

    #[test]
    fn test_empty_scores_zero() {
        let s = scorer();
        assert_eq!(s.score("", Category::Family), RelevanceScore::zero());
        assert_eq!(s.score("?!", Category::Adult).total, 0);
        assert_eq!(RelevanceScore::zero().grade, Grade::VeryPoor);
    }

    #[test]
    fn test_scores_are_bounded() {
        let s = scorer();
        let inputs = [
            RICH_FAMILY,
            "chai chai chai samosa samosa diwali holi cricket bollywood biryani jugaad masala desi mehndi sangeet baraat shaadi dosa tiffin jalebi yaar arre bhai achha kya only itself! kindly do one thing, prepone na?",
            "The committee approved it.",
            "Knock knock! Who's there? Boss. Boss who? Boss, the salary is late, yaar!",
        ];
        for input in inputs {
            for category in [Category::Family, Category::Adult] {
                let score = s.score(input, category);
                let b = score.breakdown;
                assert!(score.total <= 100);
                assert!(b.cultural_references <= MAX_CULTURAL);
                assert!(b.language_patterns <= MAX_LANGUAGE);
                assert!(b.category_fit <= MAX_CATEGORY_FIT);
                assert!(b.simplicity <= MAX_SIMPLICITY);
                assert!(b.humor <= MAX_HUMOR);
                assert_eq!(score.total, b.total());
                assert_eq!(score.grade, Grade::from_total(score.total));
            }
        }
    }

    #[test]
    fn test_complex_vocabulary_reduces_simplicity() {
        let s = scorer();
        assert_eq!(
            s.simplicity("Consequently the sophisticated methodology facilitated nothing."),
            6
        );
        assert_eq!(s.simplicity("Papa likes chai."), MAX_SIMPLICITY);
    }

    #[test]
    fn test_word_repetition_counts_as_dialect() {
        assert!(has_word_repetition("very very good"));
        assert!(!has_word_repetition("a a b"));
        assert!(!has_word_repetition("no repeats here"));
    }

    #[test]
    fn test_is_conversational() {
        let s = scorer();
        assert!(s.is_conversational("Short and sweet."));
        let formal = "The quarterly committee reviewed the proposal thoroughly and subsequently approved the budget allocation for the department.";
        assert!(formal.len() >= 100);
        assert!(!s.is_conversational(formal));
        let casual = format!("{} Yaar, what to do.", formal);
        assert!(s.is_conversational(&casual));
    }

    #[test]
    fn test_short_non_ascii_text_is_conversational() {
        let hindi = "मेरे पड़ोसी के घर में हर शाम बहुत सारे मेहमान आते हैं।";
        assert!(hindi.len() >= SHORT_TEXT_CHARS);
        assert!(hindi.chars().count() < SHORT_TEXT_CHARS);
        assert!(scorer().is_conversational(hindi));
    }

    #[test]
    fn test_basic_scorer() {
        let s = BasicScorer::new(Arc::new(PatternRegistry::builtin().unwrap()));
        let score = s.score(RICH_FAMILY, Category::Family);
        assert_eq!(score.breakdown.language_patterns, 0);
        assert_eq!(score.breakdown.cultural_references, 17);
        assert_eq!(score.breakdown.category_fit, CATEGORY_BASE);
        assert_eq!(s.score("", Category::Family).total, 0);
        assert_eq!(s.name(), "basic");
    }
}
