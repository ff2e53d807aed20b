//! Pattern registry for configuration-driven cleaning, matching and scoring
//!
//! This module provides:
//! - Cleaning patterns (prefixes, wrappers, list markers, commentary, tracking leaks)
//! - Cultural vocabulary tiers, specific entities and per-category term lists
//! - Structural patterns for humor scoring, dialect detection and duplicate matching
//!
//! Every table is plain data (serde + TOML) with built-in defaults, compiled once
//! into a [`PatternRegistry`] that the processing stages share read-only.

mod defaults;

use crate::error::{PunchlineError, Result};
use crate::processing::normalizer::{contains_term, normalize};
use crate::processing::Category;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pattern with a replacement, applied in priority order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationPattern {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub priority: u8,
}

/// Pattern contributing a weight when it matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedPattern {
    pub name: String,
    pub pattern: String,
    pub weight: u32,
}

/// Pattern used as a yes/no indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

/// Cleaning tables, one per cleaner step that strips text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub prefixes: Vec<NormalizationPattern>,
    pub wrappers: Vec<NormalizationPattern>,
    pub list_markers: Vec<NormalizationPattern>,
    pub trailing_commentary: Vec<NormalizationPattern>,
    pub tracking_tokens: Vec<NormalizationPattern>,
    pub residual_asides: Vec<NormalizationPattern>,
}

/// Cultural terms grouped by value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalTiers {
    pub high_weight: u32,
    pub medium_weight: u32,
    pub basic_weight: u32,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub basic: Vec<String>,
}

/// Terms specific to one audience category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub cultural_elements: Vec<String>,
    pub excellence_terms: Vec<String>,
}

/// Complex word with its plain-language replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexTerm {
    pub term: String,
    pub simple: String,
}

/// Vocabulary file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub cultural: CulturalTiers,
    /// Proper nouns (people, cities, landmarks); a shared one is a strong duplicate signal
    pub specific_entities: Vec<String>,
    pub family: CategoryVocabulary,
    pub adult: CategoryVocabulary,
    pub colloquial: Vec<String>,
    pub wordplay_indicators: Vec<String>,
    pub surprise_words: Vec<String>,
    pub complex_terms: Vec<ComplexTerm>,
}

/// Structure file: regex tables for humor, dialect and duplicate matching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuresConfig {
    pub humor_patterns: Vec<WeightedPattern>,
    pub dialect_patterns: Vec<NamedPattern>,
    pub conversational_patterns: Vec<NamedPattern>,
    /// Applied to normalized text (lowercase, no punctuation)
    pub duplicate_patterns: Vec<NamedPattern>,
}

/// Compiled normalization pattern
#[derive(Debug, Clone)]
pub struct CompiledNormalizationPattern {
    pub name: String,
    pub regex: Regex,
    pub replacement: String,
    pub priority: u8,
}

/// Compiled weighted pattern for scoring
#[derive(Debug, Clone)]
pub struct CompiledWeightedPattern {
    pub name: String,
    pub regex: Regex,
    pub weight: u32,
}

/// Compiled indicator pattern
#[derive(Debug, Clone)]
pub struct CompiledNamedPattern {
    pub name: String,
    pub regex: Regex,
}

/// Compiled complex term with a whole-word, case-insensitive matcher
#[derive(Debug, Clone)]
pub struct CompiledComplexTerm {
    pub term: String,
    pub regex: Regex,
    pub simple: String,
}

/// A normalized term and its weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: u32,
}

/// Set of normalized terms (single words or phrases) with weights
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<WeightedTerm>,
}

impl TermSet {
    /// Build from raw terms; terms are normalized and duplicates keep the highest weight
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for (term, weight) in terms {
            set.insert(term.as_ref(), weight);
        }
        set
    }

    /// Build with a uniform weight of 1
    pub fn uniform<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(terms.into_iter().map(|t| (t, 1)))
    }

    fn insert(&mut self, raw: &str, weight: u32) {
        let term = normalize(raw);
        if term.is_empty() {
            return;
        }
        match self.terms.iter_mut().find(|t| t.term == term) {
            Some(existing) => existing.weight = existing.weight.max(weight),
            None => self.terms.push(WeightedTerm { term, weight }),
        }
    }

    /// Terms present in `padded_text` (normalized text wrapped in single spaces)
    pub fn matches<'a>(&'a self, padded_text: &str) -> Vec<&'a WeightedTerm> {
        self.terms
            .iter()
            .filter(|t| contains_term(padded_text, &t.term))
            .collect()
    }

    pub fn weight_of(&self, term: &str) -> u32 {
        self.terms
            .iter()
            .find(|t| t.term == term)
            .map(|t| t.weight)
            .unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.term == term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedTerm> {
        self.terms.iter()
    }
}

/// Compiled per-category term sets
#[derive(Debug, Clone, Default)]
pub struct CategoryTerms {
    pub cultural_elements: TermSet,
    pub excellence_terms: TermSet,
}

/// Pattern registry with all pre-compiled patterns and term sets
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    /// Cleaner step 1
    pub prefixes: Vec<CompiledNormalizationPattern>,
    /// Cleaner step 2
    pub wrappers: Vec<CompiledNormalizationPattern>,
    /// Cleaner step 3
    pub list_markers: Vec<CompiledNormalizationPattern>,
    /// Cleaner step 5
    pub trailing_commentary: Vec<CompiledNormalizationPattern>,
    /// Cleaner step 6
    pub tracking_tokens: Vec<CompiledNormalizationPattern>,
    /// Cleaner step 8
    pub residual_asides: Vec<CompiledNormalizationPattern>,
    /// Tiered cultural terms (high/medium/basic weights)
    pub cultural_terms: TermSet,
    /// Cultural terms plus specific entities, used for similarity
    pub similarity_terms: TermSet,
    pub specific_entities: TermSet,
    pub family: CategoryTerms,
    pub adult: CategoryTerms,
    pub colloquial: TermSet,
    pub wordplay_indicators: TermSet,
    pub surprise_words: TermSet,
    pub complex_terms: Vec<CompiledComplexTerm>,
    pub humor_patterns: Vec<CompiledWeightedPattern>,
    pub dialect_patterns: Vec<CompiledNamedPattern>,
    pub conversational_patterns: Vec<CompiledNamedPattern>,
    pub duplicate_patterns: Vec<CompiledNamedPattern>,
    /// Source configurations
    pub cleaning_config: CleaningConfig,
    pub vocabulary_config: VocabularyConfig,
    pub structures_config: StructuresConfig,
}

impl PatternRegistry {
    /// Registry built from the built-in tables
    pub fn builtin() -> Result<Self> {
        Self::from_configs(
            CleaningConfig::default(),
            VocabularyConfig::default(),
            StructuresConfig::default(),
        )
    }

    /// Load pattern registry from configuration files; a missing path keeps the built-in table
    pub fn from_config_files(
        cleaning_path: Option<&Path>,
        vocabulary_path: Option<&Path>,
        structures_path: Option<&Path>,
    ) -> Result<Self> {
        let cleaning: CleaningConfig = load_table(cleaning_path, "cleaning")?;
        let vocabulary: VocabularyConfig = load_table(vocabulary_path, "vocabulary")?;
        let structures: StructuresConfig = load_table(structures_path, "structures")?;

        Self::from_configs(cleaning, vocabulary, structures)
    }

    /// Build pattern registry from parsed configurations
    pub fn from_configs(
        cleaning: CleaningConfig,
        vocabulary: VocabularyConfig,
        structures: StructuresConfig,
    ) -> Result<Self> {
        let tiers = &vocabulary.cultural;
        let tiered = tiers
            .high
            .iter()
            .map(|t| (t.as_str(), tiers.high_weight))
            .chain(tiers.medium.iter().map(|t| (t.as_str(), tiers.medium_weight)))
            .chain(tiers.basic.iter().map(|t| (t.as_str(), tiers.basic_weight)));
        let cultural_terms = TermSet::new(tiered.clone());
        let similarity_terms = TermSet::new(tiered.chain(
            vocabulary
                .specific_entities
                .iter()
                .map(|t| (t.as_str(), tiers.high_weight)),
        ));

        let complex_terms = vocabulary
            .complex_terms
            .iter()
            .filter(|c| !normalize(&c.term).is_empty())
            .map(|c| {
                let term = normalize(&c.term);
                compile(&c.term, &format!(r"(?i)\b{}\b", regex::escape(&c.term))).map(|regex| {
                    CompiledComplexTerm {
                        term,
                        regex,
                        simple: c.simple.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            prefixes: compile_normalization(&cleaning.prefixes)?,
            wrappers: compile_normalization(&cleaning.wrappers)?,
            list_markers: compile_normalization(&cleaning.list_markers)?,
            trailing_commentary: compile_normalization(&cleaning.trailing_commentary)?,
            tracking_tokens: compile_normalization(&cleaning.tracking_tokens)?,
            residual_asides: compile_normalization(&cleaning.residual_asides)?,
            cultural_terms,
            similarity_terms,
            specific_entities: TermSet::uniform(&vocabulary.specific_entities),
            family: compile_category(&vocabulary.family),
            adult: compile_category(&vocabulary.adult),
            colloquial: TermSet::uniform(&vocabulary.colloquial),
            wordplay_indicators: TermSet::uniform(&vocabulary.wordplay_indicators),
            surprise_words: TermSet::uniform(&vocabulary.surprise_words),
            complex_terms,
            humor_patterns: structures
                .humor_patterns
                .iter()
                .map(|p| {
                    compile(&p.name, &p.pattern).map(|regex| CompiledWeightedPattern {
                        name: p.name.clone(),
                        regex,
                        weight: p.weight,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            dialect_patterns: compile_named(&structures.dialect_patterns)?,
            conversational_patterns: compile_named(&structures.conversational_patterns)?,
            duplicate_patterns: compile_named(&structures.duplicate_patterns)?,
            cleaning_config: cleaning,
            vocabulary_config: vocabulary,
            structures_config: structures,
        })
    }

    /// Term lists for a category
    pub fn category_terms(&self, category: Category) -> &CategoryTerms {
        match category {
            Category::Family => &self.family,
            Category::Adult => &self.adult,
        }
    }

    /// Apply a table of normalization patterns in priority order
    pub fn apply(patterns: &[CompiledNormalizationPattern], text: &str) -> String {
        let mut result = text.to_string();
        for pattern in patterns {
            result = pattern
                .regex
                .replace_all(&result, pattern.replacement.as_str())
                .to_string();
        }
        result
    }

    /// Sum of weights of humor patterns matching the text
    pub fn humor_structure_points(&self, text: &str) -> u32 {
        self.humor_patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.weight)
            .sum()
    }

    /// Names of duplicate structure patterns matching normalized text
    pub fn structural_matches(&self, normalized: &str) -> Vec<&str> {
        self.duplicate_patterns
            .iter()
            .filter(|p| p.regex.is_match(normalized))
            .map(|p| p.name.as_str())
            .collect()
    }
}

fn load_table<T>(path: Option<&Path>, label: &str) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let content = std::fs::read_to_string(path).map_err(|e| PunchlineError::Io {
        source: e,
        context: format!("Failed to read {} table: {:?}", label, path),
    })?;
    tracing::debug!("Loaded {} table from {:?}", label, path);
    Ok(toml::from_str(&content)?)
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| PunchlineError::Pattern {
        name: name.to_string(),
        source: e,
    })
}

fn compile_normalization(
    patterns: &[NormalizationPattern],
) -> Result<Vec<CompiledNormalizationPattern>> {
    let mut compiled = patterns
        .iter()
        .map(|np| {
            compile(&np.name, &np.pattern).map(|regex| CompiledNormalizationPattern {
                name: np.name.clone(),
                regex,
                replacement: np.replacement.clone(),
                priority: np.priority,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable sort keeps file order among equal priorities
    compiled.sort_by_key(|p| p.priority);
    Ok(compiled)
}

fn compile_named(patterns: &[NamedPattern]) -> Result<Vec<CompiledNamedPattern>> {
    patterns
        .iter()
        .map(|p| {
            compile(&p.name, &p.pattern).map(|regex| CompiledNamedPattern {
                name: p.name.clone(),
                regex,
            })
        })
        .collect()
}

fn compile_category(vocabulary: &CategoryVocabulary) -> CategoryTerms {
    CategoryTerms {
        cultural_elements: TermSet::uniform(&vocabulary.cultural_elements),
        excellence_terms: TermSet::uniform(&vocabulary.excellence_terms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::padded;

    #[test]
    fn test_builtin_registry_compiles() {
        let registry = PatternRegistry::builtin().unwrap();
        assert!(!registry.prefixes.is_empty());
        assert!(!registry.cultural_terms.is_empty());
        assert!(!registry.humor_patterns.is_empty());
        assert!(!registry.duplicate_patterns.is_empty());
        assert!(registry.similarity_terms.len() > registry.cultural_terms.len());
    }

    #[test]
    fn test_invalid_pattern_reports_name() {
        let mut structures = StructuresConfig::default();
        structures.dialect_patterns.push(NamedPattern {
            name: "broken".to_string(),
            pattern: "(unclosed".to_string(),
        });

        let err = PatternRegistry::from_configs(
            CleaningConfig::default(),
            VocabularyConfig::default(),
            structures,
        )
        .unwrap_err();

        match err {
            PunchlineError::Pattern { name, .. } => assert_eq!(name, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalization_priority_order() {
        let patterns = vec![
            NormalizationPattern {
                name: "second".to_string(),
                pattern: "b".to_string(),
                replacement: "c".to_string(),
                priority: 2,
            },
            NormalizationPattern {
                name: "first".to_string(),
                pattern: "a".to_string(),
                replacement: "b".to_string(),
                priority: 1,
            },
        ];
        let compiled = compile_normalization(&patterns).unwrap();
        assert_eq!(compiled[0].name, "first");
        assert_eq!(PatternRegistry::apply(&compiled, "a"), "c");
    }

    #[test]
    fn test_term_set_keeps_highest_weight() {
        let set = TermSet::new([("Chai", 1), ("chai", 3), ("Pani-Puri", 2)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.weight_of("chai"), 3);
        assert!(set.contains("panipuri"));
    }

    #[test]
    fn test_term_set_matches_phrases() {
        let set = TermSet::uniform(["arranged marriage", "chai"]);
        let text = padded(&normalize("An arranged marriage over chai!"));
        let matched: Vec<&str> = set.matches(&text).iter().map(|t| t.term.as_str()).collect();
        assert_eq!(matched, vec!["arranged marriage", "chai"]);
    }

    #[test]
    fn test_category_terms_lookup() {
        let registry = PatternRegistry::builtin().unwrap();
        assert!(registry
            .category_terms(Category::Family)
            .cultural_elements
            .contains("diwali"));
        assert!(registry
            .category_terms(Category::Adult)
            .cultural_elements
            .contains("office"));
    }

    #[test]
    fn test_tables_round_trip_through_toml() {
        let content = toml::to_string_pretty(&VocabularyConfig::default()).unwrap();
        let parsed: VocabularyConfig = toml::from_str(&content).unwrap();
        assert_eq!(
            parsed.cultural.high.len(),
            VocabularyConfig::default().cultural.high.len()
        );
    }

    #[test]
    fn test_partial_table_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structures.toml");
        std::fs::write(
            &path,
            r#"
[[humor_patterns]]
name = "only_one"
pattern = "(?i)\\bknock\\b"
weight = 2
"#,
        )
        .unwrap();

        let registry = PatternRegistry::from_config_files(None, None, Some(&path)).unwrap();
        assert_eq!(registry.humor_patterns.len(), 1);
        assert_eq!(registry.humor_structure_points("Knock knock!"), 2);
        assert!(!registry.dialect_patterns.is_empty());
    }
}
