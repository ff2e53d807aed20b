// Shared types for the joke processing pipeline
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audience category; selects term sets and thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Family,
    Adult,
}

impl Category {
    /// Parse a category, falling back to `Family` for unrecognized values
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown category '{}', falling back to family", value);
            Category::Family
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Family => "family",
            Category::Adult => "adult",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "family" => Ok(Category::Family),
            "adult" => Ok(Category::Adult),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which implementation a pipeline stage uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageMode {
    #[default]
    Enhanced,
    Basic,
}

impl FromStr for StageMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enhanced" => Ok(StageMode::Enhanced),
            "basic" => Ok(StageMode::Basic),
            other => Err(format!("unknown stage mode: {}", other)),
        }
    }
}

/// Strategy selection for each of the three pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageModes {
    #[serde(default)]
    pub cleaning: StageMode,
    #[serde(default)]
    pub duplicates: StageMode,
    #[serde(default)]
    pub scoring: StageMode,
}

/// Pairwise similarity between two texts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub jaccard: f64,
    pub cultural_similarity: f64,
    pub edit_similarity: f64,
    pub structural_match: bool,
}

/// Rule of the duplicate detector that classified a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRule {
    /// Candidate too short to be usable; history not consulted
    Unusable,
    ExactMatch,
    CulturalOverlap,
    SharedEntity,
    EditDistance,
    StructuralPattern,
    WordOverlap,
}

/// Details of a duplicate classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub rule: DuplicateRule,
    /// Index into the history slice; `None` for `Unusable`
    pub history_index: Option<usize>,
    pub similarity: Option<SimilarityResult>,
}

impl DuplicateMatch {
    pub fn unusable() -> Self {
        Self {
            rule: DuplicateRule::Unusable,
            history_index: None,
            similarity: None,
        }
    }
}

/// Letter grade derived from the total relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    VeryPoor,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Grade {
    pub fn from_total(total: u32) -> Self {
        match total {
            90.. => Grade::Excellent,
            80..=89 => Grade::VeryGood,
            70..=79 => Grade::Good,
            60..=69 => Grade::Fair,
            40..=59 => Grade::Poor,
            _ => Grade::VeryPoor,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::VeryPoor => "Very Poor",
            Grade::Poor => "Poor",
            Grade::Fair => "Fair",
            Grade::Good => "Good",
            Grade::VeryGood => "Very Good",
            Grade::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Subscore caps
pub const MAX_CULTURAL: u32 = 35;
pub const MAX_LANGUAGE: u32 = 20;
pub const MAX_CATEGORY_FIT: u32 = 20;
pub const MAX_SIMPLICITY: u32 = 15;
pub const MAX_HUMOR: u32 = 10;

/// Breakdown of the relevance score; each field is already capped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cultural_references: u32,
    pub language_patterns: u32,
    pub category_fit: u32,
    pub simplicity: u32,
    pub humor: u32,
}

impl ScoreBreakdown {
    /// Calculate total score by summing all components
    pub fn total(&self) -> u32 {
        self.cultural_references
            + self.language_patterns
            + self.category_fit
            + self.simplicity
            + self.humor
    }
}

/// Composite relevance score in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceScore {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
}

impl RelevanceScore {
    pub fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        let breakdown = ScoreBreakdown {
            cultural_references: breakdown.cultural_references.min(MAX_CULTURAL),
            language_patterns: breakdown.language_patterns.min(MAX_LANGUAGE),
            category_fit: breakdown.category_fit.min(MAX_CATEGORY_FIT),
            simplicity: breakdown.simplicity.min(MAX_SIMPLICITY),
            humor: breakdown.humor.min(MAX_HUMOR),
        };
        let total = breakdown.total();
        Self {
            total,
            breakdown,
            grade: Grade::from_total(total),
        }
    }

    pub fn zero() -> Self {
        Self::from_breakdown(ScoreBreakdown::default())
    }
}

/// Per-invocation details alongside the decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessMetadata {
    pub category: Category,
    pub char_count: usize,
    pub word_count: usize,
    pub length_ok: bool,
    pub word_count_ok: bool,
    pub meets_score_threshold: bool,
    pub meets_cultural_threshold: bool,
    pub meets_humor_threshold: bool,
    pub duplicate_match: Option<DuplicateMatch>,
    pub history_size: usize,
    pub stages: StageModes,
    pub processed_at: DateTime<Utc>,
    pub processing_time_us: u64,
}

/// Result of running a raw response through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    pub cleaned_joke: String,
    pub is_duplicate: bool,
    pub is_valid: bool,
    pub relevance_score: RelevanceScore,
    pub metadata: ProcessMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_lossy() {
        assert_eq!(Category::parse_lossy("adult"), Category::Adult);
        assert_eq!(Category::parse_lossy(" Family "), Category::Family);
        assert_eq!(Category::parse_lossy("kids"), Category::Family);
        assert_eq!(Category::parse_lossy(""), Category::Family);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_total(100), Grade::Excellent);
        assert_eq!(Grade::from_total(90), Grade::Excellent);
        assert_eq!(Grade::from_total(89), Grade::VeryGood);
        assert_eq!(Grade::from_total(70), Grade::Good);
        assert_eq!(Grade::from_total(60), Grade::Fair);
        assert_eq!(Grade::from_total(40), Grade::Poor);
        assert_eq!(Grade::from_total(39), Grade::VeryPoor);
        assert_eq!(Grade::from_total(0), Grade::VeryPoor);
    }

    #[test]
    fn test_score_caps_applied() {
        let score = RelevanceScore::from_breakdown(ScoreBreakdown {
            cultural_references: 80,
            language_patterns: 25,
            category_fit: 20,
            simplicity: 99,
            humor: 14,
        });
        assert_eq!(score.breakdown.cultural_references, MAX_CULTURAL);
        assert_eq!(score.breakdown.simplicity, MAX_SIMPLICITY);
        assert_eq!(score.breakdown.humor, MAX_HUMOR);
        assert_eq!(score.total, 100);
        assert_eq!(score.grade, Grade::Excellent);
    }
}
