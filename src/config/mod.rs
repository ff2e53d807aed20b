//! Configuration management for Punchline
//!
//! Configuration is a single TOML file. Every section has built-in defaults, so
//! a file only needs the keys it changes. Named profiles and `PUNCHLINE_*`
//! environment variables are layered on top after loading.

use crate::error::{PunchlineError, Result};
use crate::patterns::PatternRegistry;
use crate::processing::{StageMode, StageModes};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Schema version written by this build
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    #[serde(default)]
    pub pipeline: StageModes,
    #[serde(default)]
    pub validity: ValidityConfig,
    #[serde(default)]
    pub duplicates: DuplicatesConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Acceptance gates applied after cleaning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityConfig {
    pub min_chars: usize,
    pub max_chars: usize,
    pub min_words: usize,
    pub max_words: usize,
    /// A joke passes the quality gate when any one of these three is met
    pub min_total_score: u32,
    pub min_cultural_score: u32,
    pub min_humor_score: u32,
}

impl Default for ValidityConfig {
    fn default() -> Self {
        Self {
            min_chars: 15,
            max_chars: 400,
            min_words: 6,
            max_words: 50,
            min_total_score: 15,
            min_cultural_score: 5,
            min_humor_score: 1,
        }
    }
}

/// Duplicate detection thresholds; similarity values are exclusive lower bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicatesConfig {
    /// Candidates shorter than this (trimmed, in chars) count as duplicates
    pub min_candidate_chars: usize,
    pub cultural_overlap: f64,
    pub cultural_jaccard: f64,
    pub entity_jaccard: f64,
    pub edit_similarity: f64,
    pub structural_jaccard: f64,
    pub jaccard: f64,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            min_candidate_chars: 10,
            cultural_overlap: 0.6,
            cultural_jaccard: 0.45,
            entity_jaccard: 0.35,
            edit_similarity: 0.8,
            structural_jaccard: 0.4,
            jaccard: 0.5,
        }
    }
}

/// Caller-side history and prompt diversity limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
    /// Number of recent prompt indices the diversity tracker avoids
    pub diversity_window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 50,
            diversity_window: 5,
        }
    }
}

/// Optional override files for the pattern tables; unset keeps the built-in table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structures_file: Option<PathBuf>,
}

/// Profile-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<StageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<StageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<StageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_total_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaccard: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PunchlineError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PunchlineError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| PunchlineError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        let overrides = self
            .profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| PunchlineError::Config(format!("Unknown profile: {}", profile)))?;

        if let Some(mode) = overrides.cleaning {
            self.pipeline.cleaning = mode;
        }
        if let Some(mode) = overrides.duplicates {
            self.pipeline.duplicates = mode;
        }
        if let Some(mode) = overrides.scoring {
            self.pipeline.scoring = mode;
        }
        if let Some(score) = overrides.min_total_score {
            self.validity.min_total_score = score;
        }
        if let Some(jaccard) = overrides.jaccard {
            self.duplicates.jaccard = jaccard;
        }
        if let Some(max) = overrides.max_history {
            self.history.max_entries = max;
        }
        tracing::debug!("Applied profile '{}'", profile);
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: PUNCHLINE_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("PUNCHLINE_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "PIPELINE__CLEANING" => self.pipeline.cleaning = parse_env(path, value)?,
            "PIPELINE__DUPLICATES" => self.pipeline.duplicates = parse_env(path, value)?,
            "PIPELINE__SCORING" => self.pipeline.scoring = parse_env(path, value)?,
            "VALIDITY__MIN_TOTAL_SCORE" => self.validity.min_total_score = parse_env(path, value)?,
            "VALIDITY__MAX_CHARS" => self.validity.max_chars = parse_env(path, value)?,
            "DUPLICATES__JACCARD" => self.duplicates.jaccard = parse_env(path, value)?,
            "DUPLICATES__EDIT_SIMILARITY" => {
                self.duplicates.edit_similarity = parse_env(path, value)?
            }
            "HISTORY__MAX_ENTRIES" => self.history.max_entries = parse_env(path, value)?,
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Compile the pattern registry, honoring any override files
    pub fn pattern_registry(&self) -> Result<PatternRegistry> {
        let cleaning = self.patterns.cleaning_file.as_deref().map(expand_path);
        let vocabulary = self.patterns.vocabulary_file.as_deref().map(expand_path);
        let structures = self.patterns.structures_file.as_deref().map(expand_path);

        PatternRegistry::from_config_files(
            cleaning.as_deref(),
            vocabulary.as_deref(),
            structures.as_deref(),
        )
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the config file and exported pattern tables
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            PunchlineError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("punchline"))
    }
}

fn parse_env<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PunchlineError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}'", value),
        })
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: SCHEMA_VERSION.to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            pipeline: StageModes::default(),
            validity: ValidityConfig::default(),
            duplicates: DuplicatesConfig::default(),
            history: HistoryConfig::default(),
            patterns: PatternsConfig::default(),
            profiles: HashMap::new(),
        }
    }
}
