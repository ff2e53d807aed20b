use crate::config::{Config, ProfileOverrides, SCHEMA_VERSION};
use crate::error::{PunchlineError, Result, ValidationError};
use crate::processing::{MAX_CULTURAL, MAX_HUMOR};

/// Upper bound of the total relevance score
const MAX_TOTAL_SCORE: u32 = 100;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every violation
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_validity(config, &mut errors);
        Self::validate_duplicates(config, &mut errors);
        Self::validate_history(config, &mut errors);
        Self::validate_patterns(config, &mut errors);
        Self::validate_profiles(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PunchlineError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_validity(config: &Config, errors: &mut Vec<ValidationError>) {
        let v = &config.validity;

        if v.min_chars == 0 {
            errors.push(ValidationError::new(
                "validity.min_chars",
                "Minimum length must be greater than 0",
            ));
        }
        if v.min_chars > v.max_chars {
            errors.push(ValidationError::new(
                "validity.max_chars",
                format!(
                    "max_chars ({}) must not be below min_chars ({})",
                    v.max_chars, v.min_chars
                ),
            ));
        }
        if v.min_words > v.max_words {
            errors.push(ValidationError::new(
                "validity.max_words",
                format!(
                    "max_words ({}) must not be below min_words ({})",
                    v.max_words, v.min_words
                ),
            ));
        }

        Self::check_max(
            "validity.min_total_score",
            v.min_total_score,
            MAX_TOTAL_SCORE,
            errors,
        );
        Self::check_max(
            "validity.min_cultural_score",
            v.min_cultural_score,
            MAX_CULTURAL,
            errors,
        );
        Self::check_max(
            "validity.min_humor_score",
            v.min_humor_score,
            MAX_HUMOR,
            errors,
        );
    }

    fn validate_duplicates(config: &Config, errors: &mut Vec<ValidationError>) {
        let d = &config.duplicates;

        if d.min_candidate_chars == 0 {
            errors.push(ValidationError::new(
                "duplicates.min_candidate_chars",
                "Minimum candidate length must be greater than 0",
            ));
        }

        let ratios = [
            ("duplicates.cultural_overlap", d.cultural_overlap),
            ("duplicates.cultural_jaccard", d.cultural_jaccard),
            ("duplicates.entity_jaccard", d.entity_jaccard),
            ("duplicates.edit_similarity", d.edit_similarity),
            ("duplicates.structural_jaccard", d.structural_jaccard),
            ("duplicates.jaccard", d.jaccard),
        ];
        for (path, value) in ratios {
            Self::check_ratio(path, value, errors);
        }
    }

    fn validate_history(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.history.max_entries == 0 {
            errors.push(ValidationError::new(
                "history.max_entries",
                "History size must be greater than 0",
            ));
        }
    }

    fn validate_patterns(config: &Config, errors: &mut Vec<ValidationError>) {
        // Existence is checked when the registry loads; paths may still need ~ expansion
        let files = [
            ("patterns.cleaning_file", &config.patterns.cleaning_file),
            ("patterns.vocabulary_file", &config.patterns.vocabulary_file),
            ("patterns.structures_file", &config.patterns.structures_file),
        ];
        for (path, file) in files {
            if file.as_ref().is_some_and(|f| f.as_os_str().is_empty()) {
                errors.push(ValidationError::new(path, "Pattern file path cannot be empty"));
            }
        }
    }

    fn validate_profiles(config: &Config, errors: &mut Vec<ValidationError>) {
        for (name, overrides) in &config.profiles {
            let ProfileOverrides {
                min_total_score,
                jaccard,
                max_history,
                ..
            } = overrides;

            if let Some(score) = min_total_score {
                Self::check_max(
                    &format!("profiles.{}.min_total_score", name),
                    *score,
                    MAX_TOTAL_SCORE,
                    errors,
                );
            }
            if let Some(jaccard) = jaccard {
                Self::check_ratio(&format!("profiles.{}.jaccard", name), *jaccard, errors);
            }
            if *max_history == Some(0) {
                errors.push(ValidationError::new(
                    format!("profiles.{}.max_history", name),
                    "History size must be greater than 0",
                ));
            }
        }
    }

    fn check_ratio(path: &str, value: f64, errors: &mut Vec<ValidationError>) {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::new(
                path,
                format!("Threshold must be between 0.0 and 1.0, got {}", value),
            ));
        }
    }

    fn check_max(path: &str, value: u32, max: u32, errors: &mut Vec<ValidationError>) {
        if value > max {
            errors.push(ValidationError::new(
                path,
                format!("Value {} exceeds the maximum of {}", value, max),
            ));
        }
    }
}
