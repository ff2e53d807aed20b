// Integration tests for configuration files, profiles and pattern table overrides
use punchline::config::{Config, ConfigValidator};
use punchline::patterns::StructuresConfig;
use punchline::processing::StageMode;
use punchline::{Category, JokePipeline, PunchlineError};

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_profile_switches_stages() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.toml",
        r#"
[_meta]
schema_version = "1.0.0"

[validity]
min_total_score = 20

[profiles.fast]
cleaning = "basic"
scoring = "basic"
min_total_score = 10
"#,
    );

    let plain = Config::load(&path).unwrap();
    assert_eq!(plain.pipeline.cleaning, StageMode::Enhanced);
    assert_eq!(plain.validity.min_total_score, 20);

    let fast = Config::load_with_profile(&path, "fast").unwrap();
    assert_eq!(fast.pipeline.cleaning, StageMode::Basic);
    assert_eq!(fast.pipeline.scoring, StageMode::Basic);
    assert_eq!(fast.pipeline.duplicates, StageMode::Enhanced);
    assert_eq!(fast.validity.min_total_score, 10);

    assert!(Config::load_with_profile(&path, "nope").is_err());
}

#[test]
fn test_invalid_file_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.toml",
        r#"
[_meta]
schema_version = "1.0.0"

[validity]
min_words = 80

[duplicates]
jaccard = 3.0
edit_similarity = 1.2
"#,
    );

    match Config::load(&path).unwrap_err() {
        PunchlineError::ConfigValidation { errors } => {
            let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
            assert!(paths.contains(&"validity.max_words"));
            assert!(paths.contains(&"duplicates.jaccard"));
            assert!(paths.contains(&"duplicates.edit_similarity"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "config.toml", "[_meta\nschema_version = ");
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        PunchlineError::Toml(_)
    ));
}

#[test]
fn test_structures_override_changes_scoring() {
    let dir = tempfile::tempdir().unwrap();

    // Only one humor pattern: knock-knock jokes
    let mut structures = StructuresConfig::default();
    structures.humor_patterns.retain(|p| p.name == "knock_knock");
    let structures_path = write(
        &dir,
        "structures.toml",
        &toml::to_string_pretty(&structures).unwrap(),
    );

    let mut config = Config::default();
    config.patterns.structures_file = Some(structures_path);
    let config_path = dir.path().join("config.toml");
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap();
    let custom = JokePipeline::from_config(&loaded).unwrap();
    let builtin = JokePipeline::with_defaults().unwrap();

    let joke = "Why did the cricket player go to the bank? Because he wanted his balance!";
    assert!(
        custom.score(joke, Category::Family).breakdown.humor
            < builtin.score(joke, Category::Family).breakdown.humor
    );
}

#[test]
fn test_missing_table_file_is_an_error() {
    let mut config = Config::default();
    config.patterns.vocabulary_file = Some("/nonexistent/vocabulary.toml".into());
    assert!(ConfigValidator::validate(&config).is_ok());
    assert!(matches!(
        JokePipeline::from_config(&config),
        Err(PunchlineError::Io { .. })
    ));
}
