use std::io::Read;
use std::path::{Path, PathBuf};

use punchline::cli::{Cli, Commands, ConfigAction};
use punchline::config::Config;
use punchline::error::{PunchlineError, Result};
use punchline::history::JokeHistory;
use punchline::patterns::{CleaningConfig, StructuresConfig, VocabularyConfig};
use punchline::processing::{Category, JokePipeline, ProcessResult, RelevanceScore};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Process {
            text,
            category,
            history,
            json,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_process(&config, text, &category, history, json)?;
        }
        Commands::Clean { text } => {
            let config = load_config(cli.config, cli.profile)?;
            let pipeline = JokePipeline::from_config(&config)?;
            let cleaned = pipeline.clean(&read_text(text)?);
            if cleaned.is_empty() {
                tracing::warn!("Response is unusable after cleaning");
            }
            println!("{}", cleaned);
        }
        Commands::Score {
            text,
            category,
            complexity,
            json,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_score(&config, text, &category, complexity, json)?;
        }
        Commands::Duplicate {
            text,
            history,
            json,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_duplicate(&config, text, &history, json)?;
        }
        Commands::Similarity { first, second } => {
            let config = load_config(cli.config, cli.profile)?;
            let pipeline = JokePipeline::from_config(&config)?;
            let result = pipeline.similarity(&first, &second);
            println!("Jaccard:          {:.3}", result.jaccard);
            println!("Cultural overlap: {:.3}", result.cultural_similarity);
            println!("Edit similarity:  {:.3}", result.edit_similarity);
            println!("Same structure:   {}", result.structural_match);
        }
        Commands::Simplify { text } => {
            let config = load_config(cli.config, cli.profile)?;
            let pipeline = JokePipeline::from_config(&config)?;
            println!("{}", pipeline.simplify(&read_text(text)?));
        }
        Commands::Config { action } => {
            cmd_config(cli.config, cli.profile, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose {
        "punchline=debug"
    } else {
        "punchline=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_process(
    config: &Config,
    text: Option<String>,
    category: &str,
    history_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let pipeline = JokePipeline::from_config(config)?;
    let history = match history_path {
        Some(path) => JokeHistory::load(&path, config.history.max_entries)?,
        None => JokeHistory::from_config(&config.history),
    };

    let raw = read_text(text)?;
    let result = pipeline.process_with_category(&raw, category, history.entries());

    if json {
        print_json(&result)?;
    } else {
        print_process_result(&result);
    }
    Ok(())
}

fn cmd_score(
    config: &Config,
    text: Option<String>,
    category: &str,
    complexity: bool,
    json: bool,
) -> Result<()> {
    let pipeline = JokePipeline::from_config(config)?;
    let joke = read_text(text)?;
    let score = pipeline.score(&joke, Category::parse_lossy(category));
    let report = complexity.then(|| pipeline.check_complexity(&joke));

    if json {
        print_json(&serde_json::json!({
            "score": score,
            "conversational": pipeline.is_conversational(&joke),
            "complexity": report,
        }))?;
        return Ok(());
    }

    print_score(&score);
    println!("  Conversational:   {}", pipeline.is_conversational(&joke));
    if let Some(report) = report {
        println!("Complexity: {:.2} (simple: {})", report.score, report.is_simple);
        println!("  Average word length: {:.2}", report.avg_word_length);
        if !report.complex_words.is_empty() {
            println!("  Complex words: {}", report.complex_words.join(", "));
        }
    }
    Ok(())
}

fn cmd_duplicate(config: &Config, text: Option<String>, history_path: &Path, json: bool) -> Result<()> {
    let pipeline = JokePipeline::from_config(config)?;
    let history = JokeHistory::load(history_path, config.history.max_entries)?;
    let candidate = read_text(text)?;
    let found = pipeline.find_duplicate(candidate.trim(), history.entries());

    if json {
        return print_json(&serde_json::json!({
            "is_duplicate": found.is_some(),
            "match": found,
        }));
    }

    match found {
        Some(m) => {
            println!("Duplicate ({:?})", m.rule);
            if let Some(index) = m.history_index {
                println!("  Matches history line {}: {}", index + 1, history.entries()[index]);
            }
            if let Some(sim) = m.similarity {
                println!(
                    "  Jaccard {:.2}, cultural {:.2}, edit {:.2}",
                    sim.jaccard, sim.cultural_similarity, sim.edit_similarity
                );
            }
        }
        None => println!("Not a duplicate of any of {} entries", history.len()),
    }
    Ok(())
}

fn cmd_config(
    config_path: Option<PathBuf>,
    profile: Option<String>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show { section } => {
            let config = load_config(config_path, profile)?;
            let value = serde_json::to_value(&config).map_err(|e| PunchlineError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;

            let shown = match section {
                Some(section) => value.get(&section).cloned().ok_or_else(|| {
                    PunchlineError::Config(format!("Unknown config section: {}", section))
                })?,
                None => value,
            };
            print_json(&shown)?;
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            config.pattern_registry()?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            println!("  Profiles: {}", config.profiles.len());
        }
        ConfigAction::Init { force, with_tables } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            let config_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&config_dir).map_err(|e| PunchlineError::Io {
                source: e,
                context: format!("Failed to create config directory: {:?}", config_dir),
            })?;

            let mut config = Config::default();
            if with_tables {
                config.patterns.cleaning_file = Some(config_dir.join("cleaning.toml"));
                config.patterns.vocabulary_file = Some(config_dir.join("vocabulary.toml"));
                config.patterns.structures_file = Some(config_dir.join("structures.toml"));
                write_pattern_tables(&config_dir, force)?;
                println!("✓ Pattern tables installed");
                println!("  - cleaning.toml: Response cleaning patterns");
                println!("  - vocabulary.toml: Cultural and category vocabulary");
                println!("  - structures.toml: Humor, dialect and duplicate patterns");
            }
            config.save(&path)?;
            tracing::info!("Wrote default configuration");
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::debug!(
            "Config file not found, using defaults. Run 'punchline config init' to create one."
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        if let Some(profile) = profile {
            config.apply_profile(&profile)?;
        }
        return Ok(config);
    }

    if let Some(profile) = profile {
        Config::load_with_profile(&path, &profile)
    } else {
        Config::load(&path)
    }
}

/// Write the built-in pattern tables next to the config file
fn write_pattern_tables(config_dir: &Path, force: bool) -> Result<()> {
    let tables = [
        ("cleaning.toml", toml::to_string_pretty(&CleaningConfig::default())?),
        ("vocabulary.toml", toml::to_string_pretty(&VocabularyConfig::default())?),
        ("structures.toml", toml::to_string_pretty(&StructuresConfig::default())?),
    ];

    for (name, content) in tables {
        let path = config_dir.join(name);
        if path.exists() && !force {
            tracing::info!("Keeping existing {}", name);
            continue;
        }
        std::fs::write(&path, content).map_err(|e| PunchlineError::Io {
            source: e,
            context: format!("Failed to write {}: {:?}", name, path),
        })?;
    }
    Ok(())
}

fn read_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| PunchlineError::Io {
            source: e,
            context: "Failed to read text from stdin".to_string(),
        })?;
    Ok(buffer)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PunchlineError::Json {
        source: e,
        context: "Failed to serialize output".to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn print_score(score: &RelevanceScore) {
    let b = &score.breakdown;
    println!("Score: {}/100 ({})", score.total, score.grade);
    println!("  Cultural:         {}", b.cultural_references);
    println!("  Language:         {}", b.language_patterns);
    println!("  Category fit:     {}", b.category_fit);
    println!("  Simplicity:       {}", b.simplicity);
    println!("  Humor:            {}", b.humor);
}

fn print_process_result(result: &ProcessResult) {
    let meta = &result.metadata;
    let status = if result.is_valid { "✓ Valid" } else { "✗ Rejected" };

    println!("{} ({} category)", status, meta.category);
    if result.cleaned_joke.is_empty() {
        println!("  Joke: <unusable>");
    } else {
        println!("  Joke: {}", result.cleaned_joke);
    }
    println!(
        "  Length: {} chars{}, {} words{}",
        meta.char_count,
        if meta.length_ok { "" } else { " (out of range)" },
        meta.word_count,
        if meta.word_count_ok { "" } else { " (out of range)" }
    );
    match &meta.duplicate_match {
        Some(m) => println!("  Duplicate: yes ({:?})", m.rule),
        None => println!("  Duplicate: no ({} history entries)", meta.history_size),
    }
    print_score(&result.relevance_score);
    println!("  Processed in {}µs", meta.processing_time_us);
}
