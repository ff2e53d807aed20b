//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "punchline",
    version,
    about = "Clean, deduplicate and score generated jokes",
    long_about = "Punchline post-processes generated jokes: it strips conversational wrappers and \
                  tracking leaks, rejects near-duplicates of recent jokes, and scores cultural \
                  relevance and humor structure. Text is read from the argument or stdin."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/punchline/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to apply
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline on one response
    Process {
        /// Raw response text (reads stdin when omitted)
        text: Option<String>,

        /// Audience category ("family" or "adult")
        #[arg(short = 'C', long, default_value = "family")]
        category: String,

        /// File with one previously accepted joke per line
        #[arg(short = 'H', long, value_name = "FILE")]
        history: Option<PathBuf>,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Clean a raw response
    Clean {
        /// Raw response text (reads stdin when omitted)
        text: Option<String>,
    },

    /// Score a joke for a category
    Score {
        /// Joke text (reads stdin when omitted)
        text: Option<String>,

        /// Audience category ("family" or "adult")
        #[arg(short = 'C', long, default_value = "family")]
        category: String,

        /// Include complexity analysis
        #[arg(long)]
        complexity: bool,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check a joke against a history file
    Duplicate {
        /// Candidate joke (reads stdin when omitted)
        text: Option<String>,

        /// File with one previously accepted joke per line
        #[arg(short = 'H', long, value_name = "FILE")]
        history: PathBuf,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Compare two texts with every similarity measure
    Similarity {
        first: String,

        second: String,
    },

    /// Replace complex vocabulary with plain words
    Simplify {
        /// Text to simplify (reads stdin when omitted)
        text: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Show only a specific section
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Also write the built-in pattern tables for editing
        #[arg(long)]
        with_tables: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
