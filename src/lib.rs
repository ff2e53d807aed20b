//! Punchline - post-processing for generated jokes
//!
//! Cleans raw generated text into a single joke, rejects near-duplicates of
//! recently accepted jokes, and scores cultural relevance and humor structure
//! to decide whether a joke is worth showing.

pub mod cli;
pub mod config;
pub mod diversity;
pub mod error;
pub mod history;
pub mod patterns;
pub mod processing;

pub use error::{PunchlineError, Result};
pub use processing::{Category, JokePipeline, ProcessResult, RelevanceScore};
