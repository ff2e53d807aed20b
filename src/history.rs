// Bounded history of accepted jokes, owned by the caller
use std::path::Path;

use crate::config::HistoryConfig;
use crate::error::{PunchlineError, Result};
use crate::processing::{DuplicateDetector, DuplicateMatch};

/// FIFO of recently accepted jokes; the oldest entry is evicted past `max_entries`
#[derive(Debug, Clone)]
pub struct JokeHistory {
    entries: Vec<String>,
    max_entries: usize,
}

impl JokeHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Read a history file with one joke per line; blank lines are skipped
    pub fn load(path: &Path, max_entries: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PunchlineError::Io {
            source: e,
            context: format!("Failed to read history file: {:?}", path),
        })?;

        let mut history = Self::new(max_entries);
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            history.push(line.trim());
        }
        tracing::debug!("Loaded {} history entries from {:?}", history.len(), path);
        Ok(history)
    }

    /// Append a joke, evicting the oldest entries beyond the cap
    pub fn push(&mut self, joke: impl Into<String>) {
        self.entries.push(joke.into());
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Duplicate check of `candidate` against the current entries
    pub fn contains_similar(
        &self,
        detector: &dyn DuplicateDetector,
        candidate: &str,
    ) -> Option<DuplicateMatch> {
        detector.find_duplicate(candidate, &self.entries)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for JokeHistory {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}
