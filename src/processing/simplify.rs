// Vocabulary complexity analysis and plain-language rewriting
use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::patterns::PatternRegistry;
use crate::processing::normalizer::{contains_term, normalize, padded};

/// Average word length above which long words start to count against a joke
const LONG_WORD_BASELINE: f64 = 5.0;

/// Complexity analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub word_count: usize,
    pub avg_word_length: f64,
    /// Complex vocabulary present, in table order
    pub complex_words: Vec<String>,
    pub complex_ratio: f64,
    /// `max(0, avg - 5) * 0.2 + complex_ratio * 10`
    pub score: f64,
    pub is_simple: bool,
}

/// Measure word length and complex vocabulary usage
pub fn check_complexity(text: &str, patterns: &PatternRegistry) -> ComplexityReport {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();

    let word_count = words.len();
    let avg_word_length = if word_count == 0 {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
    };

    let padded_text = padded(&normalized);
    let mut complex_words: Vec<String> = Vec::new();
    for complex in &patterns.complex_terms {
        if contains_term(&padded_text, &complex.term) && !complex_words.contains(&complex.term) {
            complex_words.push(complex.term.clone());
        }
    }

    let complex_ratio = if word_count == 0 {
        0.0
    } else {
        complex_words.len() as f64 / word_count as f64
    };
    let score = (avg_word_length - LONG_WORD_BASELINE).max(0.0) * 0.2 + complex_ratio * 10.0;

    ComplexityReport {
        word_count,
        avg_word_length,
        is_simple: score < 2.0 && complex_words.is_empty(),
        complex_words,
        complex_ratio,
        score,
    }
}

/// Replace complex vocabulary with plain alternatives, keeping a leading capital
pub fn simplify(text: &str, patterns: &PatternRegistry) -> String {
    let mut result = text.to_string();
    for complex in &patterns.complex_terms {
        result = complex
            .regex
            .replace_all(&result, |caps: &Captures| {
                let matched = &caps[0];
                if matched.chars().next().is_some_and(char::is_uppercase) {
                    capitalize(&complex.simple)
                } else {
                    complex.simple.clone()
                }
            })
            .into_owned();
    }
    result
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
