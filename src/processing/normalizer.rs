// Text normalization shared by every comparison and scoring step

/// Lowercase, drop everything except word characters and whitespace,
/// collapse whitespace runs and trim
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized whitespace tokens
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of non-empty whitespace separated words in the raw text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Pad a normalized string with spaces so phrases can be matched on word boundaries
pub fn padded(normalized: &str) -> String {
    format!(" {} ", normalized)
}

/// Check whether a normalized term (single word or phrase) occurs in padded text
pub fn contains_term(padded_text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    padded_text.contains(&format!(" {} ", term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(
            normalize("  Why did the Chicken   cross the road?! "),
            "why did the chicken cross the road"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!... ,,"), "");
    }

    #[test]
    fn test_normalize_newlines_and_tabs() {
        assert_eq!(normalize("Chai\n\tand\r\nsamosa"), "chai and samosa");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "Here's a joke: Beta, are you done?",
            "Don't   worry... be HAPPY!!",
            "नमस्ते Ji, kya haal hai?",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_contains_term_word_boundary() {
        let text = padded(&normalize("My chaiwala uncle loves chai"));
        assert!(contains_term(&text, "chai"));
        assert!(contains_term(&text, "chaiwala uncle"));
        assert!(!contains_term(&text, "wala"));
        assert!(!contains_term(&text, ""));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("Chai,  please!"), vec!["chai", "please"]);
        assert!(tokens("?!").is_empty());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }
}
