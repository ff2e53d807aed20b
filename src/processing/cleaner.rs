// Response cleaning: strips conversational wrappers, markdown, commentary
// and tracking leaks so only the joke body remains
use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::patterns::PatternRegistry;
use crate::processing::normalizer::word_count;

/// Minimum number of words for a cleaned joke to be usable
pub const MIN_CLEAN_WORDS: usize = 3;

/// Upper bound on full cleaning passes while converging
const MAX_PASSES: usize = 6;

/// Upper bound on repeated leading-strip rounds within one pass
const MAX_LEADING_ROUNDS: usize = 6;

/// Turns raw generated text into a single-line joke, or `""` when unusable
pub trait ResponseCleaner: Send + Sync {
    fn clean(&self, raw: &str) -> String;

    fn name(&self) -> &'static str;
}

fn re_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Space left in front of punctuation after a removal
fn re_space_before_punct() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([.!?,;:])").unwrap())
}

fn re_terminal_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]{2,}").unwrap())
}

fn re_trailing_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,;:]+\s*$").unwrap())
}

fn re_leading_quotes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^[\s"'`“”‘’]+"#).unwrap())
}

/// Collapse every whitespace run (newlines included) to one space and trim
fn collapse_whitespace(text: &str) -> String {
    re_whitespace().replace_all(text, " ").trim().to_string()
}

fn tidy(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    re_space_before_punct()
        .replace_all(&collapsed, "$1")
        .to_string()
}

const TERMINAL: [char; 3] = ['.', '!', '?'];

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(TERMINAL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteKind {
    Double,
    Single,
    Backtick,
}

fn quote_kind(c: char) -> Option<QuoteKind> {
    match c {
        '"' | '“' | '”' => Some(QuoteKind::Double),
        '\'' | '‘' | '’' => Some(QuoteKind::Single),
        '`' => Some(QuoteKind::Backtick),
        _ => None,
    }
}

/// Number of quotes of `kind` still open at the end of `text`
///
/// Straight quotes open after whitespace, a bracket or another quote and close
/// otherwise. A single quote between two word characters is an apostrophe.
fn open_quotes(text: &str, kind: QuoteKind) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut depth = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        if quote_kind(c) != Some(kind) {
            continue;
        }
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let is_word = |ch: Option<char>| ch.is_some_and(char::is_alphanumeric);

        let opens = match c {
            '“' | '‘' => true,
            '”' => false,
            _ if is_word(prev) && is_word(next) => continue,
            _ => prev.map_or(true, |p| {
                p.is_whitespace() || matches!(p, '(' | '[' | '{') || quote_kind(p).is_some()
            }),
        };

        if opens {
            depth += 1;
        } else {
            depth = depth.saturating_sub(1);
        }
    }
    depth
}

/// Drop closing quotes at the end of the text (ignoring terminal punctuation)
/// that have no opening counterpart left, keeping balanced ones
fn drop_orphan_quotes(text: &str) -> String {
    let mut result = text.trim_end().to_string();
    loop {
        let core_len = result.trim_end_matches(TERMINAL).len();
        let (core, terminal) = result.split_at(core_len);
        let Some(last) = core.chars().last() else {
            break;
        };
        let Some(kind) = quote_kind(last) else {
            break;
        };
        let body = &core[..core.len() - last.len_utf8()];
        if open_quotes(body, kind) > 0 {
            break;
        }
        result = format!("{}{}", body.trim_end(), terminal);
    }
    result
}

/// Drop orphaned closing quotes, append a period when the text lacks terminal
/// punctuation and drop texts with too few words
fn finish(text: &str) -> String {
    let mut result = drop_orphan_quotes(text.trim());
    if !result.is_empty() && !ends_with_terminal(&result) {
        result.push('.');
    }
    if word_count(&result) < MIN_CLEAN_WORDS {
        return String::new();
    }
    result
}

/// Pattern-table driven cleaner
pub struct EnhancedCleaner {
    patterns: Arc<PatternRegistry>,
}

impl EnhancedCleaner {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }

    /// Steps 1-3: prefixes, wrappers and list markers, repeated while any of
    /// them keeps exposing another leading artifact
    fn strip_leading(&self, text: &str) -> String {
        let mut current = text.to_string();
        for _ in 0..MAX_LEADING_ROUNDS {
            let mut next = current.clone();
            for _ in 0..MAX_LEADING_ROUNDS {
                let stripped = PatternRegistry::apply(&self.patterns.prefixes, &next);
                if stripped == next {
                    break;
                }
                next = stripped;
            }
            next = PatternRegistry::apply(&self.patterns.wrappers, &next);
            next = PatternRegistry::apply(&self.patterns.list_markers, &next);

            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Step 7: collapse terminal punctuation runs and drop dangling separators
    fn normalize_punctuation(text: &str) -> String {
        let collapsed = re_terminal_run().replace_all(text, ".");
        re_trailing_separators()
            .replace(collapsed.trim_end(), "")
            .to_string()
    }

    /// One full pass of the ten cleaning steps
    fn clean_once(&self, raw: &str) -> String {
        let p = &self.patterns;

        let text = self.strip_leading(raw);
        let text = collapse_whitespace(&text);
        let text = tidy(&PatternRegistry::apply(&p.trailing_commentary, &text));
        let text = tidy(&PatternRegistry::apply(&p.tracking_tokens, &text));
        let text = Self::normalize_punctuation(&text);
        let text = tidy(&PatternRegistry::apply(&p.residual_asides, &text));

        finish(&text)
    }
}

impl ResponseCleaner for EnhancedCleaner {
    fn clean(&self, raw: &str) -> String {
        let mut current = raw.to_string();
        for pass in 0..MAX_PASSES {
            let next = self.clean_once(&current);
            if next == current {
                break;
            }
            tracing::trace!("Cleaning pass {}: {:?} -> {:?}", pass, current, next);
            current = next;
            if current.is_empty() {
                break;
            }
        }
        current
    }

    fn name(&self) -> &'static str {
        "enhanced"
    }
}

/// Minimal cleaner: surrounding quotes, whitespace and terminal punctuation only
#[derive(Debug, Default)]
pub struct BasicCleaner;

impl BasicCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseCleaner for BasicCleaner {
    fn clean(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw);
        let unquoted = re_leading_quotes().replace(&collapsed, "");
        finish(&unquoted)
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> EnhancedCleaner {
        EnhancedCleaner::new(Arc::new(PatternRegistry::builtin().unwrap()))
    }

    #[test]
    fn test_strips_heres_a_joke_prefix() {
        assert_eq!(
            cleaner().clean("Here's a joke: Why did the chicken cross the road?"),
            "Why did the chicken cross the road?"
        );
    }

    #[test]
    fn test_strips_conversational_openers() {
        let c = cleaner();
        assert_eq!(
            c.clean("Sure! Here's one for you: Why did the samosa go to school?"),
            "Why did the samosa go to school?"
        );
        assert_eq!(
            c.clean("Answer: My uncle calls his chai a morning meeting."),
            "My uncle calls his chai a morning meeting."
        );
        assert_eq!(
            c.clean("Okay, here is a funny joke - Beta asked papa for pocket money."),
            "Beta asked papa for pocket money."
        );
    }

    #[test]
    fn test_strips_joke_intro_variants() {
        let c = cleaner();
        let joke = "Why did the chai go to school? It wanted to be a little more cultured.";
        let intros = [
            "Here's a punny joke for you: ",
            "Here's my punchline: ",
            "Here's a joke about cricket: ",
            "Here's a family-friendly joke: ",
            "Here are two light-hearted jokes on chai! ",
            "Sure, here's a light-hearted one: ",
            "Certainly! Here is a quick one for you - ",
        ];
        for intro in intros {
            assert_eq!(c.clean(&format!("{}{}", intro, joke)), joke, "{:?}", intro);
        }
    }

    #[test]
    fn test_pun_words_in_joke_body_survive() {
        assert_eq!(
            cleaner().clean("Here's a pun: Punny people in Pune always punch above their weight."),
            "Punny people in Pune always punch above their weight."
        );
    }

    #[test]
    fn test_title_header_and_explanation_removed() {
        let raw = "**Title:** The Chai Chronicles\nWhy did the chai go to therapy? It was steeped in problems.\n\nExplanation: Steeped means soaked, and also deeply involved. Hope you liked it!";
        assert_eq!(
            cleaner().clean(raw),
            "Why did the chai go to therapy? It was steeped in problems."
        );
        assert_eq!(
            cleaner().clean("Why was the ladoo calm? It had a round personality. Why it's funny: ladoos are round."),
            "Why was the ladoo calm? It had a round personality."
        );
    }

    #[test]
    fn test_balanced_inner_quotes_kept() {
        let c = cleaner();
        assert_eq!(c.clean("He said \"wow\""), "He said \"wow\".");
        assert_eq!(
            c.clean("\"My uncle said, 'only Indian cars understand Indian roads'\""),
            "My uncle said, 'only Indian cars understand Indian roads'."
        );
        assert_eq!(
            c.clean("Why did the chai blush? It saw the milk!\" Hope you enjoy it!"),
            "Why did the chai blush? It saw the milk!"
        );
    }

    #[test]
    fn test_open_quote_tracking() {
        assert_eq!(open_quotes("Mummy's tiffin", QuoteKind::Single), 0);
        assert_eq!(open_quotes("he said 'hi", QuoteKind::Single), 1);
        assert_eq!(open_quotes("he said 'hi' twice", QuoteKind::Single), 0);
        assert_eq!(open_quotes("“wow", QuoteKind::Double), 1);
        assert_eq!(open_quotes("\"a\" and \"b", QuoteKind::Double), 1);
        assert_eq!(drop_orphan_quotes("late.\"`"), "late.");
        assert_eq!(drop_orphan_quotes("hours\"."), "hours.");
    }

    #[test]
    fn test_markdown_bullets_and_newlines() {
        let raw = "**Joke:** 1. Why did the cricket player go to the bank?\nTo get his balance! Hope you enjoy it! 😂";
        assert_eq!(
            cleaner().clean(raw),
            "Why did the cricket player go to the bank? To get his balance!"
        );
    }

    #[test]
    fn test_quotes_and_code_markers() {
        assert_eq!(
            cleaner().clean("`\"Why was the dosa always calm? It never lost its cool.\"`"),
            "Why was the dosa always calm? It never lost its cool."
        );
    }

    #[test]
    fn test_trailing_commentary_removed() {
        let c = cleaner();
        assert_eq!(
            c.clean("Why did the dosa blush? It saw the sambar dressing! *winks*"),
            "Why did the dosa blush? It saw the sambar dressing!"
        );
        assert_eq!(
            c.clean("My neighbour aunty knows my results before me. Haha, classic!"),
            "My neighbour aunty knows my results before me."
        );
        assert_eq!(
            c.clean("Papa says the AC is only for guests. Let me know if you want another!"),
            "Papa says the AC is only for guests."
        );
    }

    #[test]
    fn test_tracking_tokens_removed() {
        let c = cleaner();
        assert_eq!(
            c.clean("Why did the rickshaw driver fail his exam? He took too many shortcuts! Session: a8f3k2 Seed: 99812"),
            "Why did the rickshaw driver fail his exam? He took too many shortcuts!"
        );
        assert_eq!(
            c.clean("[session: abc123] Mummy's tiffin always wins the lunch break 2024-03-01T10:22:11Z"),
            "Mummy's tiffin always wins the lunch break."
        );
    }

    #[test]
    fn test_terminal_punctuation_runs_collapse() {
        assert_eq!(
            cleaner().clean("Why did the samosa go to school?? Because it wanted to be crispier!!!"),
            "Why did the samosa go to school. Because it wanted to be crispier."
        );
    }

    #[test]
    fn test_trailing_separators_and_missing_period() {
        assert_eq!(
            cleaner().clean("Every Indian wedding has one uncle who dances like nobody is watching,"),
            "Every Indian wedding has one uncle who dances like nobody is watching."
        );
    }

    #[test]
    fn test_residual_asides_removed() {
        let c = cleaner();
        assert_eq!(
            c.clean("Why did the chai go to therapy? It was steeped in problems. This joke plays on the word steeped."),
            "Why did the chai go to therapy? It was steeped in problems."
        );
        assert_eq!(
            c.clean("Why was the cricket ball sad? It kept getting hit (pun intended)"),
            "Why was the cricket ball sad? It kept getting hit."
        );
        assert_eq!(
            c.clean("Why was the exam hall quiet? Everyone was thinking hard. Note that this works best in Hindi."),
            "Why was the exam hall quiet? Everyone was thinking hard."
        );
    }

    #[test]
    fn test_too_short_is_unusable() {
        let c = cleaner();
        assert_eq!(c.clean(""), "");
        assert_eq!(c.clean("   \n\t "), "");
        assert_eq!(c.clean("Okay!"), "");
        assert_eq!(c.clean("Ha ha"), "");
    }

    #[test]
    fn test_idempotent_on_clean_output() {
        let c = cleaner();
        let inputs = [
            "Here's a joke: Why did the chicken cross the road?",
            "- \"Why did the cricket player go to the bank?\"\n\"To get his balance!\" lol",
            "Sure, here's another joke:\n\n1) Why do aunties love weddings?? Free gossip!!! Hope this made you smile.",
            "What do you call a lazy kangaroo? A pouch potato! Seed: 12ab",
            "Why did the rickshaw stop? It was tyred (get it?) *laughs*",
        ];
        for input in inputs {
            let once = c.clean(input);
            assert_eq!(c.clean(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_output_invariants() {
        let c = cleaner();
        let inputs = [
            "> ## **Joke:**\n\n* 'Why did the ghee feel proud?'\n\n'It was clarified!'",
            "a) Why does papa check the electricity bill twice? Because once is never enough.",
            "Token: zz9 \"Why is Mumbai traffic like a Bollywood movie? Both take three hours\"",
            "`1. Why is the chai always early? It never wants to be late-te.`\n\nEnjoy! 😄",
        ];
        for input in inputs {
            let out = c.clean(input);
            assert!(!out.contains('\n'), "{:?}", out);
            assert!(!out.starts_with(['"', '`', '\'']), "{:?}", out);
            assert!(!out.starts_with(['-', '*', '•']), "{:?}", out);
            assert!(!out.chars().next().map_or(false, |c| c.is_ascii_digit()), "{:?}", out);
            assert!(!out.contains("**"), "{:?}", out);
            assert!(out.is_empty() || out.ends_with(['.', '!', '?']), "{:?}", out);
            assert_eq!(out, out.trim());
        }
    }

    #[test]
    fn test_basic_cleaner() {
        let c = BasicCleaner::new();
        assert_eq!(
            c.clean("  \"Why did the chai\ncross the road\"  "),
            "Why did the chai cross the road."
        );
        assert_eq!(c.clean("Too short"), "");
        assert_eq!(c.name(), "basic");
    }
}
