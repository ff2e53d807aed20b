// Built-in pattern and vocabulary tables
use super::{
    CategoryVocabulary, CleaningConfig, ComplexTerm, CulturalTiers, NamedPattern,
    NormalizationPattern, StructuresConfig, VocabularyConfig, WeightedPattern,
};

fn rule(name: &str, pattern: &str, replacement: &str, priority: u8) -> NormalizationPattern {
    NormalizationPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        priority,
    }
}

fn named(name: &str, pattern: &str) -> NamedPattern {
    NamedPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
    }
}

fn weighted(name: &str, pattern: &str, weight: u32) -> WeightedPattern {
    WeightedPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
        weight,
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn complex(term: &str, simple: &str) -> ComplexTerm {
    ComplexTerm {
        term: term.to_string(),
        simple: simple.to_string(),
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                rule(
                    "title_header",
                    r"(?i)^[\s#*_]*title\s*[*_]*\s*:[^\n]*\n\s*",
                    "",
                    0,
                ),
                rule(
                    "sure_opener",
                    r"(?i)^\s*(?:sure|okay|ok|alright|certainly|absolutely|of course|got it)\b(?:\s+thing)?\s*[,!.:\-–—]+\s*",
                    "",
                    1,
                ),
                rule(
                    "heres_a_joke",
                    r"(?i)^\s*here(?:'s|’s|\s+is|\s+are|s)\s+(?:(?:a|an|another|one|my|your|the|this)\s+)?(?:[\w'’-]+\s+){0,3}?(?:joke|punchline|pun|one-liner)s?\b(?:\s+for\s+you\b)?(?:\s+(?:about|on|for)\s+[^:.!?\n]{1,40}[:.!\-–—]+)?\s*[:.!\-–—]*\s*",
                    "",
                    2,
                ),
                rule(
                    "heres_one",
                    r"(?i)^\s*here(?:'s|’s|\s+is|\s+are|s)\s+(?:(?:a|an)\s+)?(?:[\w'’-]+\s+){0,2}?(?:one|another(?:\s+one)?|something)\b(?:\s+for\s+you\b)?(?:\s+(?:about|on|for)\s+[^:.!?\n]{1,40})?\s*[:.!\-–—]+\s*",
                    "",
                    2,
                ),
                rule(
                    "here_it_goes",
                    r"(?i)^\s*here\s+(?:it\s+goes|goes|you\s+go)\s*[:.!\-–—]*\s*",
                    "",
                    3,
                ),
                rule(
                    "label",
                    r"(?i)^\s*(?:joke|answer|response|output|punchline|result)\s*\d*\s*[:\-–—]+\s*",
                    "",
                    4,
                ),
            ],
            wrappers: vec![
                rule("bold_markers", r"\*\*|__", "", 1),
                rule("code_markers", r"`+", "", 1),
                rule("heading", r"^\s*#{1,6}\s*", "", 2),
                rule("blockquote", r"^\s*>+\s*", "", 2),
                rule("quoted_lines", r#"([.!?])["'”’]+[ \t]*\n\s*["'“‘]+"#, "$1\n", 2),
                rule("leading_quotes", r#"^[\s"'“”‘’]+"#, "", 3),
                rule("closing_emphasis", r"([.!?])\*+\s*$", "$1", 4),
            ],
            list_markers: vec![
                rule("bullet", r"^\s*[-*•·–—]+\s+", "", 1),
                rule("numbered", r"^\s*\(?\d{1,3}[.)\]:]\s+", "", 2),
                rule("lettered", r"^\s*\(?[a-zA-Z][.)]\s+", "", 3),
            ],
            trailing_commentary: vec![
                rule("emoji", r"[\p{Extended_Pictographic}\x{FE0F}\x{200D}]", "", 0),
                rule(
                    "hope_you_enjoy",
                    r#"(?i)([.!?]["'”’]*)\s+(?:i\s+)?hope\s+(?:you|this|that|it|u)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    1,
                ),
                rule(
                    "enjoy",
                    r#"(?i)([.!?]["'”’]*)\s+(?:enjoy|have fun|happy laughing)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    1,
                ),
                rule(
                    "follow_up_offer",
                    r#"(?i)([.!?]["'”’]*)\s+(?:let me know|want another|would you like|need more|feel free)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    1,
                ),
                rule(
                    "interjection",
                    r#"(?i)([.!?]["'”’]*)\s+(?:ha(?:ha)+|he(?:he)+|lol|lmao|rofl|ba\s*dum\s*(?:tss?|ching)|rimshot)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    2,
                ),
                rule(
                    "stage_direction",
                    r"(?i)\s*[*(]+\s*(?:laughs|giggles|chuckles|winks|grins|smiles|drumroll)\s*[*)]*[.!]*\s*$",
                    "",
                    2,
                ),
                rule(
                    "disclaimer",
                    r#"(?i)([.!?]["'”’]*)\s+(?:disclaimer|no offen[cs]e|just kidding)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    3,
                ),
            ],
            tracking_tokens: vec![
                rule(
                    "labeled_token",
                    r"(?i)[\[(]?\b(?:session|seed|id|token|ref|timestamp)\s*[:=#]\s*[\w\-:.]+[\])]?",
                    "",
                    1,
                ),
                rule(
                    "iso_timestamp",
                    r"\b\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?\b",
                    "",
                    2,
                ),
                rule("epoch_marker", r"\[\d{10,13}\]", "", 2),
            ],
            residual_asides: vec![
                rule(
                    "explanation",
                    r#"(?i)([.!?]["'”’]*)\s+(?:explanation|why (?:it|this) works|why it'?s funny)\s*:.*$"#,
                    "$1",
                    0,
                ),
                rule(
                    "joke_reference",
                    r#"(?i)([.!?]["'”’]*)\s+(?:this|the|my|that)\s+joke\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    1,
                ),
                rule(
                    "instructional",
                    r#"(?i)([.!?]["'”’]*)\s+(?:remember|note that|note|keep in mind|fun fact)\b[^.!?]*[.!?]*\s*$"#,
                    "$1",
                    1,
                ),
                rule("parenthetical", r"\s*\([^()]*\)[.!?]*\s*$", "", 2),
                rule("asterisk_aside", r"\s*\*[^*]+\*[.!?]*\s*$", "", 2),
                rule("stray_asterisks", r"\*+", "", 3),
            ],
        }
    }
}

impl Default for CulturalTiers {
    fn default() -> Self {
        Self {
            high_weight: 3,
            medium_weight: 2,
            basic_weight: 1,
            high: terms(&[
                "cricket",
                "bollywood",
                "chai",
                "samosa",
                "diwali",
                "holi",
                "biryani",
                "jugaad",
                "arranged marriage",
                "dabbawala",
                "rickshaw",
                "autorickshaw",
                "ipl",
                "masala",
                "desi",
                "mehndi",
                "sangeet",
                "baraat",
                "shaadi",
                "pani puri",
                "golgappa",
                "dosa",
                "tiffin",
                "chaiwala",
                "jalebi",
            ]),
            medium: terms(&[
                "aunty",
                "aunties",
                "uncle",
                "beta",
                "mummy",
                "papa",
                "nani",
                "dadi",
                "chacha",
                "mausi",
                "bhaiya",
                "didi",
                "rangoli",
                "ladoo",
                "paratha",
                "roti",
                "dal",
                "curry",
                "lassi",
                "ghee",
                "sabzi",
                "namaste",
                "puja",
                "mandir",
                "tuition",
                "board exams",
                "engineer",
                "neighbours",
                "relatives",
            ]),
            basic: terms(&[
                "india",
                "indian",
                "family",
                "festival",
                "wedding",
                "train",
                "traffic",
                "exam",
                "school",
                "neighbor",
                "neighbour",
                "monsoon",
                "tea",
                "spicy",
                "office",
                "boss",
                "salary",
                "marks",
                "party",
            ]),
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            cultural: CulturalTiers::default(),
            specific_entities: terms(&[
                "mumbai",
                "delhi",
                "bangalore",
                "bengaluru",
                "kolkata",
                "chennai",
                "hyderabad",
                "pune",
                "goa",
                "sachin",
                "dhoni",
                "kohli",
                "virat",
                "shah rukh",
                "amitabh",
                "rajinikanth",
                "sharma ji",
                "sharmaji",
                "gupta ji",
                "pappu",
                "chintu",
                "bunty",
                "taj mahal",
                "ganga",
            ]),
            family: CategoryVocabulary {
                cultural_elements: terms(&[
                    "family",
                    "mummy",
                    "papa",
                    "beta",
                    "nani",
                    "dadi",
                    "school",
                    "teacher",
                    "exam",
                    "homework",
                    "tiffin",
                    "cricket",
                    "festival",
                    "diwali",
                    "holi",
                    "chai",
                    "relatives",
                    "kids",
                ]),
                excellence_terms: terms(&[
                    "whole family",
                    "kids",
                    "grandparents",
                    "grandma",
                    "homework",
                    "celebration",
                    "festival",
                    "party",
                    "sweets",
                    "vacation",
                ]),
            },
            adult: CategoryVocabulary {
                cultural_elements: terms(&[
                    "office",
                    "boss",
                    "salary",
                    "marriage",
                    "wife",
                    "husband",
                    "in-laws",
                    "mother-in-law",
                    "traffic",
                    "emi",
                    "loan",
                    "taxes",
                    "arranged marriage",
                    "shaadi",
                    "appraisal",
                    "monday",
                ]),
                excellence_terms: terms(&[
                    "corporate",
                    "appraisal",
                    "work from home",
                    "emi",
                    "in-laws",
                    "office politics",
                    "salary hike",
                    "deadline",
                    "meeting",
                ]),
            },
            colloquial: terms(&[
                "yaar",
                "arre",
                "arrey",
                "bhai",
                "achha",
                "accha",
                "bas",
                "chalo",
                "oye",
                "haan",
                "nahi",
                "kya",
                "matlab",
                "ji",
                "boss",
                "tension",
                "timepass",
                "what to do",
                "no problem",
                "simply",
            ]),
            wordplay_indicators: terms(&[
                "pun",
                "literally",
                "get it",
                "no wonder",
                "turns out",
                "thats why",
                "sounds like",
                "double meaning",
                "in other words",
            ]),
            surprise_words: terms(&[
                "but",
                "instead",
                "suddenly",
                "actually",
                "except",
                "however",
                "turns out",
                "only to",
            ]),
            complex_terms: vec![
                complex("consequently", "so"),
                complex("nevertheless", "still"),
                complex("nonetheless", "still"),
                complex("furthermore", "also"),
                complex("approximately", "about"),
                complex("utilize", "use"),
                complex("sophisticated", "fancy"),
                complex("paradigm", "model"),
                complex("quintessential", "typical"),
                complex("simultaneously", "together"),
                complex("subsequently", "later"),
                complex("notwithstanding", "despite"),
                complex("methodology", "method"),
                complex("commence", "start"),
                complex("terminate", "end"),
                complex("endeavour", "try"),
                complex("endeavor", "try"),
                complex("ameliorate", "improve"),
                complex("facilitate", "help"),
                complex("comprehend", "understand"),
                complex("demonstrate", "show"),
                complex("individuals", "people"),
                complex("aforementioned", "that"),
                complex("juxtaposition", "contrast"),
                complex("ubiquitous", "common"),
                complex("circumstances", "situation"),
            ],
        }
    }
}

impl Default for StructuresConfig {
    fn default() -> Self {
        Self {
            humor_patterns: vec![
                weighted("why_because", r"(?i)\bwhy\b.*\bbecause\b", 4),
                weighted("what_do_you_call", r"(?i)\bwhat do you call\b", 3),
                weighted("question_answer", r"^[^?]{8,}\?\s*\S", 3),
                weighted("knock_knock", r"(?i)\bknock,?\s+knock\b", 3),
                weighted("difference_between", r"(?i)\bdifference between\b", 3),
                weighted("dialogue", r"(?i)\b(?:said|asked|replied|told)\b", 2),
                weighted("teacher_student", r"(?i)\bteacher\b.*\b(?:student|pappu|beta|class)\b", 2),
                weighted("when_then", r"(?i)\bwhen\b.*\bthen\b", 2),
            ],
            dialect_patterns: vec![
                named("question_tag", r"(?i)\b(?:na|no|isn't it|right)\s*\?"),
                named("why_question", r"(?i)\bwhy\b[^?]*\?"),
                named("what_question", r"(?i)\bwhat\b[^?]*\?"),
                named("only_emphasis", r"(?i)\bonly\b"),
                named("itself_emphasis", r"(?i)\bitself\b"),
                named("exclamation", r"!"),
                named("do_one_thing", r"(?i)\bdo one thing\b"),
                named("what_to_do", r"(?i)\bwhat to do\b"),
                named("kindly", r"(?i)\bkindly\b"),
                named("prepone", r"(?i)\bprepone\b"),
            ],
            conversational_patterns: vec![
                named("question_mark", r"\?"),
                named("contraction", r"(?i)\b\w+['’](?:s|t|re|ve|ll|d|m)\b"),
            ],
            duplicate_patterns: vec![
                named("why_because", r"\bwhy\b.*\bbecause\b"),
                named("what_do_you_call", r"\bwhat do you call\b"),
                named("knock_knock", r"\bknock knock\b"),
                named("difference_between", r"\bdifference between\b"),
                named("teacher_student", r"\bteacher\b.*\b(?:student|pappu|class)\b"),
                named("cricket_exam", r"\bcricket\b.*\bexams?\b|\bexams?\b.*\bcricket\b"),
                named("aunty_marriage", r"\baunty\b.*\b(?:marriage|shaadi)\b"),
                named("chai_samosa", r"\bchai\b.*\bsamosa\b|\bsamosa\b.*\bchai\b"),
                named("boss_salary", r"\bboss\b.*\bsalary\b|\bsalary\b.*\bboss\b"),
            ],
        }
    }
}
