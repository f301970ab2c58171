//! Puzzle-type classification from raw text.
//!
//! Each puzzle type has an independent set of signal tests. A signal adds
//! a fixed weight to its type's plausibility score (capped at 100); types
//! whose score clears the bar are reported, strongest first. Classification
//! is a pure function of the text and never fails.

use crate::context::KNOWN_LOCK_WIDTHS;
use crate::lexicon::{
    cipher_tokens, digit_runs, has_pigpen, has_word_stem, letter_count, roman_tokens,
    vowel_ratio, words, Direction,
};
use crate::strategy::{action_verb, is_morse, Anagram, Base64, WordLock, MECHANISM_NOUNS};
use crate::types::PuzzleType;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Default plausibility bar
pub const DEFAULT_MIN_PLAUSIBILITY: u8 = 20;

const LOCK_STEMS: &[&str] = &["lock", "padlock", "combination", "dial", "digit", "wheel", "code"];
const CIPHER_STEMS: &[&str] = &["cipher", "decod", "decrypt", "encrypt", "encod", "shift"];
const PATTERN_STEMS: &[&str] = &["sequence", "pattern", "series", "next"];
const MATH_STEMS: &[&str] = &["sum", "total", "calculat", "multipl", "equation", "divide"];
const RIDDLE_STEMS: &[&str] = &["riddle", "guess"];
const INTERROGATIVES: &[&str] = &["what", "who", "where", "which", "how", "why", "when"];
const FIRST_PERSON: &[&str] = &["i have", "i am", "i can", "what am i", "who am i", "i speak"];

// ==================== Scores ====================

/// One type's plausibility score and the signals behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plausibility {
    pub puzzle_type: PuzzleType,
    pub score: u8,
    pub signals: Vec<&'static str>,
}

impl Plausibility {
    fn new(puzzle_type: PuzzleType) -> Self {
        Self {
            puzzle_type,
            score: 0,
            signals: Vec::new(),
        }
    }

    fn add(&mut self, fired: bool, weight: u8, signal: &'static str) {
        if fired {
            self.score = self.score.saturating_add(weight).min(100);
            self.signals.push(signal);
        }
    }
}

impl std::fmt::Display for Plausibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [{}]", self.puzzle_type, self.score, self.signals.join(", "))
    }
}

// ==================== Classifier ====================

/// Scores puzzle text against every puzzle type.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    min_plausibility: u8,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            min_plausibility: DEFAULT_MIN_PLAUSIBILITY,
        }
    }

    /// A classifier reporting types that score at least `bar`; a bar of 0
    /// is raised to 1 so unsignalled types never appear.
    pub fn with_min_plausibility(bar: u8) -> Self {
        Self {
            min_plausibility: bar.max(1),
        }
    }

    pub fn min_plausibility(&self) -> u8 {
        self.min_plausibility
    }

    /// Scores for every type, in `PuzzleType::all()` order.
    pub fn score_all(&self, text: &str) -> Vec<Plausibility> {
        vec![
            score_lock(text),
            score_cipher(text),
            score_riddle(text),
            score_pattern(text),
            score_math(text),
            score_mechanism(text),
        ]
    }

    /// Types that clear the bar, highest score first; ties keep
    /// `PuzzleType::all()` order.
    pub fn scored(&self, text: &str) -> Vec<Plausibility> {
        let mut scores: Vec<Plausibility> = self
            .score_all(text)
            .into_iter()
            .filter(|p| p.score >= self.min_plausibility)
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        for p in &scores {
            debug!("classified {}", p);
        }
        scores
    }

    /// Plausible puzzle types, strongest first, without duplicates.
    pub fn classify(&self, text: &str) -> Vec<PuzzleType> {
        self.scored(text).into_iter().map(|p| p.puzzle_type).collect()
    }
}

/// Classify with the default bar.
pub fn classify(text: &str) -> Vec<PuzzleType> {
    Classifier::new().classify(text)
}

// ==================== Signals ====================

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

fn score_lock(text: &str) -> Plausibility {
    let mut p = Plausibility::new(PuzzleType::Lock);
    let directions = Direction::scan(text).len();
    p.add(!roman_tokens(text).is_empty(), 60, "roman-numerals");
    p.add(
        digit_runs(text)
            .iter()
            .any(|run| KNOWN_LOCK_WIDTHS.contains(&run.len())),
        45,
        "lock-width-digits",
    );
    p.add(directions >= 2, 45, "direction-sequence");
    p.add(directions == 1, 15, "direction");
    p.add(has_word_stem(text, LOCK_STEMS), 30, "lock-vocabulary");
    p.add(WordLock::infer_length(text).is_some(), 30, "letter-count");
    p
}

fn score_cipher(text: &str) -> Plausibility {
    let mut p = Plausibility::new(PuzzleType::Cipher);
    let all_words = words(text);
    let romans = roman_tokens(text);
    let tokens: Vec<&str> = cipher_tokens(text)
        .into_iter()
        .filter(|t| !romans.iter().any(|(numeral, _)| numeral.as_str() == *t))
        .collect();
    let lettered = all_words
        .iter()
        .filter(|w| w.chars().any(|c| c.is_ascii_alphabetic()))
        .count();

    p.add(is_morse(text), 95, "morse");
    p.add(Base64::matches(text), 70, "base64");
    p.add(has_pigpen(text), 60, "pigpen-glyphs");
    p.add(
        !tokens.is_empty() && tokens.len() == lettered,
        50,
        "all-uppercase-gibberish",
    );
    p.add(
        !tokens.is_empty() && tokens.len() < lettered,
        30,
        "uppercase-gibberish",
    );
    p.add(
        letter_count(text) >= 10 && vowel_ratio(text).is_some_and(|r| !(0.25..=0.6).contains(&r)),
        25,
        "unusual-letter-frequency",
    );
    p.add(Anagram::mentioned(text), 50, "anagram-vocabulary");
    p.add(has_word_stem(text, CIPHER_STEMS), 30, "cipher-vocabulary");
    p
}

fn score_riddle(text: &str) -> Plausibility {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    let mut p = Plausibility::new(PuzzleType::Riddle);
    let lower = text.to_lowercase();
    let interrogative = regex(&SENTENCE, r"[.?!,;:]")
        .split(&lower)
        .filter_map(|sentence| words(sentence).into_iter().next())
        .any(|first| INTERROGATIVES.contains(&first));

    p.add(text.contains('?'), 25, "question");
    p.add(interrogative, 20, "interrogative");
    p.add(
        FIRST_PERSON.iter().any(|phrase| {
            lower.starts_with(phrase) || lower.contains(&format!(" {}", phrase))
        }),
        45,
        "first-person",
    );
    p.add(has_word_stem(text, RIDDLE_STEMS), 30, "riddle-vocabulary");
    p
}

fn score_pattern(text: &str) -> Plausibility {
    static SEQUENCE: OnceLock<Regex> = OnceLock::new();
    let mut p = Plausibility::new(PuzzleType::Pattern);
    let sequence = regex(
        &SEQUENCE,
        r"-?[0-9]+(?:\s*(?:,|->|→)\s*-?[0-9]+){2,}",
    );
    p.add(sequence.is_match(text), 70, "number-sequence");
    p.add(has_word_stem(text, PATTERN_STEMS), 25, "pattern-vocabulary");
    p
}

fn score_math(text: &str) -> Plausibility {
    static OPERATOR: OnceLock<Regex> = OnceLock::new();
    static VARIABLE: OnceLock<Regex> = OnceLock::new();
    let mut p = Plausibility::new(PuzzleType::Math);
    let has_digits = text.chars().any(|c| c.is_ascii_digit());
    p.add(has_digits && text.contains('='), 40, "equals");
    p.add(
        regex(&OPERATOR, r"[0-9]\s*[-+*/×x]\s*[0-9]").is_match(text),
        30,
        "operator",
    );
    p.add(
        regex(&VARIABLE, r"(?:^|[\s(])[0-9]*[a-z]\s*[-+*/=]").is_match(text),
        30,
        "variable",
    );
    p.add(
        has_digits && has_word_stem(text, MATH_STEMS),
        20,
        "math-vocabulary",
    );
    p
}

fn score_mechanism(text: &str) -> Plausibility {
    let mut p = Plausibility::new(PuzzleType::Mechanism);
    let verbs = text
        .split_whitespace()
        .filter(|w| action_verb(w).is_some())
        .count();
    p.add(verbs >= 2, 50, "action-verbs");
    p.add(
        verbs >= 1 && has_word_stem(text, MECHANISM_NOUNS),
        30,
        "mechanism-parts",
    );
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roman_lock() {
        assert_eq!(classify("XIV XIX"), vec![PuzzleType::Lock]);
    }

    #[test]
    fn test_caesar_text_is_cipher() {
        assert_eq!(classify("KHOOR ZRUOG"), vec![PuzzleType::Cipher]);
    }

    #[test]
    fn test_shouted_plaintext_is_not_cipher() {
        let types = classify("PUSH THE RED BUTTON NOW");
        assert!(!types.contains(&PuzzleType::Cipher));
        assert!(types.contains(&PuzzleType::Mechanism));
    }

    #[test]
    fn test_morse_is_cipher() {
        let types = classify(".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
        assert_eq!(types.first(), Some(&PuzzleType::Cipher));
    }

    #[test]
    fn test_sequence_is_pattern() {
        let types = classify("What comes next in the sequence: 2, 4, 6, 8, ?");
        assert_eq!(types.first(), Some(&PuzzleType::Pattern));
    }

    #[test]
    fn test_equation_is_math() {
        let types = classify("If the code is 15 + 27 = ?, what is the combination?");
        assert_eq!(types.first(), Some(&PuzzleType::Math));
        assert!(types.contains(&PuzzleType::Lock));
    }

    #[test]
    fn test_riddle() {
        let types = classify(
            "I have keys but no locks. I have space but no room. \
             You can enter but can't go outside. What am I?",
        );
        assert_eq!(types.first(), Some(&PuzzleType::Riddle));
    }

    #[test]
    fn test_mechanism() {
        let types = classify("Pull the red lever, then press the green button");
        assert!(types.contains(&PuzzleType::Mechanism));
    }

    #[test]
    fn test_no_duplicates_and_empty_input() {
        let types = classify("Turn the dial left, then right, then left: 3 numbers");
        let mut deduped = types.clone();
        deduped.dedup();
        assert_eq!(types, deduped);
        assert!(classify("").is_empty());
        assert!(classify("   ").is_empty());
    }

    #[test]
    fn test_bar_filters_weak_signals() {
        let text = "the wheel";
        assert_eq!(Classifier::new().classify(text), vec![PuzzleType::Lock]);
        assert!(Classifier::with_min_plausibility(40).classify(text).is_empty());
    }

    #[test]
    fn test_scores_explain_themselves() {
        let scores = Classifier::new().scored("XIV XIX");
        assert!(scores[0].signals.contains(&"roman-numerals"));
    }
}
