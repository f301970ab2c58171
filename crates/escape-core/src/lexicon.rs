//! Shared lexical tables and token scanners.
//!
//! Everything here is immutable static data or a pure function over a
//! `&str`, shared by the classifier and the strategies.

use regex::Regex;
use std::sync::OnceLock;

/// Words whose presence marks decrypted text as plausible English
pub const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "has", "have", "hello", "world", "key", "door", "open", "code", "under", "find",
    "this", "that", "with", "escape",
];

/// Short words that never count as cipher tokens even when uppercased
const PLAIN_UPPERCASE: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "WAS", "ONE", "OUR", "OUT",
    "HAS", "KEY", "DOOR", "OPEN", "CODE", "LOCK", "WHAT", "WHO", "AM", "IS", "OK", "PIN",
    "HELP", "EXIT", "NOTE",
];

// ==================== Roman numerals ====================

fn roman_value(c: char) -> Option<u32> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Convert a Roman numeral with subtractive notation; the empty string is 0.
///
/// Scans right to left, subtracting a symbol whenever a symbol to its right
/// is worth more. Returns `None` for characters outside `IVXLCDM`.
pub fn roman_to_decimal(numeral: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut prev = 0;
    for c in numeral.chars().rev() {
        let value = roman_value(c.to_ascii_uppercase())?;
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total = total.checked_add(value)?;
            prev = value;
        }
    }
    Some(total)
}

/// Canonical Roman numeral for `n` (1..=3999).
pub fn decimal_to_roman(mut n: u32) -> Option<String> {
    const TABLE: &[(u32, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if n == 0 || n > 3999 {
        return None;
    }
    let mut out = String::new();
    for &(value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}

fn roman_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[IVXLCDM]+\b").expect("static regex"))
}

/// Roman-numeral tokens of the text, in order, with their values.
///
/// Only canonical numerals count (`IIII` and `CIVIL` do not). A lone `I`
/// reads as the pronoun unless every word of the text is a numeral.
pub fn roman_tokens(text: &str) -> Vec<(String, u32)> {
    let tokens: Vec<(String, u32)> = roman_regex()
        .find_iter(text)
        .filter_map(|m| {
            let token = m.as_str();
            let value = roman_to_decimal(token)?;
            (decimal_to_roman(value).as_deref() == Some(token)).then(|| (token.to_string(), value))
        })
        .collect();

    let all_numerals = words(text).len() == tokens.len();
    tokens
        .into_iter()
        .filter(|(token, _)| token != "I" || all_numerals)
        .collect()
}

// ==================== Words and digits ====================

fn digit_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

/// Maximal runs of ASCII digits, in order
pub fn digit_runs(text: &str) -> Vec<&str> {
    digit_run_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Signed integers in the text, in order; runs that overflow are skipped
pub fn integers(text: &str) -> Vec<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"-?[0-9]+").expect("static regex"));
    re.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Whitespace-delimited tokens with surrounding punctuation trimmed
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_plain_word(word: &str) -> bool {
    PLAIN_UPPERCASE
        .iter()
        .chain(COMMON_WORDS)
        .any(|p| p.eq_ignore_ascii_case(word))
}

/// Uppercase alphabetic tokens (3+ letters) that are not ordinary words.
///
/// Empty when any uppercase word is ordinary English: `PUSH THE RED BUTTON`
/// is shouted plaintext, not ciphertext.
pub fn cipher_tokens(text: &str) -> Vec<&str> {
    let upper: Vec<&str> = words(text)
        .into_iter()
        .filter(|w| w.len() >= 2 && w.chars().all(|c| c.is_ascii_uppercase()))
        .collect();
    if upper.iter().any(|w| is_plain_word(w)) {
        return Vec::new();
    }
    upper.into_iter().filter(|w| w.len() >= 3).collect()
}

/// Number of ASCII letters in the text
pub fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_alphabetic()).count()
}

/// Share of vowels among ASCII letters; `None` without letters
pub fn vowel_ratio(text: &str) -> Option<f32> {
    let letters = letter_count(text);
    if letters == 0 {
        return None;
    }
    let vowels = text
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    Some(vowels as f32 / letters as f32)
}

/// Case-insensitive substring test against [`COMMON_WORDS`]
pub fn contains_common_word(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMMON_WORDS.iter().any(|w| lower.contains(w))
}

/// Vowel ratio within the usual range of English prose
pub fn looks_like_english(text: &str) -> bool {
    letter_count(text) >= 5 && vowel_ratio(text).is_some_and(|r| (0.3..=0.5).contains(&r))
}

/// Glyphs used when pigpen symbols are transcribed
pub const PIGPEN_GLYPHS: &[char] = &[
    '⊔', '⊓', '⊏', '⊐', '□', '⌐', '¬', '∟', 'ᒣ', 'ᒥ', 'ᒧ', 'ᒪ', '∨', '∧', '⊡', '⊻',
];

/// Whether any pigpen glyph appears in the text
pub fn has_pigpen(text: &str) -> bool {
    text.chars().any(|c| PIGPEN_GLYPHS.contains(&c))
}

/// Whether any word of the text starts with one of the stems
pub fn has_word_stem(text: &str, stems: &[&str]) -> bool {
    words(text).into_iter().any(|w| {
        let lower = w.to_lowercase();
        stems.iter().any(|s| lower.starts_with(s))
    })
}

// ==================== Directions ====================

/// One step of a directional lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a word or arrow glyph
    pub fn from_token(token: &str) -> Option<Direction> {
        match token.to_lowercase().as_str() {
            "up" | "north" | "↑" | "^" => Some(Direction::Up),
            "down" | "south" | "↓" => Some(Direction::Down),
            "left" | "west" | "←" | "<-" => Some(Direction::Left),
            "right" | "east" | "→" | "->" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Directions in the phrase, in order of appearance.
    pub fn scan(phrase: &str) -> Vec<Direction> {
        let spaced: String = phrase
            .chars()
            .flat_map(|c| match c {
                '↑' | '↓' | '←' | '→' => vec![' ', c, ' '],
                c if c.is_alphanumeric() => vec![c],
                _ => vec![' '],
            })
            .collect();
        spaced.split_whitespace().filter_map(Direction::from_token).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
