//! Cipher strategies: Caesar, Atbash, Morse, substitution, Base64, anagram.

use super::{Attempt, Strategy};
use crate::context::SolveContext;
use crate::lexicon::{contains_common_word, has_pigpen, letter_count, looks_like_english, words};
use crate::types::{Difficulty, HintLevel, PuzzleType, SolutionCandidate};
use base64::Engine as _;
use std::collections::BTreeMap;

/// Placeholder for Morse groups missing from the table
pub const MORSE_PLACEHOLDER: char = '?';

/// Minimum letters before a text is treated as ciphertext
const MIN_CIPHER_LETTERS: usize = 5;

const DEFAULT_CAESAR_SHIFT: u8 = 3;

const MORSE_TABLE: &[(&str, char)] = &[
    (".-", 'A'),
    ("-...", 'B'),
    ("-.-.", 'C'),
    ("-..", 'D'),
    (".", 'E'),
    ("..-.", 'F'),
    ("--.", 'G'),
    ("....", 'H'),
    ("..", 'I'),
    (".---", 'J'),
    ("-.-", 'K'),
    (".-..", 'L'),
    ("--", 'M'),
    ("-.", 'N'),
    ("---", 'O'),
    (".--.", 'P'),
    ("--.-", 'Q'),
    (".-.", 'R'),
    ("...", 'S'),
    ("-", 'T'),
    ("..-", 'U'),
    ("...-", 'V'),
    (".--", 'W'),
    ("-..-", 'X'),
    ("-.--", 'Y'),
    ("--..", 'Z'),
    ("-----", '0'),
    (".----", '1'),
    ("..---", '2'),
    ("...--", '3'),
    ("....-", '4'),
    (".....", '5'),
    ("-....", '6'),
    ("--...", '7'),
    ("---..", '8'),
    ("----.", '9'),
    (".-.-.-", '.'),
    ("--..--", ','),
    ("-.-.--", '!'),
];

fn shift_letter(c: char, shift: u8) -> char {
    let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
    let offset = (c as u8 - base + 26 - shift % 26) % 26;
    (base + offset) as char
}

/// Shift every ASCII letter back by `shift`, preserving case.
pub fn caesar_decrypt(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                shift_letter(c, shift)
            } else {
                c
            }
        })
        .collect()
}

/// Reflect every ASCII letter across the alphabet (A<->Z), preserving case.
pub fn atbash(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'A'..='Z' => (b'Z' - (c as u8 - b'A')) as char,
            'a'..='z' => (b'z' - (c as u8 - b'a')) as char,
            _ => c,
        })
        .collect()
}

/// Whether the text is made only of dots, dashes, spaces and slashes.
pub fn is_morse(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| matches!(c, '.' | '-' | ' ' | '/'))
        && trimmed.chars().any(|c| c == '.' || c == '-')
}

/// Decode Morse: words split on double spaces or `/`, letters on single
/// spaces. Unknown groups decode to [`MORSE_PLACEHOLDER`].
pub fn morse_decode(text: &str) -> String {
    let normalized = text.trim().replace('/', "  ");
    normalized
        .split("  ")
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|word| {
            word.split_whitespace()
                .map(|group| {
                    MORSE_TABLE
                        .iter()
                        .find(|(code, _)| *code == group)
                        .map(|(_, c)| *c)
                        .unwrap_or(MORSE_PLACEHOLDER)
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_ciphertext_candidate(text: &str) -> bool {
    letter_count(text) >= MIN_CIPHER_LETTERS && !is_morse(text)
}

// ==================== Caesar ====================

/// Caesar shift cipher, with a known shift or by brute force.
#[derive(Debug, Clone, Copy, Default)]
pub struct Caesar;

impl Strategy for Caesar {
    fn name(&self) -> &'static str {
        "caesar"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        if !is_ciphertext_candidate(text) {
            return Ok(None);
        }

        if let Some(shift) = ctx.shift {
            let decoded = caesar_decrypt(text, shift);
            return Ok(Some(
                SolutionCandidate::new(format!("Caesar Cipher (shift {})", shift), self.puzzle_type())
                    .step("Identify the text as a Caesar cipher")
                    .step(format!("Shift every letter back by {} positions", shift))
                    .step("Read the decoded message")
                    .answer(decoded)
                    .confidence(90),
            ));
        }

        for shift in 1..26u8 {
            let decoded = caesar_decrypt(text, shift);
            if contains_common_word(&decoded) {
                return Ok(Some(
                    SolutionCandidate::new(
                        format!("Caesar Cipher (shift {})", shift),
                        self.puzzle_type(),
                    )
                    .step("Identify the text as a potential Caesar cipher")
                    .step("Try every shift from 1 to 25")
                    .step(format!("Shift {} produces readable English text", shift))
                    .answer(decoded)
                    .confidence(80),
                ));
            }
        }

        Ok(Some(
            SolutionCandidate::new(
                format!("Caesar Cipher (shift {})", DEFAULT_CAESAR_SHIFT),
                self.puzzle_type(),
            )
            .step("Identify the text as a potential Caesar cipher")
            .step("No shift from 1 to 25 produced common English words")
            .step(format!("Fall back to the classic shift of {}", DEFAULT_CAESAR_SHIFT))
            .answer(caesar_decrypt(text, DEFAULT_CAESAR_SHIFT))
            .confidence(25),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "The text appears to be encoded. Think about common encryption methods.",
            "Every letter may have been moved the same number of places along the alphabet.",
            "Try shifting each letter back by a fixed amount; Julius Caesar used 3.",
        ]
    }
}

// ==================== Atbash ====================

/// Mirror-alphabet cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atbash;

impl Strategy for Atbash {
    fn name(&self) -> &'static str {
        "atbash"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn attempt(&self, text: &str, _ctx: &SolveContext) -> Attempt {
        if !is_ciphertext_candidate(text) {
            return Ok(None);
        }
        let decoded = atbash(text);
        if !(looks_like_english(&decoded) && contains_common_word(&decoded)) {
            return Ok(None);
        }
        Ok(Some(
            SolutionCandidate::new("Atbash Cipher", self.puzzle_type())
                .step("Recognize the Atbash pattern (A<->Z, B<->Y, ...)")
                .step("Apply the reversed alphabet to every letter")
                .step("Read the decoded message")
                .answer(decoded)
                .confidence(70),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "The alphabet might be read from the other end.",
            "A becomes Z, B becomes Y, and so on.",
        ]
    }
}

// ==================== Morse ====================

/// Dot/dash Morse code.
#[derive(Debug, Clone, Copy, Default)]
pub struct Morse;

impl Strategy for Morse {
    fn name(&self) -> &'static str {
        "morse"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn attempt(&self, text: &str, _ctx: &SolveContext) -> Attempt {
        if !is_morse(text) {
            return Ok(None);
        }
        let decoded = morse_decode(text);
        let unknown = decoded.chars().filter(|c| *c == MORSE_PLACEHOLDER).count();

        let mut candidate = SolutionCandidate::new("Morse Code", self.puzzle_type())
            .step("Identify the Morse pattern (dots and dashes)")
            .step("Separate letters by single spaces, words by double spaces or slashes")
            .step("Translate each group with the Morse table");
        if unknown > 0 {
            candidate = candidate.step(format!(
                "{} group(s) are not in the table and are shown as '{}'",
                unknown, MORSE_PLACEHOLDER
            ));
        }
        let confidence = if unknown == 0 { 90 } else { 55 };
        Ok(Some(candidate.answer(decoded).confidence(confidence)))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "Dots and dashes are a classic way to send letters.",
            "Each cluster of dots and dashes is one letter; gaps separate words.",
        ]
    }
}

// ==================== Substitution ====================

/// Monoalphabetic substitution (pigpen included); needs an explicit key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Substitution;

impl Substitution {
    fn apply(text: &str, key: &BTreeMap<char, char>) -> String {
        text.chars()
            .map(|c| {
                let upper = c.to_ascii_uppercase();
                match key.get(&upper) {
                    Some(&plain) if c.is_ascii_lowercase() => plain.to_ascii_lowercase(),
                    Some(&plain) => plain.to_ascii_uppercase(),
                    None => c,
                }
            })
            .collect()
    }
}

impl Strategy for Substitution {
    fn name(&self) -> &'static str {
        "substitution"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Expert
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        if !is_ciphertext_candidate(text) && !has_pigpen(text) {
            return Ok(None);
        }

        let key = match &ctx.substitution_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Ok(Some(
                    SolutionCandidate::new("Substitution Cipher", self.puzzle_type())
                        .step("The text may be a letter-for-letter substitution")
                        .step("A substitution key is required to decode it; none was supplied")
                        .answer("Substitution key required")
                        .confidence(0)
                        .levels(&[HintLevel::Hint, HintLevel::Full]),
                ))
            }
        };

        let normalized: BTreeMap<char, char> = key
            .iter()
            .map(|(k, v)| (k.to_ascii_uppercase(), v.to_ascii_uppercase()))
            .collect();
        let decoded = Self::apply(text, &normalized);
        Ok(Some(
            SolutionCandidate::new("Substitution Cipher", self.puzzle_type())
                .step("Treat the text as a letter-for-letter substitution")
                .step(format!("Apply the supplied key ({} letters)", normalized.len()))
                .step("Read the decoded message")
                .answer(decoded)
                .confidence(70),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "Each letter stands for another one, consistently.",
            "Look for a key, a table or a keyword somewhere in the room.",
        ]
    }
}

// ==================== Base64 ====================

/// Standard-alphabet Base64 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64;

impl Base64 {
    /// Whether the text has the Base64 alphabet and length shape.
    pub fn matches(text: &str) -> bool {
        let trimmed = text.trim();
        let body = trimmed.trim_end_matches('=');
        trimmed.len() >= 8
            && trimmed.len() % 4 == 0
            && trimmed.len() - body.len() <= 2
            && !body.is_empty()
            && body
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    }
}

impl Strategy for Base64 {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn attempt(&self, text: &str, _ctx: &SolveContext) -> Attempt {
        if !Self::matches(text) {
            return Ok(None);
        }
        let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(text.trim()) else {
            return Ok(None);
        };
        let Ok(decoded) = String::from_utf8(bytes) else {
            return Ok(None);
        };
        if decoded.is_empty() || decoded.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Ok(None);
        }
        Ok(Some(
            SolutionCandidate::new("Base64 Decoding", self.puzzle_type())
                .step("Identify the Base64 alphabet and padding")
                .step("Decode the text with the standard Base64 alphabet")
                .step("Extract the hidden message")
                .answer(decoded)
                .confidence(95),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "This looks like computer-encoded text.",
            "Letters, digits, '+' and '/', length a multiple of four: a standard binary-to-text encoding.",
        ]
    }
}

// ==================== Anagram ====================

const ANAGRAM_VOCABULARY: &[&str] = &["rearrange", "scrambled", "mixed up", "anagram", "unscramble"];

fn sorted_letters(text: &str) -> Vec<char> {
    let mut letters: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    letters.sort_unstable();
    letters
}

/// Scrambled-letter puzzles.
#[derive(Debug, Clone, Default)]
pub struct Anagram {
    scrambled: Option<String>,
}

impl Anagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// An anagram strategy that validates proposals against these letters.
    pub fn of(scrambled: impl Into<String>) -> Self {
        Self {
            scrambled: Some(scrambled.into()),
        }
    }

    /// Whether the text uses anagram vocabulary
    pub fn mentioned(text: &str) -> bool {
        let lower = text.to_lowercase();
        ANAGRAM_VOCABULARY.iter().any(|w| lower.contains(w))
    }

    fn scrambled_words(text: &str) -> Vec<&str> {
        let upper: Vec<&str> = words(text)
            .into_iter()
            .filter(|w| w.chars().count() >= 3 && w.chars().all(|c| c.is_ascii_uppercase()))
            .collect();
        if !upper.is_empty() {
            return upper;
        }
        words(text).into_iter().last().into_iter().collect()
    }

    /// Whether `b` uses exactly the letters of `a`
    pub fn is_permutation(a: &str, b: &str) -> bool {
        let left = sorted_letters(a);
        !left.is_empty() && left == sorted_letters(b)
    }
}

impl Strategy for Anagram {
    fn name(&self) -> &'static str {
        "anagram"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Cipher
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        if !Self::mentioned(text) {
            return Ok(None);
        }
        let scrambled = Self::scrambled_words(text).join(" ");
        if scrambled.is_empty() {
            return Ok(None);
        }

        if let Some(answer) = ctx
            .known_answer
            .as_deref()
            .filter(|a| Self::is_permutation(&scrambled, a))
        {
            return Ok(Some(
                SolutionCandidate::new("Anagram", self.puzzle_type())
                    .step(format!("Identify the scrambled letters: {}", scrambled))
                    .step(format!("Rearrange them into '{}'", answer))
                    .step("Every letter is used exactly once")
                    .answer(answer)
                    .confidence(80),
            ));
        }

        Ok(Some(
            SolutionCandidate::new("Anagram Puzzle", self.puzzle_type())
                .step(format!("Identify the scrambled letters: {}", scrambled))
                .step("Rearrange the letters to form valid words")
                .step("Use the room's theme to pick the likely word")
                .answer(format!("Rearrange the letters: {}", scrambled))
                .confidence(35),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "The letters are all there, just not in the right order.",
            "Start with common endings like -ING, -ED or -ER.",
        ]
    }

    fn validate(&self, proposed: &str) -> Option<bool> {
        self.scrambled
            .as_deref()
            .map(|s| Self::is_permutation(s, proposed))
    }
}
