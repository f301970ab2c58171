//! Lock strategies: Roman numerals, numeric clues, directions, words.

use super::{Attempt, Strategy};
use crate::context::{SolveContext, MAX_LOCK_WIDTH};
use crate::lexicon::{digit_runs, roman_tokens, Direction};
use crate::types::{Difficulty, PuzzleType, SolutionCandidate};
use regex::Regex;
use std::sync::OnceLock;

/// Fold a digit stream into `width` wheels: digit `i` is added (mod 10)
/// into wheel `i % width`. Shorter streams are left-padded with zeros.
/// `width` is clamped to `1..=MAX_LOCK_WIDTH`.
pub fn fold_digits(digits: &[u8], width: usize) -> Vec<u8> {
    let width = width.clamp(1, MAX_LOCK_WIDTH);
    if digits.len() <= width {
        let mut out = vec![0; width - digits.len()];
        out.extend_from_slice(digits);
        return out;
    }
    let mut wheels = vec![0u8; width];
    for (i, d) in digits.iter().enumerate() {
        wheels[i % width] = (wheels[i % width] + d) % 10;
    }
    wheels
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

// ==================== Roman numerals ====================

/// Roman numerals read as a lock combination.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomanNumeralLock;

impl Strategy for RomanNumeralLock {
    fn name(&self) -> &'static str {
        "roman-lock"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Lock
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        let tokens = roman_tokens(text);
        if tokens.is_empty() {
            return Ok(None);
        }
        let width = ctx.width();

        let numerals: Vec<&str> = tokens.iter().map(|(t, _)| t.as_str()).collect();
        let conversions: Vec<String> = tokens
            .iter()
            .map(|(t, v)| format!("{} = {}", t, v))
            .collect();
        let digits: Vec<u8> = tokens
            .iter()
            .flat_map(|(_, v)| v.to_string().into_bytes())
            .map(|b| b - b'0')
            .collect();
        let stream = digits_to_string(&digits);

        let candidate = SolutionCandidate::new("Roman Numeral Lock", self.puzzle_type())
            .step(format!("Find the Roman numerals: {}", numerals.join(", ")))
            .step(format!("Convert each numeral: {}", conversions.join(", ")))
            .step(format!("Read the digits in order: {}", stream));

        let code = fold_digits(&digits, width);
        let code = digits_to_string(&code);
        let candidate = match digits.len().cmp(&width) {
            std::cmp::Ordering::Equal => candidate
                .step(format!("The {} digits fit the {}-wheel lock directly", width, width))
                .confidence(85),
            std::cmp::Ordering::Less => candidate
                .step(format!("Left-pad with zeros to {} digits: {}", width, code))
                .confidence(60),
            std::cmp::Ordering::Greater => candidate
                .step(format!(
                    "Fold {} digits onto {} wheels, adding digit i into wheel i mod {}: {}",
                    digits.len(),
                    width,
                    width,
                    code
                ))
                .confidence(50),
        };

        Ok(Some(candidate.answer(code)))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "Some of those letters are numbers in disguise.",
            "Roman numerals: I=1, V=5, X=10, L=50, C=100, D=500, M=1000.",
            "Convert each numeral and read the digits in order; fit them to the lock.",
        ]
    }
}

// ==================== Numeric clues ====================

/// Digit runs hidden in clues (dates, counts, page numbers).
#[derive(Debug, Clone, Default)]
pub struct NumericClueLock {
    expected: Option<String>,
}

impl NumericClueLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A numeric lock that validates proposals against this combination.
    pub fn expecting(combination: impl Into<String>) -> Self {
        Self {
            expected: Some(only_digits(&combination.into())),
        }
    }
}

impl Strategy for NumericClueLock {
    fn name(&self) -> &'static str {
        "numeric-lock"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Lock
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        let width = ctx.width();
        let clues = ctx.clue_lines(text);

        for (i, clue) in clues.iter().enumerate() {
            if let Some(run) = digit_runs(clue).into_iter().find(|r| r.len() == width) {
                return Ok(Some(
                    SolutionCandidate::new("Numeric Clue Lock", self.puzzle_type())
                        .step(format!("Scan each clue for a run of exactly {} digits", width))
                        .step(format!("Clue {} (\"{}\") contains {}", i + 1, clue, run))
                        .step(format!("Set the lock to {}", run))
                        .answer(run)
                        .confidence(75),
                ));
            }
        }

        match ctx.fallback_combination.as_deref().map(only_digits) {
            Some(combo) if combo.len() == width => Ok(Some(
                SolutionCandidate::new("Canonical Combination", self.puzzle_type())
                    .step(format!("No clue contains a run of exactly {} digits", width))
                    .step(format!("Fall back to the canonical combination {}", combo))
                    .answer(combo)
                    .confidence(30),
            )),
            _ => Ok(None),
        }
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "The code is almost always hidden somewhere in the room.",
            "Look for dates, years, page numbers, clock times and counts of objects.",
            "A run with exactly as many digits as the lock has wheels is your best bet.",
        ]
    }

    fn validate(&self, proposed: &str) -> Option<bool> {
        self.expected
            .as_deref()
            .map(|expected| only_digits(proposed) == expected)
    }
}

// ==================== Directions ====================

/// Directional (arrow) locks.
#[derive(Debug, Clone, Default)]
pub struct DirectionalLock {
    expected: Option<Vec<Direction>>,
}

impl DirectionalLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directional lock that validates proposals against this sequence.
    pub fn expecting(sequence: &[Direction]) -> Self {
        Self {
            expected: Some(sequence.to_vec()),
        }
    }

    /// Compare a space-separated, case-insensitive proposal token by token.
    pub fn validate_sequence(expected: &[Direction], proposed: &str) -> bool {
        let tokens: Vec<&str> = proposed.split_whitespace().collect();
        tokens.len() == expected.len()
            && tokens
                .iter()
                .zip(expected)
                .all(|(t, d)| Direction::from_token(t) == Some(*d))
    }
}

impl Strategy for DirectionalLock {
    fn name(&self) -> &'static str {
        "directional-lock"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Lock
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        let mut sequence = Vec::new();
        let mut candidate = SolutionCandidate::new("Directional Lock", self.puzzle_type())
            .step("Map each clue's direction words and arrows to UP, DOWN, LEFT or RIGHT");

        for clue in ctx.clue_lines(text) {
            let dirs = Direction::scan(&clue);
            if dirs.is_empty() {
                continue;
            }
            let names: Vec<&str> = dirs.iter().map(Direction::name).collect();
            candidate = candidate.step(format!("\"{}\" -> {}", clue, names.join(" ")));
            sequence.extend(dirs);
        }

        if sequence.is_empty() {
            return Ok(None);
        }

        let answer: Vec<&str> = sequence.iter().map(Direction::name).collect();
        let answer = answer.join(" ");
        Ok(Some(
            candidate
                .step(format!("Enter the {} moves in clue order: {}", sequence.len(), answer))
                .answer(answer)
                .confidence(70),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "This lock opens with a sequence of moves, not numbers.",
            "North, south, east and west are just up, down, right and left.",
            "Follow the clues in the order they are given.",
        ]
    }

    fn validate(&self, proposed: &str) -> Option<bool> {
        self.expected
            .as_deref()
            .map(|expected| Self::validate_sequence(expected, proposed))
    }
}

// ==================== Words ====================

fn letter_count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b([0-9]+)[- ]letter").expect("static regex"))
}

/// Letter (word) locks.
#[derive(Debug, Clone, Default)]
pub struct WordLock {
    expected: Option<String>,
}

impl WordLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A word lock that validates proposals against this word.
    pub fn expecting(word: impl Into<String>) -> Self {
        Self {
            expected: Some(word.into()),
        }
    }

    /// Target length from "5-letter" style phrases
    pub fn infer_length(text: &str) -> Option<usize> {
        letter_count_regex()
            .captures(text)
            .and_then(|c| c[1].parse().ok())
            .filter(|n| *n > 0)
    }
}

impl Strategy for WordLock {
    fn name(&self) -> &'static str {
        "word-lock"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Lock
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        let Some(target) = ctx.word_length.or_else(|| Self::infer_length(text)) else {
            return Ok(None);
        };
        let clues = ctx.clue_lines(text);

        if clues.len() == target {
            let initials: Option<String> = clues
                .iter()
                .map(|c| c.chars().find(|ch| ch.is_alphabetic()))
                .collect();
            if let Some(initials) = initials {
                let word = initials.to_uppercase();
                return Ok(Some(
                    SolutionCandidate::new("Acrostic Word Lock", self.puzzle_type())
                        .step(format!("There are {} clues for a {}-letter lock", target, target))
                        .step("Take the first letter of each clue, in order")
                        .step(format!("The initials spell {}", word))
                        .answer(word)
                        .confidence(70),
                ));
            }
        }

        for clue in &clues {
            for token in clue.split_whitespace() {
                if token.chars().any(|c| c.is_ascii_digit()) {
                    continue;
                }
                let letters: String = token.chars().filter(|c| c.is_alphabetic()).collect();
                if letters.chars().count() == target {
                    let word = letters.to_uppercase();
                    return Ok(Some(
                        SolutionCandidate::new("Word Lock", self.puzzle_type())
                            .step(format!("Look for a {}-letter word in the clues", target))
                            .step(format!("\"{}\" has exactly {} letters", token, target))
                            .answer(word)
                            .confidence(45),
                    ));
                }
            }
        }

        Ok(None)
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "This lock wants a word, not a number.",
            "Count the letters the lock takes and look for a word of that length.",
            "When there is one clue per letter, read the first letters downwards.",
        ]
    }

    fn validate(&self, proposed: &str) -> Option<bool> {
        self.expected
            .as_deref()
            .map(|expected| expected.trim().eq_ignore_ascii_case(proposed.trim()))
    }
}
