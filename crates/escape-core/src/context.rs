use crate::classifier::DEFAULT_MIN_PLAUSIBILITY;
use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lock widths the engine recognizes in bare digit runs
pub const KNOWN_LOCK_WIDTHS: &[usize] = &[3, 4];

/// Widest lock the strategies will fill; larger widths are clamped
pub const MAX_LOCK_WIDTH: usize = 16;

/// Optional auxiliary data a caller can supply alongside the puzzle text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveContext {
    /// Free-text context ("found on a stone tablet")
    pub note: Option<String>,
    /// Number of wheels/digits on the lock (read through [`SolveContext::width`])
    pub lock_width: usize,
    /// Ordered clue phrases; derived from the text when empty
    pub clues: Vec<String>,
    /// Known Caesar shift
    pub shift: Option<u8>,
    /// Cipher letter -> plain letter
    pub substitution_key: Option<BTreeMap<char, char>>,
    /// Pre-supplied answer (math, riddle, anagram)
    pub known_answer: Option<String>,
    /// Target length for word locks
    pub word_length: Option<usize>,
    /// Canonical combination to fall back on for numeric locks
    pub fallback_combination: Option<String>,
}

impl Default for SolveContext {
    fn default() -> Self {
        Self {
            note: None,
            lock_width: 4,
            clues: Vec::new(),
            shift: None,
            substitution_key: None,
            known_answer: None,
            word_length: None,
            fallback_combination: None,
        }
    }
}

impl SolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_lock_width(mut self, width: usize) -> Self {
        self.lock_width = width.clamp(1, MAX_LOCK_WIDTH);
        self
    }

    pub fn with_clues<I, S>(mut self, clues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clues = clues.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shift(mut self, shift: u8) -> Self {
        self.shift = Some(shift % 26);
        self
    }

    pub fn with_substitution_key(mut self, key: BTreeMap<char, char>) -> Self {
        self.substitution_key = Some(key);
        self
    }

    pub fn with_known_answer(mut self, answer: impl Into<String>) -> Self {
        self.known_answer = Some(answer.into());
        self
    }

    pub fn with_word_length(mut self, len: usize) -> Self {
        self.word_length = Some(len);
        self
    }

    pub fn with_fallback_combination(mut self, combination: impl Into<String>) -> Self {
        self.fallback_combination = Some(combination.into());
        self
    }

    /// Lock width within `1..=MAX_LOCK_WIDTH`
    pub fn width(&self) -> usize {
        self.lock_width.clamp(1, MAX_LOCK_WIDTH)
    }

    /// Clue phrases in order: the supplied ones, or the text split into
    /// lines and sentences.
    pub fn clue_lines(&self, text: &str) -> Vec<String> {
        if !self.clues.is_empty() {
            return self.clues.clone();
        }
        text.split(['\n', ';'])
            .flat_map(|line| line.split(". "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse a `CIPHER=PLAIN` key entry such as `Q=A` or `⊔=H`.
pub fn parse_key_entry(entry: &str) -> Result<(char, char), RequestError> {
    let invalid = || RequestError::InvalidKeyEntry(entry.to_string());
    let (from, to) = entry.split_once('=').ok_or_else(invalid)?;
    let mut from_chars = from.trim().chars();
    let mut to_chars = to.trim().chars();
    match (from_chars.next(), from_chars.next(), to_chars.next(), to_chars.next()) {
        (Some(f), None, Some(t), None) if !f.is_ascii_digit() && t.is_ascii_alphabetic() => {
            Ok((f.to_ascii_uppercase(), t.to_ascii_uppercase()))
        }
        _ => Err(invalid()),
    }
}

/// Configuration for the solving coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Classifier scores below this bar are not attempted
    pub min_plausibility: u8,
    /// Maximum number of alternatives exposed in an analysis
    pub max_alternatives: usize,
    /// Emit a generic next-step prediction when nothing was solved
    pub fallback_prediction: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            min_plausibility: DEFAULT_MIN_PLAUSIBILITY,
            max_alternatives: 5,
            fallback_prediction: true,
        }
    }
}

impl CoordinatorConfig {
    /// Only attempt strongly signalled types
    pub fn strict() -> Self {
        Self {
            min_plausibility: 40,
            max_alternatives: 3,
            fallback_prediction: false,
        }
    }

    /// Attempt every type with any signal at all
    pub fn exhaustive() -> Self {
        Self {
            min_plausibility: 1,
            max_alternatives: usize::MAX,
            fallback_prediction: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = SolveContext::default();
        assert_eq!(ctx.width(), 4);
        assert!(ctx.clues.is_empty());
    }

    #[test]
    fn test_clue_lines_from_text() {
        let ctx = SolveContext::new();
        let clues = ctx.clue_lines("Look up. Then turn left\nfinally right;down");
        assert_eq!(clues, vec!["Look up", "Then turn left", "finally right", "down"]);
    }

    #[test]
    fn test_supplied_clues_win() {
        let ctx = SolveContext::new().with_clues(["north", "south"]);
        assert_eq!(ctx.clue_lines("ignored text"), vec!["north", "south"]);
    }

    #[test]
    fn test_parse_key_entry() {
        assert_eq!(parse_key_entry("q=a").unwrap(), ('Q', 'A'));
        assert!(parse_key_entry("QA").is_err());
        assert!(parse_key_entry("QQ=A").is_err());
        assert!(parse_key_entry("1=A").is_err());
        assert_eq!(parse_key_entry("⊔=h").unwrap(), ('⊔', 'H'));
    }

    #[test]
    fn test_width_is_bounded() {
        let ctx: SolveContext =
            serde_json::from_str(r#"{"lock_width": 18446744073709551615}"#).unwrap();
        assert_eq!(ctx.width(), MAX_LOCK_WIDTH);
        assert_eq!(SolveContext::new().with_lock_width(0).width(), 1);
        assert_eq!(
            SolveContext::new().with_lock_width(1 << 20).lock_width,
            MAX_LOCK_WIDTH
        );
    }

    #[test]
    fn test_default_bar_matches_classifier() {
        assert_eq!(
            CoordinatorConfig::default().min_plausibility,
            DEFAULT_MIN_PLAUSIBILITY
        );
    }

    #[test]
    fn test_context_deserializes_with_defaults() {
        let ctx: SolveContext = serde_json::from_str(r#"{"shift": 3}"#).unwrap();
        assert_eq!(ctx.shift, Some(3));
        assert_eq!(ctx.lock_width, 4);
    }
}
