use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Difficulty level of a puzzle (advisory only, never used in scoring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

/// Kind of escape-room puzzle a text fragment may represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleType {
    Lock,
    Cipher,
    Riddle,
    Pattern,
    Math,
    Mechanism,
}

impl PuzzleType {
    /// All puzzle types, in declaration order
    pub fn all() -> &'static [PuzzleType] {
        &[
            PuzzleType::Lock,
            PuzzleType::Cipher,
            PuzzleType::Riddle,
            PuzzleType::Pattern,
            PuzzleType::Math,
            PuzzleType::Mechanism,
        ]
    }

    /// Wire name used in JSON payloads
    pub fn name(&self) -> &'static str {
        match self {
            PuzzleType::Lock => "lock",
            PuzzleType::Cipher => "cipher",
            PuzzleType::Riddle => "riddle",
            PuzzleType::Pattern => "pattern",
            PuzzleType::Math => "math",
            PuzzleType::Mechanism => "mechanism",
        }
    }

    /// Typical difficulty of props of this kind
    pub fn typical_difficulty(&self) -> Difficulty {
        match self {
            PuzzleType::Lock => Difficulty::Easy,
            PuzzleType::Math => Difficulty::Easy,
            PuzzleType::Pattern => Difficulty::Medium,
            PuzzleType::Mechanism => Difficulty::Medium,
            PuzzleType::Cipher => Difficulty::Hard,
            PuzzleType::Riddle => Difficulty::Hard,
        }
    }
}

impl std::fmt::Display for PuzzleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PuzzleType::Lock => write!(f, "Lock"),
            PuzzleType::Cipher => write!(f, "Cipher"),
            PuzzleType::Riddle => write!(f, "Riddle"),
            PuzzleType::Pattern => write!(f, "Pattern"),
            PuzzleType::Math => write!(f, "Math"),
            PuzzleType::Mechanism => write!(f, "Mechanism"),
        }
    }
}

impl FromStr for PuzzleType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RequestError::UnknownPuzzleType(s.to_string()))
    }
}

/// Hint reveal tier, ordered from vaguest to complete
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HintLevel {
    #[default]
    Hint,
    Nudge,
    Full,
}

impl HintLevel {
    /// All tiers in reveal order
    pub fn all() -> &'static [HintLevel] {
        &[HintLevel::Hint, HintLevel::Nudge, HintLevel::Full]
    }

    /// The tier revealed after this one, if any
    pub fn next(&self) -> Option<HintLevel> {
        match self {
            HintLevel::Hint => Some(HintLevel::Nudge),
            HintLevel::Nudge => Some(HintLevel::Full),
            HintLevel::Full => None,
        }
    }

    /// Whether a further tier exists
    pub fn has_more(&self) -> bool {
        self.next().is_some()
    }

    /// Tier unlocked by the given attempt count (1-based, saturating)
    pub fn for_attempt(attempt: u32) -> HintLevel {
        match attempt {
            0 | 1 => HintLevel::Hint,
            2 => HintLevel::Nudge,
            _ => HintLevel::Full,
        }
    }

    /// Wire name used in JSON payloads
    pub fn name(&self) -> &'static str {
        match self {
            HintLevel::Hint => "hint",
            HintLevel::Nudge => "nudge",
            HintLevel::Full => "full",
        }
    }
}

impl std::fmt::Display for HintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintLevel::Hint => write!(f, "Hint"),
            HintLevel::Nudge => write!(f, "Nudge"),
            HintLevel::Full => write!(f, "Full"),
        }
    }
}

impl FromStr for HintLevel {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hint" => Ok(HintLevel::Hint),
            "nudge" => Ok(HintLevel::Nudge),
            "full" | "full_explanation" => Ok(HintLevel::Full),
            _ => Err(RequestError::UnknownHintLevel(s.to_string())),
        }
    }
}

/// A physical prop inferred from the input (descriptive only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedObject {
    pub label: String,
    pub details: String,
    pub category: String,
}

/// One strategy's proposed answer, before ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionCandidate {
    /// Short name of the interpretation, e.g. "Caesar Cipher (shift 3)"
    pub label: String,
    /// Puzzle type of the strategy that produced this candidate
    pub puzzle_type: PuzzleType,
    /// Narrated derivation, in order
    pub steps: Vec<String>,
    pub final_answer: String,
    /// 0-100 inclusive
    pub confidence: u8,
    #[serde(rename = "hint_level_available")]
    pub hint_levels_available: BTreeSet<HintLevel>,
}

impl SolutionCandidate {
    /// Start a candidate with every hint tier available.
    pub fn new(label: impl Into<String>, puzzle_type: PuzzleType) -> Self {
        Self {
            label: label.into(),
            puzzle_type,
            steps: Vec::new(),
            final_answer: String::new(),
            confidence: 0,
            hint_levels_available: HintLevel::all().iter().copied().collect(),
        }
    }

    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn answer(mut self, answer: impl Into<String>) -> Self {
        self.final_answer = answer.into();
        self
    }

    /// Set the confidence, clamped to 100.
    pub fn confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(100);
        self
    }

    pub fn levels(mut self, levels: &[HintLevel]) -> Self {
        self.hint_levels_available = levels.iter().copied().collect();
        self
    }
}

/// A lower-ranked candidate, stripped of its derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeInterpretation {
    pub description: String,
    pub confidence: u8,
}

/// One text per hint tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleHints {
    pub hint: String,
    pub nudge: String,
    pub full_explanation: String,
}

impl PuzzleHints {
    /// Text for the given tier
    pub fn get(&self, level: HintLevel) -> &str {
        match level {
            HintLevel::Hint => &self.hint,
            HintLevel::Nudge => &self.nudge,
            HintLevel::Full => &self.full_explanation,
        }
    }

    /// Whether every tier carries text
    pub fn is_complete(&self) -> bool {
        HintLevel::all().iter().all(|l| !self.get(*l).trim().is_empty())
    }
}

/// The engine's output for one `solve` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAnalysis {
    #[serde(rename = "ocr")]
    pub source_text: String,
    /// Types actually attempted, most plausible first
    pub puzzle_types: Vec<PuzzleType>,
    pub identified_objects: Vec<IdentifiedObject>,
    /// Ranked by confidence, highest first
    pub solutions: Vec<SolutionCandidate>,
    pub alternative_interpretations: Vec<AlternativeInterpretation>,
    pub hints: PuzzleHints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_puzzle_prediction: Option<String>,
}

impl PuzzleAnalysis {
    /// The highest-ranked candidate, if any
    pub fn primary(&self) -> Option<&SolutionCandidate> {
        self.solutions.first()
    }

    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// One-paragraph description of what was detected.
    pub fn summary(&self, note: Option<&str>) -> String {
        let mut parts = Vec::new();

        if self.puzzle_types.is_empty() {
            parts.push("No recognizable puzzle structure was detected.".to_string());
        } else {
            let names: Vec<String> = self.puzzle_types.iter().map(|t| t.to_string()).collect();
            parts.push(format!("The puzzle appears to be: {}.", names.join(", ")));
        }

        if self.puzzle_types.contains(&PuzzleType::Cipher) {
            parts.push("Encrypted text detected - requires decoding.".to_string());
        }
        if self.puzzle_types.contains(&PuzzleType::Riddle) {
            parts.push("This is a word-based puzzle requiring lateral thinking.".to_string());
        }
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            parts.push(format!("Given context: {}", note.trim()));
        }
        parts.push(format!(
            "Puzzle length: {} characters.",
            self.source_text.chars().count()
        ));

        parts.join(" ")
    }
}
