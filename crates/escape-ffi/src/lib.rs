use escape_core::{
    parse_key_entry, AlternativeInterpretation, Coordinator, HintLevel, HintService,
    IdentifiedObject, PuzzleAnalysis, PuzzleType, SolutionCandidate, SolveContext, SolveRequest,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

uniffi::setup_scaffolding!();

fn coordinator() -> &'static Coordinator {
    static COORDINATOR: OnceLock<Coordinator> = OnceLock::new();
    COORDINATOR.get_or_init(Coordinator::new)
}

/// Errors surfaced to mobile callers
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum EngineError {
    /// The options or request could not be understood
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl From<escape_core::RequestError> for EngineError {
    fn from(e: escape_core::RequestError) -> Self {
        EngineError::InvalidRequest {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidRequest {
            reason: e.to_string(),
        }
    }
}

/// Kind of puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum PuzzleKind {
    Lock,
    Cipher,
    Riddle,
    Pattern,
    Math,
    Mechanism,
}

impl From<PuzzleType> for PuzzleKind {
    fn from(t: PuzzleType) -> Self {
        match t {
            PuzzleType::Lock => PuzzleKind::Lock,
            PuzzleType::Cipher => PuzzleKind::Cipher,
            PuzzleType::Riddle => PuzzleKind::Riddle,
            PuzzleType::Pattern => PuzzleKind::Pattern,
            PuzzleType::Math => PuzzleKind::Math,
            PuzzleType::Mechanism => PuzzleKind::Mechanism,
        }
    }
}

/// Hint reveal tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum HintTier {
    Hint,
    Nudge,
    Full,
}

impl From<HintLevel> for HintTier {
    fn from(level: HintLevel) -> Self {
        match level {
            HintLevel::Hint => HintTier::Hint,
            HintLevel::Nudge => HintTier::Nudge,
            HintLevel::Full => HintTier::Full,
        }
    }
}

impl From<HintTier> for HintLevel {
    fn from(tier: HintTier) -> Self {
        match tier {
            HintTier::Hint => HintLevel::Hint,
            HintTier::Nudge => HintLevel::Nudge,
            HintTier::Full => HintLevel::Full,
        }
    }
}

/// Optional data that helps the solver
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct PuzzleOptions {
    /// Where the puzzle was found
    pub context: Option<String>,
    pub shift: Option<u8>,
    /// Number of wheels on the lock (default 4)
    pub lock_width: Option<u32>,
    /// Ordered clue phrases
    pub clues: Vec<String>,
    /// Substitution key entries like "Q=A"
    pub substitution_key: Vec<String>,
    pub known_answer: Option<String>,
    pub word_length: Option<u32>,
}

impl PuzzleOptions {
    fn to_context(&self) -> Result<SolveContext, EngineError> {
        let mut ctx = SolveContext::new().with_clues(self.clues.iter().cloned());
        if let Some(note) = &self.context {
            ctx = ctx.with_note(note.clone());
        }
        if let Some(shift) = self.shift {
            ctx = ctx.with_shift(shift);
        }
        if let Some(width) = self.lock_width {
            ctx = ctx.with_lock_width(width as usize);
        }
        if let Some(answer) = &self.known_answer {
            ctx = ctx.with_known_answer(answer.clone());
        }
        if let Some(len) = self.word_length {
            ctx = ctx.with_word_length(len as usize);
        }
        if !self.substitution_key.is_empty() {
            let key = self
                .substitution_key
                .iter()
                .map(|entry| parse_key_entry(entry))
                .collect::<Result<BTreeMap<char, char>, _>>()?;
            ctx = ctx.with_substitution_key(key);
        }
        Ok(ctx)
    }
}

/// A proposed answer with its derivation
#[derive(Debug, Clone, uniffi::Record)]
pub struct Solution {
    pub label: String,
    pub kind: PuzzleKind,
    pub steps: Vec<String>,
    pub final_answer: String,
    /// 0-100
    pub confidence: u8,
    pub available_tiers: Vec<HintTier>,
}

impl From<SolutionCandidate> for Solution {
    fn from(c: SolutionCandidate) -> Self {
        Self {
            label: c.label,
            kind: c.puzzle_type.into(),
            steps: c.steps,
            final_answer: c.final_answer,
            confidence: c.confidence,
            available_tiers: c.hint_levels_available.into_iter().map(Into::into).collect(),
        }
    }
}

/// A lower-ranked reading of the puzzle
#[derive(Debug, Clone, uniffi::Record)]
pub struct Alternative {
    pub description: String,
    pub confidence: u8,
}

impl From<AlternativeInterpretation> for Alternative {
    fn from(a: AlternativeInterpretation) -> Self {
        Self {
            description: a.description,
            confidence: a.confidence,
        }
    }
}

/// A physical prop mentioned in the puzzle
#[derive(Debug, Clone, uniffi::Record)]
pub struct Prop {
    pub label: String,
    pub details: String,
    pub category: String,
}

impl From<IdentifiedObject> for Prop {
    fn from(o: IdentifiedObject) -> Self {
        Self {
            label: o.label,
            details: o.details,
            category: o.category,
        }
    }
}

/// Full analysis of one puzzle
#[derive(Debug, Clone, uniffi::Record)]
pub struct Analysis {
    pub source_text: String,
    pub kinds: Vec<PuzzleKind>,
    pub props: Vec<Prop>,
    /// Highest confidence first
    pub solutions: Vec<Solution>,
    pub alternatives: Vec<Alternative>,
    pub hint: String,
    pub nudge: String,
    pub full_explanation: String,
    pub next_puzzle_prediction: Option<String>,
    pub summary: String,
}

impl Analysis {
    fn from_core(analysis: PuzzleAnalysis, note: Option<&str>) -> Self {
        let summary = analysis.summary(note);
        Self {
            source_text: analysis.source_text,
            kinds: analysis.puzzle_types.into_iter().map(Into::into).collect(),
            props: analysis
                .identified_objects
                .into_iter()
                .map(Into::into)
                .collect(),
            solutions: analysis.solutions.into_iter().map(Into::into).collect(),
            alternatives: analysis
                .alternative_interpretations
                .into_iter()
                .map(Into::into)
                .collect(),
            hint: analysis.hints.hint,
            nudge: analysis.hints.nudge,
            full_explanation: analysis.hints.full_explanation,
            next_puzzle_prediction: analysis.next_puzzle_prediction,
            summary,
        }
    }
}

/// One puzzle being worked on; tracks how many hints the player asked for
#[derive(uniffi::Object)]
pub struct PuzzleSession {
    analysis: PuzzleAnalysis,
    note: Option<String>,
    attempts: Mutex<u32>,
}

impl PuzzleSession {
    fn attempts_guard(&self) -> MutexGuard<'_, u32> {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[uniffi::export]
impl PuzzleSession {
    /// Analyse a puzzle and start a hint session for it
    #[uniffi::constructor]
    pub fn new(text: String, options: PuzzleOptions) -> Result<Arc<Self>, EngineError> {
        let ctx = options.to_context()?;
        let analysis = coordinator().solve(&text, &ctx);
        Ok(Arc::new(Self {
            analysis,
            note: ctx.note,
            attempts: Mutex::new(0),
        }))
    }

    pub fn analysis(&self) -> Analysis {
        Analysis::from_core(self.analysis.clone(), self.note.as_deref())
    }

    /// Number of hints revealed so far
    pub fn attempts(&self) -> u32 {
        *self.attempts_guard()
    }

    /// Reveal the next hint: hint, then nudge, then the full explanation
    pub fn next_hint(&self) -> String {
        let mut attempts = self.attempts_guard();
        *attempts = attempts.saturating_add(1);
        HintService::new()
            .progressive_hint(&self.analysis, *attempts)
            .to_string()
    }

    /// Tier the most recent `next_hint` call revealed
    pub fn current_tier(&self) -> Option<HintTier> {
        match *self.attempts_guard() {
            0 => None,
            n => Some(HintLevel::for_attempt(n).into()),
        }
    }

    pub fn has_more_hints(&self) -> bool {
        match self.current_tier() {
            None => true,
            Some(tier) => HintLevel::from(tier).has_more(),
        }
    }

    /// Hint text for a specific tier, without advancing the session
    pub fn hint_at(&self, tier: HintTier) -> String {
        HintService::new()
            .hint_at(&self.analysis, tier.into())
            .to_string()
    }

    /// Whether the answer matches the best solution (case-insensitive)
    pub fn check_answer(&self, proposed: String) -> bool {
        self.analysis
            .primary()
            .is_some_and(|p| p.final_answer.trim().eq_ignore_ascii_case(proposed.trim()))
    }

    pub fn reset(&self) {
        *self.attempts_guard() = 0;
    }
}

// ==================== Free functions ====================

/// Analyse a puzzle once
#[uniffi::export]
pub fn solve_puzzle(text: String, options: PuzzleOptions) -> Result<Analysis, EngineError> {
    let ctx = options.to_context()?;
    let analysis = coordinator().solve(&text, &ctx);
    Ok(Analysis::from_core(analysis, ctx.note.as_deref()))
}

/// Answer a JSON request (`{"text": ..., "context": ..., "hint_level": ...}`)
/// with the JSON response
#[uniffi::export]
pub fn solve_request_json(json: String) -> Result<String, EngineError> {
    let request: SolveRequest = serde_json::from_str(&json)?;
    let response = coordinator().handle(&request);
    Ok(serde_json::to_string(&response)?)
}

/// Plausible puzzle kinds, strongest first
#[uniffi::export]
pub fn classify_puzzle(text: String) -> Vec<PuzzleKind> {
    coordinator()
        .classify(&text)
        .into_iter()
        .map(Into::into)
        .collect()
}
