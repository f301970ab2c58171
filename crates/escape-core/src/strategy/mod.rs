//! Solving strategies, one small self-contained solver per puzzle shape.
//!
//! Strategies never see each other. The coordinator runs the ones whose
//! puzzle type the classifier judged plausible.

mod cipher;
mod lock;
mod math;
mod mechanism;
mod pattern;
mod riddle;

use crate::context::SolveContext;
use crate::error::StrategyError;
use crate::types::{Difficulty, PuzzleType, SolutionCandidate};

pub use cipher::{
    atbash, caesar_decrypt, is_morse, morse_decode, Anagram, Atbash, Base64, Caesar, Morse,
    Substitution,
};
pub use lock::{fold_digits, DirectionalLock, NumericClueLock, RomanNumeralLock, WordLock};
pub use math::Equation;
pub use mechanism::{action_verb, ActionSequence, ACTION_VERBS, MECHANISM_NOUNS};
pub use pattern::{detect_sequence, SequencePattern, SequenceRule};
pub use riddle::Riddle;

/// Outcome of one strategy attempt: `Ok(None)` is the normal negative path.
pub type Attempt = Result<Option<SolutionCandidate>, StrategyError>;

/// A solving strategy for one puzzle type.
pub trait Strategy: std::fmt::Debug + Send + Sync {
    /// Stable identifier, e.g. `"caesar"`.
    fn name(&self) -> &'static str;

    /// The puzzle type this strategy solves.
    fn puzzle_type(&self) -> PuzzleType;

    /// Advisory difficulty of puzzles this strategy handles.
    fn difficulty(&self) -> Difficulty {
        self.puzzle_type().typical_difficulty()
    }

    /// Try to solve the text.
    ///
    /// Returns `Ok(None)` when the strategy's preconditions are not met.
    ///
    /// # Errors
    ///
    /// Returns an error when the input has the right shape but cannot be
    /// evaluated (e.g. division by zero).
    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt;

    /// Canonical hints for this kind of puzzle, vaguest first. Never empty.
    fn hints(&self) -> &'static [&'static str];

    /// Check a proposed answer, when the strategy knows what to expect.
    fn validate(&self, _proposed: &str) -> Option<bool> {
        None
    }
}

/// A boxed strategy.
pub type BoxedStrategy = Box<dyn Strategy>;

/// Every built-in strategy, in registration order.
pub fn default_strategies() -> Vec<BoxedStrategy> {
    vec![
        // Lock
        Box::new(RomanNumeralLock),
        Box::new(NumericClueLock::new()),
        Box::new(DirectionalLock::new()),
        Box::new(WordLock::new()),
        // Cipher
        Box::new(Base64),
        Box::new(Morse),
        Box::new(Caesar),
        Box::new(Atbash),
        Box::new(Anagram::new()),
        Box::new(Substitution),
        // Riddle
        Box::new(Riddle),
        // Pattern
        Box::new(SequencePattern),
        // Math
        Box::new(Equation),
        // Mechanism
        Box::new(ActionSequence),
    ]
}
