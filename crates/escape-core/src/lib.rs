//! Escape-room puzzle engine.
//!
//! Takes the text of a puzzle (lock clue, cipher note, riddle, sequence,
//! equation or mechanism instructions), decides which kinds of puzzle it
//! plausibly is, runs the matching solving strategies and returns a ranked
//! [`PuzzleAnalysis`] with three tiers of hints.
//!
//! ```
//! use escape_core::{Coordinator, HintLevel, SolveContext};
//!
//! let coordinator = Coordinator::new();
//! let analysis = coordinator.solve("KHOOR ZRUOG", &SolveContext::new().with_shift(3));
//! assert_eq!(analysis.primary().unwrap().final_answer, "HELLO WORLD");
//! assert!(analysis.hints.get(HintLevel::Full).contains("HELLO WORLD"));
//! ```

pub mod classifier;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod hints;
pub mod lexicon;
pub mod request;
pub mod strategy;
pub mod types;

pub use classifier::{classify, Classifier, Plausibility};
pub use context::{parse_key_entry, CoordinatorConfig, SolveContext, MAX_LOCK_WIDTH};
pub use coordinator::{solve, Coordinator};
pub use error::{RequestError, StrategyError};
pub use hints::HintService;
pub use lexicon::{decimal_to_roman, roman_to_decimal, Direction};
pub use request::{SolveRequest, SolveResponse};
pub use strategy::{default_strategies, Attempt, BoxedStrategy, Strategy};
pub use types::{
    AlternativeInterpretation, Difficulty, HintLevel, IdentifiedObject, PuzzleAnalysis,
    PuzzleHints, PuzzleType, SolutionCandidate,
};
