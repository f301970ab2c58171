//! Error types for the puzzle engine.
//!
//! None of these reach a `solve` caller: strategy errors are isolated by the
//! coordinator, request errors only arise while parsing caller input.

use thiserror::Error;

/// Failure inside a single strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The input matched the strategy's shape but cannot be evaluated
    #[error("{strategy}: malformed input: {reason}")]
    Malformed {
        strategy: &'static str,
        reason: String,
    },

    /// Arithmetic left the representable range
    #[error("{strategy}: arithmetic overflow")]
    Overflow { strategy: &'static str },
}

impl StrategyError {
    pub fn malformed(strategy: &'static str, reason: impl Into<String>) -> Self {
        StrategyError::Malformed {
            strategy,
            reason: reason.into(),
        }
    }
}

/// Invalid caller input at the request boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("unknown hint level '{0}' (expected hint, nudge or full)")]
    UnknownHintLevel(String),

    #[error("unknown puzzle type '{0}'")]
    UnknownPuzzleType(String),

    #[error("invalid substitution key entry '{0}' (expected CIPHER=PLAIN)")]
    InvalidKeyEntry(String),
}
