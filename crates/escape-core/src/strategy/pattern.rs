//! Number-sequence patterns.
//!
//! Rules are tested in a fixed order (arithmetic, geometric, Fibonacci) and
//! the first rule that holds across the whole sequence is reported.

use super::{Attempt, Strategy};
use crate::context::SolveContext;
use crate::error::StrategyError;
use crate::lexicon::integers;
use crate::types::{PuzzleType, SolutionCandidate};

/// Minimum number of terms before a sequence is analysed
pub const MIN_TERMS: usize = 3;

/// The rule a sequence follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRule {
    /// Constant difference
    Arithmetic { difference: i64 },
    /// Constant ratio `numerator / denominator`
    Geometric { numerator: i64, denominator: i64 },
    /// Each term is the sum of the previous two
    Fibonacci,
    /// None of the above
    Complex,
}

impl std::fmt::Display for SequenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceRule::Arithmetic { difference } => write!(f, "arithmetic ({:+})", difference),
            SequenceRule::Geometric {
                numerator,
                denominator: 1,
            } => write!(f, "geometric (×{})", numerator),
            SequenceRule::Geometric {
                numerator,
                denominator,
            } => write!(f, "geometric (×{}/{})", numerator, denominator),
            SequenceRule::Fibonacci => write!(f, "Fibonacci-like"),
            SequenceRule::Complex => write!(f, "complex"),
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i64::try_from(a.max(1)).unwrap_or(1)
}

fn is_arithmetic(terms: &[i64]) -> Option<i64> {
    let difference = terms[1].checked_sub(terms[0])?;
    terms
        .windows(2)
        .all(|w| w[1].checked_sub(w[0]) == Some(difference))
        .then_some(difference)
}

fn is_geometric(terms: &[i64]) -> Option<(i64, i64)> {
    if terms.iter().any(|t| *t == 0) {
        return None;
    }
    let (num, den) = (terms[1], terms[0]);
    let holds = terms.windows(2).all(|w| {
        matches!(
            (w[1].checked_mul(den), w[0].checked_mul(num)),
            (Some(a), Some(b)) if a == b
        )
    });
    if !holds {
        return None;
    }
    let g = gcd(num, den);
    let (num, den) = (num / g, den / g);
    if den < 0 {
        Some((num.checked_neg()?, den.checked_neg()?))
    } else {
        Some((num, den))
    }
}

fn is_fibonacci(terms: &[i64]) -> bool {
    terms
        .windows(3)
        .all(|w| w[0].checked_add(w[1]) == Some(w[2]))
}

/// Classify a sequence by the first rule that holds for every term.
pub fn detect_sequence(terms: &[i64]) -> SequenceRule {
    if terms.len() < MIN_TERMS {
        return SequenceRule::Complex;
    }
    if let Some(difference) = is_arithmetic(terms) {
        return SequenceRule::Arithmetic { difference };
    }
    if let Some((numerator, denominator)) = is_geometric(terms) {
        return SequenceRule::Geometric {
            numerator,
            denominator,
        };
    }
    if is_fibonacci(terms) {
        return SequenceRule::Fibonacci;
    }
    SequenceRule::Complex
}

fn join_terms(terms: &[i64]) -> String {
    terms
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Numeric sequence strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequencePattern;

impl SequencePattern {
    const NAME: &'static str = "sequence";

    fn next_term(rule: SequenceRule, terms: &[i64]) -> Result<Option<String>, StrategyError> {
        let overflow = || StrategyError::Overflow {
            strategy: Self::NAME,
        };
        let last = terms[terms.len() - 1];
        let next = match rule {
            SequenceRule::Arithmetic { difference } => {
                Some(last.checked_add(difference).ok_or_else(overflow)?.to_string())
            }
            SequenceRule::Geometric {
                numerator,
                denominator,
            } => {
                let scaled = last.checked_mul(numerator).ok_or_else(overflow)?;
                if scaled % denominator == 0 {
                    Some((scaled / denominator).to_string())
                } else {
                    Some(format!("{}/{}", scaled, denominator))
                }
            }
            SequenceRule::Fibonacci => {
                let prev = terms[terms.len() - 2];
                Some(prev.checked_add(last).ok_or_else(overflow)?.to_string())
            }
            SequenceRule::Complex => None,
        };
        Ok(next)
    }
}

impl Strategy for SequencePattern {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Pattern
    }

    fn attempt(&self, text: &str, _ctx: &SolveContext) -> Attempt {
        let terms = integers(text);
        if terms.len() < MIN_TERMS {
            return Ok(None);
        }
        let rule = detect_sequence(&terms);
        let identify = format!("Identify the sequence: {}", join_terms(&terms));

        let candidate = match (rule, Self::next_term(rule, &terms)?) {
            (SequenceRule::Arithmetic { difference }, Some(next)) => {
                SolutionCandidate::new("Arithmetic Sequence", self.puzzle_type())
                    .step(identify)
                    .step(format!("Every term differs from the previous by {:+}", difference))
                    .step(format!("Next number: {}", next))
                    .answer(next)
                    .confidence(90)
            }
            (SequenceRule::Geometric { .. }, Some(next)) => {
                SolutionCandidate::new("Geometric Sequence", self.puzzle_type())
                    .step(identify)
                    .step(format!("Every term is the previous one times a constant: {}", rule))
                    .step(format!("Next number: {}", next))
                    .answer(next)
                    .confidence(85)
            }
            (SequenceRule::Fibonacci, Some(next)) => {
                SolutionCandidate::new("Fibonacci Sequence", self.puzzle_type())
                    .step(identify)
                    .step("Every term is the sum of the two before it")
                    .step(format!("Next number: {}", next))
                    .answer(next)
                    .confidence(80)
            }
            _ => SolutionCandidate::new("Unrecognized Sequence", self.puzzle_type())
                .step(identify)
                .step("No constant difference, constant ratio or running sum fits every term")
                .answer("Complex pattern, needs manual analysis")
                .confidence(15),
        };
        Ok(Some(candidate))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "Look for a mathematical or sequential pattern.",
            "Compare each number with the one before it: add, multiply, or combine?",
            "Try differences first, then ratios, then sums of the previous two.",
        ]
    }
}
