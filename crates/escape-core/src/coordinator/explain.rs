//! Candidate -> PuzzleHints conversion.
//!
//! Strategies return `SolutionCandidate`s with a narrated derivation. This
//! module turns the primary candidate into the three hint tiers, or builds
//! generic tiers when nothing was solved.

use crate::types::{PuzzleHints, PuzzleType, SolutionCandidate};

/// Tiers for a solved puzzle.
///
/// `hint` is the producing strategy's first canonical hint, `nudge` names
/// the interpretation and its first step, `full_explanation` is the
/// answer plus the numbered derivation.
pub fn hints_for(candidate: &SolutionCandidate, canonical: &[&str]) -> PuzzleHints {
    let hint = canonical
        .first()
        .map(|h| h.to_string())
        .unwrap_or_else(|| generic_hint(Some(candidate.puzzle_type)).to_string());

    let nudge = match candidate.steps.first() {
        Some(step) => format!("This is a {}. {}", candidate.label, step),
        None => format!("This is a {}.", candidate.label),
    };

    PuzzleHints {
        hint,
        nudge,
        full_explanation: full_explanation(candidate),
    }
}

/// `Solution: X` followed by the numbered steps
pub fn full_explanation(candidate: &SolutionCandidate) -> String {
    let mut out = format!("Solution: {}", candidate.final_answer);
    if !candidate.steps.is_empty() {
        out.push_str("\n\nSteps:");
        for (i, step) in candidate.steps.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, step));
        }
    }
    out
}

/// Tiers when no strategy produced a candidate.
pub fn fallback_hints(types: &[PuzzleType]) -> PuzzleHints {
    let full_explanation = if types.is_empty() {
        "No pattern detected. The text does not match any known lock, cipher, riddle, \
         sequence, equation or mechanism shape. Examine each word and letter carefully."
            .to_string()
    } else {
        let names: Vec<&str> = types.iter().map(|t| t.name()).collect();
        format!(
            "This appears to be a {} puzzle. Without more context, multiple \
             interpretations are possible. Examine each word and letter carefully.",
            names.join(", ")
        )
    };

    PuzzleHints {
        hint: generic_hint(types.first().copied()).to_string(),
        nudge: "Consider what type of encoding or wordplay might be used. Look for patterns."
            .to_string(),
        full_explanation,
    }
}

fn generic_hint(puzzle_type: Option<PuzzleType>) -> &'static str {
    match puzzle_type {
        Some(PuzzleType::Cipher) => {
            "The text appears to be encoded. Think about common encryption methods."
        }
        Some(PuzzleType::Pattern) => "Look for a mathematical or sequential pattern.",
        Some(PuzzleType::Riddle) => {
            "Think about the literal and figurative meanings of the words."
        }
        Some(PuzzleType::Lock) => "Count the wheels on the lock; the answer has that many symbols.",
        Some(PuzzleType::Math) => "There is arithmetic hiding in the clue.",
        Some(PuzzleType::Mechanism) => "The order of the actions matters.",
        None => "Look carefully at the structure and format of the text.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> SolutionCandidate {
        SolutionCandidate::new("Caesar Cipher (shift 3)", PuzzleType::Cipher)
            .step("Shift each letter back by 3")
            .step("Read the result")
            .answer("HELLO WORLD")
            .confidence(90)
    }

    #[test]
    fn test_hints_for_candidate() {
        let hints = hints_for(&candidate(), &["Try shifting letters."]);
        assert_eq!(hints.hint, "Try shifting letters.");
        assert_eq!(
            hints.nudge,
            "This is a Caesar Cipher (shift 3). Shift each letter back by 3"
        );
        assert_eq!(
            hints.full_explanation,
            "Solution: HELLO WORLD\n\nSteps:\n1. Shift each letter back by 3\n2. Read the result"
        );
        assert!(hints.is_complete());
    }

    #[test]
    fn test_hints_without_canonical_text() {
        let hints = hints_for(&candidate(), &[]);
        assert!(hints.hint.contains("encoded"));
    }

    #[test]
    fn test_fallback_hints() {
        let hints = fallback_hints(&[]);
        assert!(hints.full_explanation.starts_with("No pattern detected"));
        assert!(hints.is_complete());

        let hints = fallback_hints(&[PuzzleType::Lock, PuzzleType::Riddle]);
        assert!(hints.full_explanation.contains("lock, riddle"));
    }
}
