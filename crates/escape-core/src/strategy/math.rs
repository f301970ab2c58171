use super::{Attempt, Strategy};
use crate::context::SolveContext;
use crate::error::StrategyError;
use crate::types::{Difficulty, PuzzleType, SolutionCandidate};
use regex::Regex;
use std::sync::OnceLock;

fn equation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]+)\s*([-+*/x×])\s*([0-9]+)\s*=\s*\?").expect("static regex")
    })
}

/// Math props: a supplied answer presented with method guidance, or a
/// single `a op b = ?` evaluated directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equation;

impl Equation {
    const NAME: &'static str = "equation";

    fn evaluate(a: i64, op: &str, b: i64) -> Result<i64, StrategyError> {
        let overflow = || StrategyError::Overflow { strategy: Self::NAME };
        match op {
            "+" => a.checked_add(b).ok_or_else(overflow),
            "-" => a.checked_sub(b).ok_or_else(overflow),
            "*" | "x" | "×" => a.checked_mul(b).ok_or_else(overflow),
            "/" if b == 0 => Err(StrategyError::malformed(Self::NAME, "division by zero")),
            "/" => Ok(a / b),
            other => Err(StrategyError::malformed(
                Self::NAME,
                format!("unknown operator '{}'", other),
            )),
        }
    }
}

impl Strategy for Equation {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Math
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        if let Some(answer) = ctx.known_answer.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            return Ok(Some(
                SolutionCandidate::new("Math Puzzle", self.puzzle_type())
                    .step(format!("Write the puzzle as an equation: {}", text.trim()))
                    .step("Isolate the unknown by undoing each operation in reverse order")
                    .step("Check the result by substituting it back")
                    .answer(answer)
                    .confidence(70),
            ));
        }

        let Some(caps) = equation_regex().captures(text) else {
            return Ok(None);
        };
        let parse = |s: &str| {
            s.parse::<i64>()
                .map_err(|_| StrategyError::malformed(Self::NAME, format!("number too large: {}", s)))
        };
        let a = parse(&caps[1])?;
        let op = &caps[2];
        let b = parse(&caps[3])?;
        let result = Self::evaluate(a, op, b)?;

        Ok(Some(
            SolutionCandidate::new("Mathematical Equation", self.puzzle_type())
                .step(format!("Identify the equation: {} {} {} = ?", a, op, b))
                .step(format!("Calculate: {} {} {} = {}", a, op, b, result))
                .answer(result.to_string())
                .confidence(95),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "There is an equation hiding in the clue.",
            "Work out the unknown one operation at a time.",
            "The result is often used as a lock combination; pad it with zeros if needed.",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_equation() {
        let c = Equation
            .attempt(
                "If the code is 15 + 27 = ?, what is the combination?",
                &SolveContext::new(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(c.final_answer, "42");
        assert_eq!(c.confidence, 95);
    }

    #[test]
    fn test_operators() {
        let ctx = SolveContext::new();
        let answer = |t: &str| Equation.attempt(t, &ctx).unwrap().unwrap().final_answer;
        assert_eq!(answer("12 x 3 = ?"), "36");
        assert_eq!(answer("12 - 30 = ?"), "-18");
        assert_eq!(answer("17 / 5 = ?"), "3");
    }

    #[test]
    fn test_division_by_zero_is_malformed() {
        let err = Equation.attempt("8 / 0 = ?", &SolveContext::new()).unwrap_err();
        assert!(matches!(err, StrategyError::Malformed { .. }));
    }

    #[test]
    fn test_known_answer_template() {
        let ctx = SolveContext::new().with_known_answer("4");
        let c = Equation.attempt("2x + 3 = 11", &ctx).unwrap().unwrap();
        assert_eq!(c.final_answer, "4");
        assert_eq!(c.steps.len(), 3);
    }

    #[test]
    fn test_no_equation() {
        assert!(Equation
            .attempt("2x + 3 = 11", &SolveContext::new())
            .unwrap()
            .is_none());
    }
}
