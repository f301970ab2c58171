use super::{Attempt, Strategy};
use crate::context::SolveContext;
use crate::types::{PuzzleType, SolutionCandidate};

/// Verbs that describe an operation on a physical mechanism
pub const ACTION_VERBS: &[&str] = &[
    "press", "push", "pull", "turn", "rotate", "flip", "slide", "lift", "raise", "lower",
    "insert", "open", "close",
];

/// Nouns that name mechanism parts
pub const MECHANISM_NOUNS: &[&str] = &["lever", "switch", "button", "gear", "crank", "pulley"];

const FILLER: &[&str] = &["the", "a", "an", "it", "each", "every", "then", "and"];

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Base form of an action verb ("pulls", "pulled" -> "pull")
pub fn action_verb(word: &str) -> Option<&'static str> {
    let w = normalize(word);
    ACTION_VERBS.iter().copied().find(|v| {
        w == *v
            || w.strip_suffix('s') == Some(*v)
            || w.strip_suffix("ed") == Some(*v)
            || w.strip_suffix('d') == Some(*v)
    })
}

/// Ordered action plans for levers, switches and buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionSequence;

impl ActionSequence {
    /// `(verb, object)` pairs in clue order
    pub fn actions(clues: &[String]) -> Vec<(&'static str, Option<String>)> {
        let mut out = Vec::new();
        for clue in clues {
            let tokens: Vec<&str> = clue.split_whitespace().collect();
            for (i, token) in tokens.iter().enumerate() {
                let Some(verb) = action_verb(token) else {
                    continue;
                };
                let object = tokens[i + 1..]
                    .iter()
                    .map(|t| normalize(t))
                    .find(|t| !t.is_empty() && !FILLER.contains(&t.as_str()));
                out.push((verb, object));
            }
        }
        out
    }
}

impl Strategy for ActionSequence {
    fn name(&self) -> &'static str {
        "action-sequence"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Mechanism
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        let actions = Self::actions(&ctx.clue_lines(text));
        if actions.len() < 2 {
            return Ok(None);
        }

        let plan: Vec<String> = actions
            .iter()
            .map(|(verb, object)| match object {
                Some(o) => format!("{} {}", verb.to_uppercase(), o),
                None => verb.to_uppercase(),
            })
            .collect();

        Ok(Some(
            SolutionCandidate::new("Mechanism Sequence", self.puzzle_type())
                .step("List every action the clues describe, in the order given")
                .step(format!("{} actions found", plan.len()))
                .step(format!("Perform them in order: {}", plan.join(", ")))
                .answer(plan.join(", "))
                .confidence(50),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "The order of the actions matters more than the actions themselves.",
            "Write down every verb in the clues: press, pull, turn...",
        ]
    }
}
