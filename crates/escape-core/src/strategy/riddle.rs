use super::{Attempt, Strategy};
use crate::context::SolveContext;
use crate::types::{PuzzleType, SolutionCandidate};

/// Classic riddles: every keyword must appear for an entry to match.
const KNOWN_RIDDLES: &[(&[&str], &str)] = &[
    (&["keys", "space", "enter"], "A keyboard"),
    (&["speak without", "mouth"], "An echo"),
    (&["cities", "no houses"], "A map"),
    (&["taller", "younger"], "A candle"),
    (&["follow", "light", "dark"], "A shadow"),
    (&["the more you take", "leave behind"], "Footsteps"),
    (&["keys", "can't open"], "A piano"),
    (&["hands", "face", "can't"], "A clock"),
    (&["wetter", "dries"], "A towel"),
    (&["share", "no longer"], "A secret"),
];

/// Riddles: presents a supplied answer, or a match from a small table of
/// classic riddles. No open-ended inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Riddle;

impl Riddle {
    fn lookup(text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        KNOWN_RIDDLES
            .iter()
            .find(|(keywords, _)| keywords.iter().all(|k| lower.contains(k)))
            .map(|(_, answer)| *answer)
    }
}

impl Strategy for Riddle {
    fn name(&self) -> &'static str {
        "riddle"
    }

    fn puzzle_type(&self) -> PuzzleType {
        PuzzleType::Riddle
    }

    fn attempt(&self, text: &str, ctx: &SolveContext) -> Attempt {
        if let Some(answer) = ctx.known_answer.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            return Ok(Some(
                SolutionCandidate::new("Riddle", self.puzzle_type())
                    .step("Read each line of the riddle as a separate property of the answer")
                    .step("Consider figurative meanings as well as literal ones")
                    .step(format!("'{}' satisfies every line", answer))
                    .answer(answer)
                    .confidence(75),
            ));
        }

        let Some(answer) = Self::lookup(text) else {
            return Ok(None);
        };
        Ok(Some(
            SolutionCandidate::new("Classic Riddle", self.puzzle_type())
                .step("Read each line of the riddle as a separate property of the answer")
                .step("The wording matches a well-known riddle")
                .step(format!("'{}' satisfies every line", answer))
                .answer(answer)
                .confidence(55),
        ))
    }

    fn hints(&self) -> &'static [&'static str] {
        &[
            "Think about the literal and figurative meanings of the words.",
            "Each line describes a property; find an everyday object with all of them.",
            "The answer often points at a physical object in the room.",
        ]
    }
}
