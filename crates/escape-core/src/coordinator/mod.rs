//! Solving coordinator.
//!
//! Classifies the text, runs every registered strategy whose puzzle type
//! was judged plausible, ranks the candidates and assembles the analysis.

mod explain;
mod props;

use crate::classifier::Classifier;
use crate::context::{CoordinatorConfig, SolveContext};
use crate::request::{SolveRequest, SolveResponse};
use crate::strategy::{default_strategies, BoxedStrategy, Strategy};
use crate::types::{AlternativeInterpretation, PuzzleAnalysis, PuzzleType, SolutionCandidate};
use log::{debug, warn};

pub use explain::{fallback_hints, full_explanation, hints_for};
pub use props::{identify_objects, predict_next};

const WORDPLAY_ALTERNATIVE: &str = "Could be a play on words or pun";
const WORDPLAY_CONFIDENCE: u8 = 40;

/// Owns the strategy registry; every call is independent of every other.
#[derive(Debug)]
pub struct Coordinator {
    strategies: Vec<BoxedStrategy>,
    config: CoordinatorConfig,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Coordinator with every built-in strategy and the default config.
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        Self {
            strategies: default_strategies(),
            config,
        }
    }

    /// Coordinator with no strategies registered.
    pub fn empty(config: CoordinatorConfig) -> Self {
        Self {
            strategies: Vec::new(),
            config,
        }
    }

    /// Register a strategy after the existing ones; registration order
    /// breaks confidence ties.
    pub fn register(&mut self, strategy: impl Strategy + 'static) -> &mut Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategies(&self) -> &[BoxedStrategy] {
        &self.strategies
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    fn classifier(&self) -> Classifier {
        Classifier::with_min_plausibility(self.config.min_plausibility)
    }

    /// Plausible puzzle types for the text, strongest first.
    pub fn classify(&self, text: &str) -> Vec<PuzzleType> {
        self.classifier().classify(text)
    }

    /// Solve a puzzle text. Never fails: unrecognized input yields an
    /// analysis with no solutions and generic hints.
    pub fn solve(&self, text: &str, ctx: &SolveContext) -> PuzzleAnalysis {
        let types = if text.trim().is_empty() {
            Vec::new()
        } else {
            self.classify(text)
        };

        let mut candidates = self.collect_candidates(text, ctx, &types);
        // Stable: ties keep registration order.
        candidates.sort_by(|a, b| b.1.confidence.cmp(&a.1.confidence));

        let hints = match candidates.first() {
            Some((strategy, primary)) => hints_for(primary, strategy.hints()),
            None => fallback_hints(&types),
        };
        let next_puzzle_prediction = self.prediction(&types, candidates.first().map(|c| &c.1));

        let solutions: Vec<SolutionCandidate> = candidates.into_iter().map(|(_, c)| c).collect();
        let alternative_interpretations = self.alternatives(&types, &solutions);

        PuzzleAnalysis {
            source_text: text.to_string(),
            puzzle_types: types,
            identified_objects: identify_objects(text, ctx.note.as_deref()),
            solutions,
            alternative_interpretations,
            hints,
            next_puzzle_prediction,
        }
    }

    /// Handle a wire request: solve, then pick the requested hint tier.
    pub fn handle(&self, request: &SolveRequest) -> SolveResponse {
        let analysis = self.solve(&request.text, &request.solve_context());
        let selected_hint = analysis.hints.get(request.hint_level).to_string();
        SolveResponse {
            analysis,
            selected_hint,
        }
    }

    /// Ask every strategy of `puzzle_type` that knows an expected answer
    /// whether `proposed` is correct. `None` when none of them can tell.
    pub fn validate(&self, puzzle_type: PuzzleType, proposed: &str) -> Option<bool> {
        let verdicts: Vec<bool> = self
            .strategies
            .iter()
            .filter(|s| s.puzzle_type() == puzzle_type)
            .filter_map(|s| s.validate(proposed))
            .collect();
        if verdicts.is_empty() {
            None
        } else {
            Some(verdicts.into_iter().any(|ok| ok))
        }
    }

    // ==================== Internal ====================

    fn collect_candidates<'a>(
        &'a self,
        text: &str,
        ctx: &SolveContext,
        types: &[PuzzleType],
    ) -> Vec<(&'a BoxedStrategy, SolutionCandidate)> {
        let mut out = Vec::new();
        for strategy in self.strategies.iter().filter(|s| types.contains(&s.puzzle_type())) {
            match strategy.attempt(text, ctx) {
                Ok(Some(candidate)) => {
                    debug!(
                        "{}: {} ({})",
                        strategy.name(),
                        candidate.final_answer,
                        candidate.confidence
                    );
                    out.push((strategy, candidate));
                }
                Ok(None) => debug!("{}: no candidate", strategy.name()),
                Err(e) => warn!("strategy skipped: {}", e),
            }
        }
        out
    }

    /// Demote every non-primary candidate, clipped strictly below the
    /// primary's confidence and capped in number. Riddles also get a
    /// wordplay reading.
    fn alternatives(
        &self,
        types: &[PuzzleType],
        solutions: &[SolutionCandidate],
    ) -> Vec<AlternativeInterpretation> {
        let Some(primary) = solutions.first() else {
            return Vec::new();
        };
        let Some(ceiling) = primary.confidence.checked_sub(1) else {
            return Vec::new();
        };

        let demoted = solutions[1..].iter().map(|c| AlternativeInterpretation {
            description: format!("{}: {}", c.label, c.final_answer),
            confidence: c.confidence,
        });
        let wordplay = types
            .contains(&PuzzleType::Riddle)
            .then(|| AlternativeInterpretation {
                description: WORDPLAY_ALTERNATIVE.to_string(),
                confidence: WORDPLAY_CONFIDENCE,
            });

        demoted
            .chain(wordplay)
            .take(self.config.max_alternatives)
            .map(|mut alt| {
                alt.confidence = alt.confidence.min(ceiling);
                alt
            })
            .collect()
    }

    /// Keyed by the primary's type; unsolved puzzles fall back to the
    /// first classified type when the config allows it.
    fn prediction(
        &self,
        types: &[PuzzleType],
        primary: Option<&SolutionCandidate>,
    ) -> Option<String> {
        let puzzle_type = match primary {
            Some(p) => p.puzzle_type,
            None if self.config.fallback_prediction => *types.first()?,
            None => return None,
        };
        Some(predict_next(puzzle_type).to_string())
    }
}

/// Solve with a default coordinator.
pub fn solve(text: &str, ctx: &SolveContext) -> PuzzleAnalysis {
    Coordinator::new().solve(text, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;
    use crate::strategy::Attempt;

    #[derive(Debug)]
    struct Fixed {
        name: &'static str,
        confidence: u8,
    }

    impl Strategy for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn puzzle_type(&self) -> PuzzleType {
            PuzzleType::Cipher
        }

        fn attempt(&self, _text: &str, _ctx: &SolveContext) -> Attempt {
            Ok(Some(
                SolutionCandidate::new(self.name, PuzzleType::Cipher)
                    .step("fixed")
                    .answer(self.name)
                    .confidence(self.confidence),
            ))
        }

        fn hints(&self) -> &'static [&'static str] {
            &["fixed hint"]
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Strategy for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn puzzle_type(&self) -> PuzzleType {
            PuzzleType::Cipher
        }

        fn attempt(&self, _text: &str, _ctx: &SolveContext) -> Attempt {
            Err(StrategyError::malformed("broken", "always"))
        }

        fn hints(&self) -> &'static [&'static str] {
            &["never shown"]
        }
    }

    fn cipher_only() -> Coordinator {
        Coordinator::empty(CoordinatorConfig::default())
    }

    #[test]
    fn test_solve_caesar() {
        let ctx = SolveContext::new().with_shift(3);
        let analysis = Coordinator::new().solve("KHOOR ZRUOG", &ctx);
        let primary = analysis.primary().unwrap();
        assert!(primary.final_answer.contains("HELLO WORLD"));
        assert_eq!(analysis.puzzle_types, vec![PuzzleType::Cipher]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let mut c = cipher_only();
        c.register(Fixed { name: "first", confidence: 60 })
            .register(Fixed { name: "second", confidence: 60 })
            .register(Fixed { name: "best", confidence: 90 });
        let analysis = c.solve("KHOOR ZRUOG", &SolveContext::new());
        let answers: Vec<&str> = analysis
            .solutions
            .iter()
            .map(|s| s.final_answer.as_str())
            .collect();
        assert_eq!(answers, vec!["best", "first", "second"]);
        assert_eq!(analysis.hints.hint, "fixed hint");
    }

    #[test]
    fn test_alternatives_strictly_below_primary() {
        let mut c = cipher_only();
        c.register(Fixed { name: "a", confidence: 70 })
            .register(Fixed { name: "b", confidence: 70 });
        let analysis = c.solve("KHOOR ZRUOG", &SolveContext::new());
        assert_eq!(analysis.alternative_interpretations.len(), 1);
        assert_eq!(analysis.alternative_interpretations[0].confidence, 69);
        assert_eq!(analysis.alternative_interpretations[0].description, "b: b");
    }

    #[test]
    fn test_zero_confidence_primary_drops_alternatives() {
        let mut c = cipher_only();
        c.register(Fixed { name: "a", confidence: 0 })
            .register(Fixed { name: "b", confidence: 0 });
        let analysis = c.solve("KHOOR ZRUOG", &SolveContext::new());
        assert_eq!(analysis.solutions.len(), 2);
        assert!(analysis.alternative_interpretations.is_empty());
    }

    #[test]
    fn test_alternatives_capped() {
        let mut config = CoordinatorConfig::default();
        config.max_alternatives = 1;
        let mut c = Coordinator::empty(config);
        for name in ["a", "b", "c"] {
            c.register(Fixed { name, confidence: 50 });
        }
        let analysis = c.solve("KHOOR ZRUOG", &SolveContext::new());
        assert_eq!(analysis.alternative_interpretations.len(), 1);
    }

    #[test]
    fn test_failing_strategy_is_isolated() {
        let mut c = cipher_only();
        c.register(Broken).register(Fixed { name: "ok", confidence: 40 });
        let analysis = c.solve("KHOOR ZRUOG", &SolveContext::new());
        assert_eq!(analysis.solutions.len(), 1);
        assert_eq!(analysis.primary().unwrap().final_answer, "ok");
    }

    #[test]
    fn test_empty_text() {
        let analysis = Coordinator::new().solve("   ", &SolveContext::new());
        assert!(analysis.puzzle_types.is_empty());
        assert!(analysis.solutions.is_empty());
        assert!(analysis.hints.is_complete());
    }

    #[test]
    fn test_unsolved_prediction_follows_config() {
        let text = "the wheel";
        let analysis = Coordinator::new().solve(text, &SolveContext::new());
        assert!(analysis.solutions.is_empty());
        assert_eq!(
            analysis.next_puzzle_prediction.as_deref(),
            Some(predict_next(PuzzleType::Lock))
        );

        let mut config = CoordinatorConfig::default();
        config.fallback_prediction = false;
        let analysis = Coordinator::with_config(config).solve(text, &SolveContext::new());
        assert_eq!(analysis.next_puzzle_prediction, None);
    }

    #[test]
    fn test_handle_selects_tier() {
        let request = SolveRequest::new("KHOOR ZRUOG")
            .with_hint_level(crate::types::HintLevel::Full)
            .with_options(SolveContext::new().with_shift(3));
        let response = Coordinator::new().handle(&request);
        assert!(response.selected_hint.starts_with("Solution: HELLO WORLD"));
    }

    #[test]
    fn test_riddle_gets_wordplay_alternative() {
        let analysis = Coordinator::new().solve(
            "I have keys but no locks. I have space but no room. \
             You can enter but can't go outside. What am I?",
            &SolveContext::new(),
        );
        let primary = analysis.primary().unwrap();
        let wordplay = analysis
            .alternative_interpretations
            .iter()
            .find(|a| a.description == WORDPLAY_ALTERNATIVE)
            .unwrap();
        assert_eq!(wordplay.confidence, WORDPLAY_CONFIDENCE);
        assert!(wordplay.confidence < primary.confidence);
    }

    #[test]
    fn test_wordplay_clipped_below_weak_primary() {
        #[derive(Debug)]
        struct WeakRiddle;

        impl Strategy for WeakRiddle {
            fn name(&self) -> &'static str {
                "weak-riddle"
            }

            fn puzzle_type(&self) -> PuzzleType {
                PuzzleType::Riddle
            }

            fn attempt(&self, _text: &str, _ctx: &SolveContext) -> Attempt {
                Ok(Some(
                    SolutionCandidate::new("Guess", PuzzleType::Riddle)
                        .answer("guess")
                        .confidence(10),
                ))
            }

            fn hints(&self) -> &'static [&'static str] {
                &["guess"]
            }
        }

        let mut c = Coordinator::empty(CoordinatorConfig::default());
        c.register(WeakRiddle);
        let analysis = c.solve("What am I?", &SolveContext::new());
        assert_eq!(analysis.alternative_interpretations.len(), 1);
        assert_eq!(analysis.alternative_interpretations[0].confidence, 9);
    }

    #[test]
    fn test_validate() {
        let mut c = cipher_only();
        c.register(crate::strategy::Anagram::of("TLAB"));
        assert_eq!(c.validate(PuzzleType::Cipher, "blat"), Some(true));
        assert_eq!(c.validate(PuzzleType::Cipher, "boat"), Some(false));
        assert_eq!(c.validate(PuzzleType::Lock, "1234"), None);
    }
}
