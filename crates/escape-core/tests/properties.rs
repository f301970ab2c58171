use escape_core::strategy::{atbash, detect_sequence, SequenceRule};
use escape_core::{
    decimal_to_roman, roman_to_decimal, Coordinator, HintLevel, HintService, PuzzleAnalysis,
    SolveContext,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn atbash_is_an_involution(text in "[a-zA-Z]{0,64}") {
        prop_assert_eq!(atbash(&atbash(&text)), text);
    }

    #[test]
    fn roman_round_trip(n in 1u32..4000) {
        let numeral = decimal_to_roman(n).unwrap();
        prop_assert_eq!(roman_to_decimal(&numeral), Some(n));
    }

    #[test]
    fn progressive_levels_never_regress(attempt in 0u32..1000) {
        let now = HintLevel::for_attempt(attempt);
        let next = HintLevel::for_attempt(attempt + 1);
        prop_assert!(now <= next);
        if attempt >= 3 {
            prop_assert_eq!(now, HintLevel::Full);
        }
    }

    #[test]
    fn arithmetic_wins_over_other_readings(start in -1000i64..1000, step in -50i64..50, len in 3usize..10) {
        let terms: Vec<i64> = (0..len as i64).map(|i| start + i * step).collect();
        prop_assert_eq!(detect_sequence(&terms), SequenceRule::Arithmetic { difference: step });
    }

    #[test]
    fn solve_never_breaks_invariants(text in "[ -~]{0,80}") {
        let analysis = Coordinator::new().solve(&text, &SolveContext::new());
        check_invariants(&analysis);
    }

    #[test]
    fn solve_handles_arbitrary_unicode(text in "\\PC{0,40}") {
        let analysis = Coordinator::new().solve(&text, &SolveContext::new());
        check_invariants(&analysis);
    }
}

fn check_invariants(analysis: &PuzzleAnalysis) {
    assert!(analysis.hints.is_complete());

    let mut types = analysis.puzzle_types.clone();
    types.sort();
    types.dedup();
    assert_eq!(types.len(), analysis.puzzle_types.len());

    for s in &analysis.solutions {
        assert!(s.confidence <= 100);
        assert!(analysis.puzzle_types.contains(&s.puzzle_type));
    }
    match analysis.primary() {
        Some(primary) => {
            for alt in &analysis.alternative_interpretations {
                assert!(alt.confidence < primary.confidence);
            }
        }
        None => assert!(analysis.alternative_interpretations.is_empty()),
    }

    let service = HintService::new();
    let mut previous = HintLevel::Hint;
    for attempt in 1..6 {
        let level = HintLevel::for_attempt(attempt);
        assert!(level >= previous);
        assert_eq!(service.progressive_hint(analysis, attempt), analysis.hints.get(level));
        previous = level;
    }
}
