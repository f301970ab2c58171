use escape_core::{
    Coordinator, CoordinatorConfig, HintLevel, HintService, PuzzleAnalysis, PuzzleType,
    SolveContext, SolveRequest, MAX_LOCK_WIDTH,
};

fn solve(text: &str) -> PuzzleAnalysis {
    Coordinator::new().solve(text, &SolveContext::new())
}

fn assert_well_formed(analysis: &PuzzleAnalysis) {
    assert!(analysis.hints.is_complete(), "empty hint tier: {:?}", analysis.hints);
    if let Some(primary) = analysis.primary() {
        for alt in &analysis.alternative_interpretations {
            assert!(
                alt.confidence < primary.confidence,
                "{} >= {}",
                alt.confidence,
                primary.confidence
            );
        }
        for pair in analysis.solutions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    } else {
        assert!(analysis.alternative_interpretations.is_empty());
    }
}

// ==================== Scenarios ====================

#[test]
fn test_caesar_with_known_shift() {
    let ctx = SolveContext::new().with_shift(3);
    let analysis = Coordinator::new().solve("KHOOR ZRUOG", &ctx);
    assert!(analysis.primary().unwrap().final_answer.contains("HELLO WORLD"));
    assert_well_formed(&analysis);
}

#[test]
fn test_caesar_brute_force() {
    let analysis = solve("KHOOR ZRUOG");
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.final_answer, "HELLO WORLD");
    assert_eq!(primary.puzzle_type, PuzzleType::Cipher);
    assert_well_formed(&analysis);
}

#[test]
fn test_morse_message() {
    let analysis = solve(".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.label, "Morse Code");
    assert_eq!(primary.final_answer, "HELLO WORLD");
    assert_well_formed(&analysis);
}

#[test]
fn test_morse_unknown_group_does_not_abort() {
    let analysis = solve(".... ........ . .-.. .-.. ---");
    assert_eq!(analysis.primary().unwrap().final_answer, "H?ELLO");
}

#[test]
fn test_roman_numeral_lock() {
    let analysis = solve("XIV XIX");
    assert_eq!(analysis.puzzle_types, vec![PuzzleType::Lock]);
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.final_answer, "1419");
    assert_eq!(primary.confidence, 85);
}

#[test]
fn test_arithmetic_sequence() {
    let analysis = solve("What comes next in the sequence: 2, 4, 6, 8, ?");
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.final_answer, "10");
    assert_eq!(primary.label, "Arithmetic Sequence");
    assert_well_formed(&analysis);
}

#[test]
fn test_geometric_sequence() {
    let analysis = solve("2, 4, 8, 16");
    assert_eq!(analysis.primary().unwrap().final_answer, "32");
}

#[test]
fn test_equation() {
    let analysis = solve("If the code is 15 + 27 = ?, what is the combination?");
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.final_answer, "42");
    assert_eq!(primary.puzzle_type, PuzzleType::Math);
}

#[test]
fn test_classic_riddle() {
    let analysis = solve(
        "I have keys but no locks. I have space but no room. \
         You can enter but can't go outside. What am I?",
    );
    assert_eq!(analysis.primary().unwrap().final_answer, "A keyboard");
    assert_eq!(
        analysis.hints.hint,
        "Think about the literal and figurative meanings of the words."
    );
    assert_eq!(
        analysis.next_puzzle_prediction.as_deref(),
        Some("Probably leads to a physical object in the room or a combination lock code.")
    );
}

#[test]
fn test_base64_note() {
    let analysis = solve("VGhlIGtleSBpcyB1bmRlciB0aGUgbWF0");
    let primary = analysis.primary().unwrap();
    assert_eq!(primary.final_answer, "The key is under the mat");
    assert_eq!(primary.confidence, 95);
}

#[test]
fn test_directional_lock_from_clues() {
    let ctx = SolveContext::new().with_clues(["Look up", "then left", "then down twice", "down"]);
    let analysis = Coordinator::new().solve("Arrows on the wall: up, left, down, down", &ctx);
    assert!(analysis.puzzle_types.contains(&PuzzleType::Lock));
    assert!(analysis
        .solutions
        .iter()
        .any(|s| s.final_answer == "UP LEFT DOWN DOWN"));
}

#[test]
fn test_substitution_without_key_is_reported() {
    let analysis = solve("NFFU NF BU UIF EPPS");
    let missing = analysis
        .solutions
        .iter()
        .find(|s| s.label == "Substitution Cipher")
        .unwrap();
    assert_eq!(missing.confidence, 0);
    assert!(missing.final_answer.contains("key required"));
    assert_eq!(analysis.primary().unwrap().final_answer, "MEET ME AT THE DOOR");
    assert_well_formed(&analysis);
}

#[test]
fn test_mechanism_plan() {
    let analysis = solve("Pull the red lever, then press the green button");
    let plan = analysis
        .solutions
        .iter()
        .find(|s| s.puzzle_type == PuzzleType::Mechanism)
        .unwrap();
    assert_eq!(plan.final_answer, "PULL red, PRESS green");
}

// ==================== No-match and failure paths ====================

#[test]
fn test_plain_prose_has_no_solutions() {
    let analysis = solve("hello there friend");
    assert!(analysis.puzzle_types.is_empty());
    assert!(analysis.solutions.is_empty());
    assert!(analysis.alternative_interpretations.is_empty());
    assert!(analysis.hints.full_explanation.starts_with("No pattern detected"));
    assert_well_formed(&analysis);
}

#[test]
fn test_empty_input() {
    let analysis = solve("");
    assert!(analysis.solutions.is_empty());
    assert_eq!(analysis.source_text, "");
    assert_well_formed(&analysis);
}

#[test]
fn test_malformed_equation_is_isolated() {
    let analysis = solve("8 / 0 = ?");
    assert!(analysis.puzzle_types.contains(&PuzzleType::Math));
    assert!(analysis
        .solutions
        .iter()
        .all(|s| s.puzzle_type != PuzzleType::Math));
    assert_well_formed(&analysis);
}

#[test]
fn test_oversized_lock_width_is_clamped() {
    let request: SolveRequest = serde_json::from_str(
        r#"{"text": "XIV XIX", "options": {"lock_width": 18446744073709551615}}"#,
    )
    .unwrap();
    let response = Coordinator::new().handle(&request);
    let primary = response.analysis.primary().unwrap();
    assert_eq!(primary.final_answer.len(), MAX_LOCK_WIDTH);
    assert!(primary.final_answer.ends_with("1419"));
    assert_well_formed(&response.analysis);
}

#[test]
fn test_uppercase_plain_english_is_not_a_cipher() {
    let analysis = solve("PUSH THE RED BUTTON NOW");
    assert!(!analysis.puzzle_types.contains(&PuzzleType::Cipher));
    assert!(analysis
        .solutions
        .iter()
        .all(|s| s.puzzle_type != PuzzleType::Cipher));
    assert_well_formed(&analysis);
}

#[test]
fn test_strict_config_attempts_fewer_types() {
    let text = "If the code is 15 + 27 = ?, what is the combination?";
    let relaxed = Coordinator::new().classify(text);
    let strict = Coordinator::with_config(CoordinatorConfig::strict()).classify(text);
    assert!(strict.len() < relaxed.len());
    assert_eq!(strict.first(), Some(&PuzzleType::Math));
}

// ==================== Hints and requests ====================

#[test]
fn test_progressive_hints_over_an_analysis() {
    let analysis = solve("KHOOR ZRUOG");
    let service = HintService::new();
    assert_eq!(service.progressive_hint(&analysis, 1), analysis.hints.hint);
    assert_eq!(service.progressive_hint(&analysis, 2), analysis.hints.nudge);
    assert_eq!(
        service.progressive_hint(&analysis, 3),
        analysis.hints.full_explanation
    );
    assert_eq!(
        service.progressive_hint(&analysis, 9),
        analysis.hints.full_explanation
    );
    assert!(analysis.hints.nudge.starts_with("This is a Caesar Cipher"));
}

#[test]
fn test_json_request_response() {
    let request: SolveRequest = serde_json::from_str(
        r#"{"text": "KHOOR ZRUOG", "context": "Found on a stone tablet", "hint_level": "nudge"}"#,
    )
    .unwrap();
    let response = Coordinator::new().handle(&request);
    assert_eq!(response.selected_hint, response.analysis.hints.nudge);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["ocr"], "KHOOR ZRUOG");
    assert_eq!(json["puzzle_types"][0], "cipher");
    assert_eq!(json["solutions"][0]["final_answer"], "HELLO WORLD");
    assert!(json["solutions"][0]["hint_level_available"].is_array());
    assert_eq!(json["identified_objects"][0]["label"], "Written message");
    assert!(json["selected_hint"].is_string());
    assert_eq!(request.hint_level, HintLevel::Nudge);
}

#[test]
fn test_wire_round_trip_preserves_step_order() {
    let analysis = solve("What comes next in the sequence: 2, 4, 6, 8, ?");
    let json = serde_json::to_string(&analysis).unwrap();
    let back: PuzzleAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back, analysis);
    assert_eq!(back.solutions[0].steps, analysis.solutions[0].steps);
}

#[test]
fn test_prediction_omitted_when_absent() {
    let analysis = solve("hello there friend");
    assert_eq!(analysis.next_puzzle_prediction, None);
    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json.get("next_puzzle_prediction").is_none());
}

// ==================== Concurrency ====================

#[test]
fn test_concurrent_solves_are_independent() {
    let coordinator = Coordinator::new();
    let inputs = [
        "KHOOR ZRUOG",
        "XIV XIX",
        "2, 4, 8, 16",
        ".... . .-.. .-.. ---",
        "hello there friend",
    ];
    let expected: Vec<PuzzleAnalysis> = inputs
        .iter()
        .map(|t| coordinator.solve(t, &SolveContext::new()))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|t| {
                let coordinator = &coordinator;
                scope.spawn(move || coordinator.solve(t, &SolveContext::new()))
            })
            .collect();
        for (handle, want) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), want);
        }
    });
}
