//! Basic example of using the escape-room puzzle engine

use escape_core::{classify, Coordinator, HintService, SolveContext};

fn main() {
    let coordinator = Coordinator::new();
    let hints = HintService::new();

    // Classify a few puzzles
    let puzzles = [
        "KHOOR ZRUOG",
        "XIV XIX",
        "What comes next: 3, 9, 27, ?",
        "I have keys but no locks. I have space but no room. What am I?",
    ];
    for text in puzzles {
        let types: Vec<&str> = classify(text).iter().map(|t| t.name()).collect();
        println!("{:<64} -> {}", text, types.join(", "));
    }

    // Solve one with context
    println!("\n--- Solving a note found in a drawer ---\n");
    let ctx = SolveContext::new().with_note("Note taped inside a drawer");
    let analysis = coordinator.solve("VGhlIGtleSBpcyB1bmRlciB0aGUgbWF0", &ctx);
    println!("{}", analysis.summary(ctx.note.as_deref()));

    if let Some(primary) = analysis.primary() {
        println!("Answer: {} ({}%)", primary.final_answer, primary.confidence);
    }
    for object in &analysis.identified_objects {
        println!("Object: {} ({})", object.label, object.category);
    }

    // Walk the hint tiers the way a stuck player would
    println!("\n--- Progressive hints ---\n");
    for attempt in 1..=3 {
        println!("Attempt {}: {}", attempt, hints.progressive_hint(&analysis, attempt));
    }

    if let Some(prediction) = &analysis.next_puzzle_prediction {
        println!("\nNext: {}", prediction);
    }
}
