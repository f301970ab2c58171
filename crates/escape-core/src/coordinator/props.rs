//! Descriptive tables: physical props mentioned in the text, and what the
//! next puzzle in the room is likely to be.

use crate::lexicon::words;
use crate::types::{IdentifiedObject, PuzzleType};

/// (word stems, label, details, category)
const PROPS: &[(&[&str], &str, &str, &str)] = &[
    (
        &["lock", "padlock"],
        "Lock",
        "A locking mechanism; its width bounds the answer",
        "lock",
    ),
    (
        &["radio", "speaker", "recording"],
        "Radio",
        "Audio source; listen for tones, beeps or spoken numbers",
        "audio",
    ),
    (
        &["note", "letter", "tablet", "scroll", "paper"],
        "Written message",
        "Text carried by a physical object",
        "document",
    ),
    (
        &["book", "diary", "journal"],
        "Book",
        "Page and line numbers often index a cipher",
        "document",
    ),
    (
        &["clock", "watch"],
        "Clock",
        "Hand positions may encode digits",
        "device",
    ),
    (
        &["map", "globe"],
        "Map",
        "Directions or coordinates may be involved",
        "document",
    ),
    (
        &["chest", "safe", "box", "drawer"],
        "Container",
        "Likely holds the next clue once opened",
        "container",
    ),
    (
        &["computer", "terminal", "keypad", "screen"],
        "Terminal",
        "Accepts typed passwords or codes",
        "device",
    ),
    (
        &["board", "panel"],
        "Puzzle board",
        "Arrangement of pieces or switches",
        "board",
    ),
    (
        &["painting", "photo", "picture", "portrait"],
        "Picture",
        "Details in the image may hide numbers or letters",
        "decoration",
    ),
];

/// Props named in the text or note, each once, in table order.
pub fn identify_objects(text: &str, note: Option<&str>) -> Vec<IdentifiedObject> {
    let mut vocabulary: Vec<String> = words(text).into_iter().map(str::to_lowercase).collect();
    if let Some(note) = note {
        vocabulary.extend(words(note).into_iter().map(str::to_lowercase));
    }

    PROPS
        .iter()
        .filter(|(stems, ..)| {
            vocabulary.iter().any(|w| {
                stems.iter().any(|s| {
                    w.as_str() == *s
                        || w.strip_suffix('s') == Some(*s)
                        || w.strip_suffix("es") == Some(*s)
                })
            })
        })
        .map(|(_, label, details, category)| IdentifiedObject {
            label: label.to_string(),
            details: details.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// What usually follows a puzzle of this type
pub fn predict_next(puzzle_type: PuzzleType) -> &'static str {
    match puzzle_type {
        PuzzleType::Lock => {
            "Opening the lock usually reveals a container or document holding the next clue."
        }
        PuzzleType::Cipher => {
            "Likely a more complex cipher or a physical puzzle using the decoded answer as a key."
        }
        PuzzleType::Riddle => {
            "Probably leads to a physical object in the room or a combination lock code."
        }
        PuzzleType::Pattern => "Next puzzle likely uses the sequence answer as a key or code.",
        PuzzleType::Math => {
            "Answer may be used as a combination or lead to a sequence-based puzzle."
        }
        PuzzleType::Mechanism => {
            "Completing the sequence often unlocks a hidden compartment or powers another prop."
        }
    }
}
