//! Request/response pair exchanged with callers (CLI, FFI, JSON clients).

use crate::context::SolveContext;
use crate::types::{HintLevel, PuzzleAnalysis};
use serde::{Deserialize, Serialize};

/// One solve request as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub text: String,
    /// Free-text context; overrides `options.note` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub hint_level: HintLevel,
    #[serde(default)]
    pub options: SolveContext,
}

impl SolveRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            hint_level: HintLevel::default(),
            options: SolveContext::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_hint_level(mut self, level: HintLevel) -> Self {
        self.hint_level = level;
        self
    }

    pub fn with_options(mut self, options: SolveContext) -> Self {
        self.options = options;
        self
    }

    /// The solve context with the top-level `context` folded in as its note.
    pub fn solve_context(&self) -> SolveContext {
        let mut ctx = self.options.clone();
        if let Some(context) = self.context.as_deref().filter(|c| !c.trim().is_empty()) {
            ctx.note = Some(context.to_string());
        }
        ctx
    }
}

/// The analysis plus the hint text for the requested tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    #[serde(flatten)]
    pub analysis: PuzzleAnalysis,
    pub selected_hint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request() {
        let req: SolveRequest = serde_json::from_str(r#"{"text": "KHOOR ZRUOG"}"#).unwrap();
        assert_eq!(req.hint_level, HintLevel::Hint);
        assert_eq!(req.context, None);
        assert_eq!(req.options, SolveContext::default());
    }

    #[test]
    fn test_full_request() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"text": "KHOOR", "context": "on the wall", "hint_level": "full",
                "options": {"shift": 3, "lock_width": 3}}"#,
        )
        .unwrap();
        assert_eq!(req.hint_level, HintLevel::Full);
        let ctx = req.solve_context();
        assert_eq!(ctx.note.as_deref(), Some("on the wall"));
        assert_eq!(ctx.shift, Some(3));
        assert_eq!(ctx.lock_width, 3);
    }

    #[test]
    fn test_unknown_hint_level_rejected() {
        let parsed = serde_json::from_str::<SolveRequest>(r#"{"text": "x", "hint_level": "all"}"#);
        assert!(parsed.is_err());
    }
}
