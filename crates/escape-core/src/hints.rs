//! Tiered hint retrieval over a finished analysis.

use crate::types::{HintLevel, PuzzleAnalysis};

/// Stateless hint lookup; attempt bookkeeping belongs to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintService;

impl HintService {
    pub fn new() -> Self {
        Self
    }

    /// Hint text for the requested tier.
    pub fn hint_at<'a>(&self, analysis: &'a PuzzleAnalysis, level: HintLevel) -> &'a str {
        analysis.hints.get(level)
    }

    /// Hint text for the caller's n-th attempt: 1 -> hint, 2 -> nudge,
    /// 3 and later -> full explanation. Attempt 0 counts as the first.
    pub fn progressive_hint<'a>(&self, analysis: &'a PuzzleAnalysis, attempt: u32) -> &'a str {
        self.hint_at(analysis, HintLevel::for_attempt(attempt))
    }

    pub fn next_level(&self, level: HintLevel) -> Option<HintLevel> {
        level.next()
    }

    pub fn has_more(&self, level: HintLevel) -> bool {
        level.has_more()
    }
}
