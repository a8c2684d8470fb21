//! Scheduling context for dispatching rule evaluation.

/// Runtime planning state passed to dispatching rules.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Track the student follows.
    pub active_track: String,
    /// Zero-based term currently being filled.
    pub term_index: usize,
    /// Credits already placed in the current term.
    pub term_credits: u32,
    /// Per-term credit limit.
    pub max_credits: u32,
}

impl SchedulingContext {
    /// Creates a context for the given track at the start of the first term.
    pub fn for_track(track: impl Into<String>) -> Self {
        Self {
            active_track: track.into(),
            ..Default::default()
        }
    }

    /// Sets the current term.
    pub fn at_term(mut self, term_index: usize) -> Self {
        self.term_index = term_index;
        self
    }

    /// Sets the per-term credit limit.
    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits = max_credits;
        self
    }

    /// Credits still available in the current term.
    pub fn remaining_credits(&self) -> u32 {
        self.max_credits.saturating_sub(self.term_credits)
    }
}
