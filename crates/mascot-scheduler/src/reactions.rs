//! Edge detection over externally owned state.
//!
//! Anger, error count and the linting flag are owned by the host; the
//! scheduler only keeps previous-value snapshots and reacts to three
//! transitions: anger rising, errors dropping to zero, linting switching
//! on.

/// A state transition that warrants an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Anger level increased since the last observation.
    AngerRose,
    /// Error count went from above zero to zero.
    ErrorsCleared,
    /// A lint pass started.
    LintStarted,
}

#[derive(Debug)]
pub struct ReactionTriggers {
    prev_anger: u8,
    prev_errors: u32,
    prev_linting: bool,
}

impl ReactionTriggers {
    pub fn new(anger: u8, errors: u32, linting: bool) -> Self {
        Self {
            prev_anger: anger,
            prev_errors: errors,
            prev_linting: linting,
        }
    }

    pub fn on_anger(&mut self, anger: u8) -> Option<Reaction> {
        let rose = anger > self.prev_anger;
        self.prev_anger = anger;
        rose.then_some(Reaction::AngerRose)
    }

    pub fn on_errors(&mut self, errors: u32) -> Option<Reaction> {
        let cleared = self.prev_errors > 0 && errors == 0;
        self.prev_errors = errors;
        cleared.then_some(Reaction::ErrorsCleared)
    }

    pub fn on_linting(&mut self, linting: bool) -> Option<Reaction> {
        let started = linting && !self.prev_linting;
        self.prev_linting = linting;
        started.then_some(Reaction::LintStarted)
    }
}

impl Default for ReactionTriggers {
    fn default() -> Self {
        Self::new(0, 0, false)
    }
}
