//! Speech duration and the gate it holds over ambient collectors.
//!
//! While a speech bubble is up, the idle driver and mouse tracker are
//! suppressed and the Events-tier speaking lock is held for the full
//! reading time.

use std::time::{Duration, Instant};

/// Reading time for a bubble: 70 ms per character, 2 s floor.
pub fn speech_duration(text: &str, min: Duration, per_char: Duration) -> Duration {
    let chars = text.chars().count() as u32;
    min.max(per_char * chars)
}

/// Tracks whether speech is currently active.
#[derive(Debug, Default)]
pub struct SpeechGate {
    active_until: Option<Instant>,
}

impl SpeechGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, now: Instant, duration: Duration) {
        self.active_until = Some(now + duration);
    }

    pub fn end(&mut self) {
        self.active_until = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.active_until.is_some_and(|until| until > now)
    }
}
