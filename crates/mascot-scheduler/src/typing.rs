//! Keystroke rate tracking.
//!
//! Keystroke timestamps are kept in a trailing window and turned into a
//! rolling words-per-minute figure (the usual 5-keystrokes-per-word
//! proxy). The monitor also owns the modifier filter: a bare press of
//! Shift or Control is not typing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Time-ordered keystroke timestamps pruned to a trailing window.
#[derive(Debug)]
pub struct KeystrokeWindow {
    stamps: VecDeque<Instant>,
    window: Duration,
}

impl KeystrokeWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            stamps: VecDeque::new(),
            window,
        }
    }

    pub fn push(&mut self, now: Instant) {
        self.prune(now);
        self.stamps.push_back(now);
    }

    /// Rolling WPM: keystrokes/5 divided by minutes elapsed since the
    /// oldest stroke in the window. Fewer than two strokes is 0.
    pub fn wpm(&self, now: Instant) -> f64 {
        if self.stamps.len() < 2 {
            return 0.0;
        }
        let oldest = *self.stamps.front().unwrap();
        let elapsed_min = now.duration_since(oldest).as_secs_f64() / 60.0;
        if elapsed_min <= 0.0 {
            return 0.0;
        }
        let words = self.stamps.len() as f64 / 5.0;
        words / elapsed_min
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    fn prune(&mut self, now: Instant) {
        let cutoff = now.checked_sub(self.window);
        if let Some(cutoff) = cutoff {
            while self.stamps.front().is_some_and(|&t| t < cutoff) {
                self.stamps.pop_front();
            }
        }
    }
}

/// What a keystroke meant, from the scheduler's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingSignal {
    /// The stroke counted as typing (editable surface, not a modifier).
    pub counted: bool,
    /// Rolling WPM crossed the fast-typing threshold.
    pub fast: bool,
}

pub struct TypingMonitor {
    window: KeystrokeWindow,
    wpm_threshold: f64,
}

impl TypingMonitor {
    pub fn new(window: Duration, wpm_threshold: f64) -> Self {
        Self {
            window: KeystrokeWindow::new(window),
            wpm_threshold,
        }
    }

    /// Record a keydown on an editable surface.
    pub fn key_pressed(&mut self, key: &str, now: Instant) -> TypingSignal {
        if is_modifier(key) {
            return TypingSignal {
                counted: false,
                fast: false,
            };
        }
        self.window.push(now);
        TypingSignal {
            counted: true,
            fast: self.window.wpm(now) > self.wpm_threshold,
        }
    }

    pub fn wpm(&self, now: Instant) -> f64 {
        self.window.wpm(now)
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

/// Modifier-only key names as delivered by the host event layer.
pub fn is_modifier(key: &str) -> bool {
    matches!(
        key,
        "Control" | "Alt" | "Shift" | "Super" | "Meta" | "CapsLock" | "AltGraph"
    )
}
