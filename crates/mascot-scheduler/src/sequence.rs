//! Hidden key-sequence detection and close-window interception.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use mascot_common::Modifiers;

/// The one sequence that matters.
pub const KONAMI_SEQUENCE: [&str; 10] = [
    "Up", "Up", "Down", "Down", "Left", "Right", "Left", "Right", "B", "A",
];

const SEQUENCE_LEN: usize = 10;

/// Ring buffer of recent key codes matched exactly against
/// [`KONAMI_SEQUENCE`]. The buffer resets after 5 s of inactivity and a
/// match arms a 10 s cooldown; both timers are owned by the scheduler's
/// queue, this type only exposes the state transitions.
#[derive(Debug, Default)]
pub struct KeySequenceDetector {
    buffer: VecDeque<String>,
    cooling: bool,
}

impl KeySequenceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a key code. Returns `true` on an exact full-buffer match
    /// outside the cooldown; the buffer is drained on a match so the
    /// sequence must be typed again from scratch.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        self.buffer.push_back(key.to_string());
        if self.buffer.len() > SEQUENCE_LEN {
            self.buffer.pop_front();
        }
        if self.cooling || self.buffer.len() < SEQUENCE_LEN {
            return false;
        }
        let matched = self
            .buffer
            .iter()
            .zip(KONAMI_SEQUENCE.iter())
            .all(|(got, want)| got == want);
        if matched {
            self.buffer.clear();
            self.cooling = true;
        }
        matched
    }

    /// Inactivity reset (5 s without a key).
    pub fn reset_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Cooldown elapsed; matching may fire again.
    pub fn end_cooldown(&mut self) {
        self.cooling = false;
    }

    pub fn is_cooling(&self) -> bool {
        self.cooling
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

/// Messages thrown at users who try to close the window.
const CLOSE_MESSAGES: [&str; 4] = [
    "Leaving so soon?",
    "You can't quit me.",
    "Nice try. The bugs stay with you.",
    "Closing the window won't fix the code.",
];

/// Detects the platform close chord so the host can swallow it and the
/// agent can gloat instead.
#[derive(Debug, Default)]
pub struct CloseIntercept;

impl CloseIntercept {
    pub fn new() -> Self {
        Self
    }

    /// Alt+F4 everywhere except Apple platforms, where it is Cmd+Q.
    pub fn matches_chord(&self, key: &str, mods: Modifiers) -> bool {
        if cfg!(target_os = "macos") {
            mods.super_key && key.eq_ignore_ascii_case("q")
        } else {
            mods.alt && key == "F4"
        }
    }

    pub fn pick_message<R: Rng>(&self, rng: &mut R) -> &'static str {
        CLOSE_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(CLOSE_MESSAGES[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn feed(detector: &mut KeySequenceDetector, keys: &[&str]) -> bool {
        let mut matched = false;
        for key in keys {
            matched = detector.key_pressed(key);
        }
        matched
    }

    #[test]
    fn exact_sequence_matches() {
        let mut d = KeySequenceDetector::new();
        assert!(feed(&mut d, &KONAMI_SEQUENCE));
    }

    #[test]
    fn one_wrong_key_does_not_match() {
        let mut d = KeySequenceDetector::new();
        let mut keys = KONAMI_SEQUENCE;
        keys[8] = "X"; // B -> X
        assert!(!feed(&mut d, &keys));
    }

    #[test]
    fn sequence_matches_after_leading_noise() {
        let mut d = KeySequenceDetector::new();
        feed(&mut d, &["Q", "W", "E"]);
        // The ring buffer keeps only the trailing 10 keys
        assert!(feed(&mut d, &KONAMI_SEQUENCE));
    }

    #[test]
    fn cooldown_blocks_immediate_retrigger() {
        let mut d = KeySequenceDetector::new();
        assert!(feed(&mut d, &KONAMI_SEQUENCE));
        assert!(d.is_cooling());

        // Typed again during cooldown: no fire
        assert!(!feed(&mut d, &KONAMI_SEQUENCE));

        d.end_cooldown();
        // Buffer filled during cooldown never matched; needs a fresh pass
        d.reset_buffer();
        assert!(feed(&mut d, &KONAMI_SEQUENCE));
    }

    #[test]
    fn inactivity_reset_clears_progress() {
        let mut d = KeySequenceDetector::new();
        feed(&mut d, &KONAMI_SEQUENCE[..8]);
        assert_eq!(d.buffer_len(), 8);

        d.reset_buffer();
        assert_eq!(d.buffer_len(), 0);
        // Finishing the tail alone is not a match
        assert!(!feed(&mut d, &KONAMI_SEQUENCE[8..]));
    }

    #[test]
    fn close_chord_matches_platform() {
        let intercept = CloseIntercept::new();
        if cfg!(target_os = "macos") {
            let m = Modifiers {
                super_key: true,
                ..Modifiers::default()
            };
            assert!(intercept.matches_chord("Q", m));
            assert!(intercept.matches_chord("q", m));
            assert!(!intercept.matches_chord("Q", Modifiers::default()));
        } else {
            let m = Modifiers {
                alt: true,
                ..Modifiers::default()
            };
            assert!(intercept.matches_chord("F4", m));
            assert!(!intercept.matches_chord("F4", Modifiers::default()));
            assert!(!intercept.matches_chord("F5", m));
        }
    }

    #[test]
    fn close_message_comes_from_pool() {
        let intercept = CloseIntercept::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let msg = intercept.pick_message(&mut rng);
            assert!(CLOSE_MESSAGES.contains(&msg));
        }
    }
}
