//! The agent handle the arbiter plays into.
//!
//! The scheduler's only side effects go through [`AnimationSink`]. A sink
//! may reject a clip at runtime (pack still loading, unknown id on an old
//! pack); the arbiter logs that and moves on without touching its lock.

use std::time::Duration;

use mascot_common::{AnimationId, PlaybackError, SoundEffect};

pub trait AnimationSink {
    /// Start playing the given animation, replacing whatever is running.
    fn play(&mut self, animation: AnimationId) -> Result<(), PlaybackError>;

    /// Fire a one-shot sound effect. Best effort, never fails.
    fn play_sound(&mut self, effect: SoundEffect);

    /// Show a speech bubble for the given duration. Sinks without a
    /// bubble surface can ignore this.
    fn speak(&mut self, _text: &str, _duration: Duration) {}
}

/// Records every call for assertions. Can be armed to fail playback of a
/// specific animation to exercise the arbiter's error path.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<AnimationId>,
    pub sounds: Vec<SoundEffect>,
    pub spoken: Vec<(String, Duration)>,
    pub fail_on: Option<AnimationId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(animation: AnimationId) -> Self {
        Self {
            fail_on: Some(animation),
            ..Self::default()
        }
    }
}

impl AnimationSink for RecordingSink {
    fn play(&mut self, animation: AnimationId) -> Result<(), PlaybackError> {
        if self.fail_on == Some(animation) {
            return Err(PlaybackError::UnknownAnimation(animation));
        }
        self.played.push(animation);
        Ok(())
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    fn speak(&mut self, text: &str, duration: Duration) {
        self.spoken.push((text.to_string(), duration));
    }
}
