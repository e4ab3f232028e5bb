//! Scheduler configuration.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Values are durations in milliseconds and plain thresholds; everything
//! has a sensible default matching the behavior the agent shipped with.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use mascot_common::ConfigError;

/// Arbiter lock timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Default lock hold in ms (valid range: 1000-30000).
    pub lock_hold_ms: u64,
    /// Delay before the LookFront phase of an anger reaction (valid range: 500-10000).
    pub stare_delay_ms: u64,
    /// Extra hold after LookFront before the manual unlock (valid range: 500-10000).
    pub stare_hold_ms: u64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            lock_hold_ms: 4_000,
            stare_delay_ms: 2_000,
            stare_hold_ms: 3_000,
        }
    }
}

/// Idle driver tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Idle firings are dropped if the user interacted within this many ms
    /// (valid range: 1000-60000).
    pub interaction_grace_ms: u64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            interaction_grace_ms: 5_000,
        }
    }
}

/// Pointer tracking tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Pointer debounce in ms (valid range: 150-500).
    pub debounce_ms: u64,
    /// Dead zone around the agent center in px (valid range: 0-200).
    pub dead_zone_px: f64,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            dead_zone_px: 30.0,
        }
    }
}

/// Typing monitor tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Trailing keystroke window in ms (valid range: 5000-300000).
    pub window_ms: u64,
    /// WPM above which the fast-typing animation fires (valid range: 10-500).
    pub wpm_threshold: f64,
    /// Inactivity before pestering about outstanding errors, in ms
    /// (valid range: 1000-30000).
    pub inactivity_ms: u64,
    /// Historical repeat-mistake count at which pestering escalates
    /// (valid range: 1-100).
    pub repeat_mistake_threshold: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            wpm_threshold: 100.0,
            inactivity_ms: 3_000,
            repeat_mistake_threshold: 4,
        }
    }
}

/// Easter-egg timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Konami buffer inactivity reset in ms (valid range: 1000-30000).
    pub reset_ms: u64,
    /// Cooldown after a match in ms (valid range: 1000-120000).
    pub cooldown_ms: u64,
    /// Gap between the two steps of the Konami pair in ms (valid range: 200-5000).
    pub step_delay_ms: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            reset_ms: 5_000,
            cooldown_ms: 10_000,
            step_delay_ms: 1_500,
        }
    }
}

/// Speech bubble timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Minimum bubble duration in ms (valid range: 500-10000).
    pub min_ms: u64,
    /// Additional duration per character in ms (valid range: 10-500).
    pub per_char_ms: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            min_ms: 2_000,
            per_char_ms: 70,
        }
    }
}

/// Top-level scheduler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub arbiter: ArbiterConfig,
    pub idle: IdleConfig,
    pub mouse: MouseConfig,
    pub typing: TypingConfig,
    pub sequence: SequenceConfig,
    pub speech: SpeechConfig,
}

impl SchedulerConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn lock_hold(&self) -> Duration {
        Duration::from_millis(self.arbiter.lock_hold_ms)
    }

    pub fn stare_delay(&self) -> Duration {
        Duration::from_millis(self.arbiter.stare_delay_ms)
    }

    pub fn stare_hold(&self) -> Duration {
        Duration::from_millis(self.arbiter.stare_hold_ms)
    }

    pub fn interaction_grace(&self) -> Duration {
        Duration::from_millis(self.idle.interaction_grace_ms)
    }

    pub fn mouse_debounce(&self) -> Duration {
        Duration::from_millis(self.mouse.debounce_ms)
    }

    pub fn typing_window(&self) -> Duration {
        Duration::from_millis(self.typing.window_ms)
    }

    pub fn typing_inactivity(&self) -> Duration {
        Duration::from_millis(self.typing.inactivity_ms)
    }

    pub fn sequence_reset(&self) -> Duration {
        Duration::from_millis(self.sequence.reset_ms)
    }

    pub fn sequence_cooldown(&self) -> Duration {
        Duration::from_millis(self.sequence.cooldown_ms)
    }

    pub fn sequence_step_delay(&self) -> Duration {
        Duration::from_millis(self.sequence.step_delay_ms)
    }

    pub fn speech_min(&self) -> Duration {
        Duration::from_millis(self.speech.min_ms)
    }

    pub fn speech_per_char(&self) -> Duration {
        Duration::from_millis(self.speech.per_char_ms)
    }

    /// Run all range validations, collecting every violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        validate_range(&mut errors, "arbiter.lock_hold_ms", self.arbiter.lock_hold_ms, 1_000, 30_000);
        validate_range(&mut errors, "arbiter.stare_delay_ms", self.arbiter.stare_delay_ms, 500, 10_000);
        validate_range(&mut errors, "arbiter.stare_hold_ms", self.arbiter.stare_hold_ms, 500, 10_000);

        validate_range(
            &mut errors,
            "idle.interaction_grace_ms",
            self.idle.interaction_grace_ms,
            1_000,
            60_000,
        );

        validate_range(&mut errors, "mouse.debounce_ms", self.mouse.debounce_ms, 150, 500);
        validate_range_f64(&mut errors, "mouse.dead_zone_px", self.mouse.dead_zone_px, 0.0, 200.0);

        validate_range(&mut errors, "typing.window_ms", self.typing.window_ms, 5_000, 300_000);
        validate_range_f64(&mut errors, "typing.wpm_threshold", self.typing.wpm_threshold, 10.0, 500.0);
        validate_range(&mut errors, "typing.inactivity_ms", self.typing.inactivity_ms, 1_000, 30_000);
        validate_range(
            &mut errors,
            "typing.repeat_mistake_threshold",
            u64::from(self.typing.repeat_mistake_threshold),
            1,
            100,
        );

        validate_range(&mut errors, "sequence.reset_ms", self.sequence.reset_ms, 1_000, 30_000);
        validate_range(&mut errors, "sequence.cooldown_ms", self.sequence.cooldown_ms, 1_000, 120_000);
        validate_range(&mut errors, "sequence.step_delay_ms", self.sequence.step_delay_ms, 200, 5_000);

        validate_range(&mut errors, "speech.min_ms", self.speech.min_ms, 500, 10_000);
        validate_range(&mut errors, "speech.per_char_ms", self.speech.per_char_ms, 10, 500);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(errors.join("; ")))
        }
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} must be between {min} and {max} (got {value})"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} must be between {min} and {max} (got {value})"));
    }
}
