//! Idle driver: anger-scaled ambient movement.
//!
//! Two timers feed this module. The main idle timer reschedules itself
//! after every firing with an interval drawn from a band that narrows as
//! anger rises, so an angry agent fidgets more. A second, slower ambient
//! drift timer (8-12 s) covers the case where the agent is completely
//! alone. Firings are dropped when the user interacted within the last
//! 5 s or speech is up; the drop does not stop the rescheduling.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use mascot_common::AnimationId;

/// Agent mood derived from the anger level, used for the weighted pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mood {
    Calm,
    Annoyed,
    Angry,
}

fn mood(anger: u8) -> Mood {
    match anger {
        0..=2 => Mood::Calm,
        3..=4 => Mood::Annoyed,
        _ => Mood::Angry,
    }
}

/// Milliseconds band for the anger-scaled idle interval.
pub fn interval_band(anger: u8) -> (u64, u64) {
    match anger {
        a if a >= 5 => (1_000, 2_000),
        4 => (2_000, 4_000),
        3 => (3_000, 6_000),
        _ => (5_000, 10_000),
    }
}

/// Band for the standalone ambient drift timer.
pub const AMBIENT_BAND: (u64, u64) = (8_000, 12_000);

pub struct IdleDriver {
    interaction_grace: Duration,
}

impl IdleDriver {
    pub fn new(interaction_grace: Duration) -> Self {
        Self { interaction_grace }
    }

    /// Draw the next idle interval for the current anger level.
    pub fn next_interval<R: Rng>(&self, rng: &mut R, anger: u8) -> Duration {
        let (min, max) = interval_band(anger);
        Duration::from_millis(rng.gen_range(min..max))
    }

    /// Draw the next ambient drift interval.
    pub fn next_ambient_interval<R: Rng>(&self, rng: &mut R) -> Duration {
        let (min, max) = AMBIENT_BAND;
        Duration::from_millis(rng.gen_range(min..max))
    }

    /// Whether an idle firing should be dropped because the user was
    /// active too recently.
    pub fn suppressed_by_interaction(&self, last_interaction: Option<Instant>, now: Instant) -> bool {
        last_interaction.is_some_and(|t| now.duration_since(t) < self.interaction_grace)
    }

    /// Weighted mood pick: calm agents groom and look around, annoyed
    /// ones check the time, angry ones demand attention.
    pub fn pick_animation<R: Rng>(&self, rng: &mut R, anger: u8) -> AnimationId {
        let pool: &[(AnimationId, u32)] = match mood(anger) {
            Mood::Calm => &[(AnimationId::Groom, 3), (AnimationId::LookAround, 2)],
            Mood::Annoyed => &[(AnimationId::CheckWatch, 3), (AnimationId::LookDown, 2)],
            Mood::Angry => &[(AnimationId::Wave, 3), (AnimationId::GestureDown, 2)],
        };
        pool.choose_weighted(rng, |(_, weight)| *weight)
            .map(|(anim, _)| *anim)
            .unwrap_or(AnimationId::Drift)
    }
}
