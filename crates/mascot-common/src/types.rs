use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority class for an animation request. Lower numeric value wins.
///
/// A request preempts the current lock only when its tier is numerically
/// less than or equal to the locked tier, so equal-tier requests always
/// replace one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimationTier {
    /// One-shot reactions that must never be interrupted (success, easter eggs).
    Events = 1,
    /// Direct responses to user activity (fast typing, anger reactions).
    Active = 2,
    /// Ambient tracking of the user (pointer quadrant glances).
    Passive = 3,
    /// Low-priority drift played when nothing else is happening.
    Idle = 4,
}

impl AnimationTier {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AnimationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Events => "events",
            Self::Active => "active",
            Self::Passive => "passive",
            Self::Idle => "idle",
        };
        write!(f, "{name}")
    }
}

/// The closed set of animations the agent sink understands.
///
/// A sink may still reject an id at runtime (missing clip in the loaded
/// pack); that surfaces as a [`crate::PlaybackError`], not a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationId {
    // Idle drift set, picked by mood
    Drift,
    Groom,
    LookAround,
    CheckWatch,
    LookDown,
    Wave,
    GestureDown,
    // Pointer-quadrant glances
    GlanceLeft,
    GlanceRight,
    GlanceUp,
    GlanceDown,
    // Typing and state reactions
    Writing,
    Pester,
    Scold,
    Thinking,
    Celebrate,
    Alert,
    LookFront,
    // Easter eggs
    KonamiIntro,
    KonamiDance,
    Mock,
    // Speech accompaniment
    Speak,
}

impl AnimationId {
    /// Stable lowercase name, usable as a clip lookup key by sinks.
    pub fn name(self) -> &'static str {
        match self {
            Self::Drift => "drift",
            Self::Groom => "groom",
            Self::LookAround => "look_around",
            Self::CheckWatch => "check_watch",
            Self::LookDown => "look_down",
            Self::Wave => "wave",
            Self::GestureDown => "gesture_down",
            Self::GlanceLeft => "glance_left",
            Self::GlanceRight => "glance_right",
            Self::GlanceUp => "glance_up",
            Self::GlanceDown => "glance_down",
            Self::Writing => "writing",
            Self::Pester => "pester",
            Self::Scold => "scold",
            Self::Thinking => "thinking",
            Self::Celebrate => "celebrate",
            Self::Alert => "alert",
            Self::LookFront => "look_front",
            Self::KonamiIntro => "konami_intro",
            Self::KonamiDance => "konami_dance",
            Self::Mock => "mock",
            Self::Speak => "speak",
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One-shot audio cues played alongside certain animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Success chime when the error count drops to zero.
    Chime,
}

/// Directional bucket of the pointer relative to the agent's center.
///
/// `Center` means the pointer sits inside the dead zone and no glance
/// should be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseQuadrant {
    Left,
    Right,
    Up,
    Down,
    Center,
}

/// A screen-space position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Modifier key state bundled with key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}
