//! Pointer quadrant tracking with debounce and hysteresis.
//!
//! Raw pointer moves are debounced; when the debounce elapses the latest
//! position is bucketed into a quadrant relative to the agent's center,
//! with a dead zone so jitter near center emits nothing. A glance is only
//! emitted when the quadrant differs from the last one emitted.

use std::time::{Duration, Instant};

use mascot_common::{AnimationId, MouseQuadrant, Point};

/// Bucket a pointer position relative to `center`. Positions within
/// `dead_zone` pixels on both axes map to `Center`; otherwise the
/// dominant axis wins.
pub fn quadrant_for(position: Point, center: Point, dead_zone: f64) -> MouseQuadrant {
    let dx = position.x - center.x;
    let dy = position.y - center.y;
    if dx.abs() <= dead_zone && dy.abs() <= dead_zone {
        return MouseQuadrant::Center;
    }
    if dx.abs() >= dy.abs() {
        if dx < 0.0 {
            MouseQuadrant::Left
        } else {
            MouseQuadrant::Right
        }
    } else if dy < 0.0 {
        MouseQuadrant::Up
    } else {
        MouseQuadrant::Down
    }
}

/// The glance animation for a directional quadrant. `Center` has none.
pub fn glance_for(quadrant: MouseQuadrant) -> Option<AnimationId> {
    match quadrant {
        MouseQuadrant::Left => Some(AnimationId::GlanceLeft),
        MouseQuadrant::Right => Some(AnimationId::GlanceRight),
        MouseQuadrant::Up => Some(AnimationId::GlanceUp),
        MouseQuadrant::Down => Some(AnimationId::GlanceDown),
        MouseQuadrant::Center => None,
    }
}

pub struct MouseQuadrantTracker {
    dead_zone: f64,
    debounce: Duration,
    pending: Option<Point>,
    last_emitted: MouseQuadrant,
}

impl MouseQuadrantTracker {
    pub fn new(dead_zone: f64, debounce: Duration) -> Self {
        Self {
            dead_zone,
            debounce,
            pending: None,
            last_emitted: MouseQuadrant::Center,
        }
    }

    /// Record a pointer move; returns the deadline the caller should arm
    /// the debounce timer for. Later moves within the window replace the
    /// pending position and push the deadline out.
    pub fn pointer_moved(&mut self, position: Point, now: Instant) -> Instant {
        self.pending = Some(position);
        now + self.debounce
    }

    /// Called when the debounce elapses. `center` is the agent's current
    /// on-screen center; when unknown the frame is skipped and the next
    /// pointer move retries. Returns a glance only on a quadrant change.
    pub fn debounce_elapsed(&mut self, center: Option<Point>) -> Option<AnimationId> {
        let position = self.pending.take()?;
        let center = center?;
        let quadrant = quadrant_for(position, center, self.dead_zone);
        if quadrant == MouseQuadrant::Center || quadrant == self.last_emitted {
            return None;
        }
        self.last_emitted = quadrant;
        glance_for(quadrant)
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emitted = MouseQuadrant::Center;
    }
}
