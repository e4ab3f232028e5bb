//! Consolidated timer queue.
//!
//! Every deadline the scheduler ever arms lives here, so disabling the
//! scheduler is a single `cancel_all` instead of N scattered handles. Each
//! [`TimerSlot`] holds at most one pending deadline; re-scheduling a slot
//! replaces the previous entry, which gives debounce and inactivity timers
//! their reset-on-activity semantics for free.

use std::time::Instant;

/// What to do when a timer fires. Lock-related kinds carry the lock
/// generation they were armed for, so a stale timer can never clear a
/// newer lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Default 4 s lock expiry.
    LockExpiry { seq: u64 },
    /// Second phase of the anger reaction: play LookFront.
    StareFollowUp,
    /// Manual unlock at the end of the stare hold.
    StareRelease { seq: u64 },
    /// Manual unlock when a speech bubble ends.
    SpeechEnd { seq: u64 },
    /// Anger-banded idle firing.
    IdleTick,
    /// Independent 8-12 s ambient drift.
    AmbientDrift,
    /// Pointer debounce elapsed.
    MouseDebounce,
    /// Typing inactivity (3 s without a keystroke).
    TypingIdle,
    /// Konami buffer inactivity reset.
    SequenceReset,
    /// Konami retrigger cooldown elapsed.
    SequenceCooldown,
    /// Second step of the Konami animation pair.
    KonamiFollowUp,
}

/// Slot identity of a [`TimerKind`], ignoring payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    LockExpiry,
    StareFollowUp,
    StareRelease,
    SpeechEnd,
    IdleTick,
    AmbientDrift,
    MouseDebounce,
    TypingIdle,
    SequenceReset,
    SequenceCooldown,
    KonamiFollowUp,
}

impl TimerKind {
    pub fn slot(&self) -> TimerSlot {
        match self {
            Self::LockExpiry { .. } => TimerSlot::LockExpiry,
            Self::StareFollowUp => TimerSlot::StareFollowUp,
            Self::StareRelease { .. } => TimerSlot::StareRelease,
            Self::SpeechEnd { .. } => TimerSlot::SpeechEnd,
            Self::IdleTick => TimerSlot::IdleTick,
            Self::AmbientDrift => TimerSlot::AmbientDrift,
            Self::MouseDebounce => TimerSlot::MouseDebounce,
            Self::TypingIdle => TimerSlot::TypingIdle,
            Self::SequenceReset => TimerSlot::SequenceReset,
            Self::SequenceCooldown => TimerSlot::SequenceCooldown,
            Self::KonamiFollowUp => TimerSlot::KonamiFollowUp,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    due: Instant,
    kind: TimerKind,
}

/// All pending deadlines, one per slot.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire at `due`, replacing any pending entry in the
    /// same slot.
    pub fn schedule(&mut self, due: Instant, kind: TimerKind) {
        self.cancel(kind.slot());
        self.entries.push(TimerEntry { due, kind });
    }

    /// Drop the pending entry for `slot`, if any.
    pub fn cancel(&mut self, slot: TimerSlot) {
        self.entries.retain(|e| e.kind.slot() != slot);
    }

    /// Drop every pending entry. This is the whole teardown story.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Earliest pending deadline, for the event-loop driver.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return every entry due at or before `now`, ordered by
    /// deadline.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<TimerEntry> = Vec::new();
        self.entries.retain(|e| {
            if e.due <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| e.kind).collect()
    }

    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        self.entries.iter().any(|e| e.kind.slot() == slot)
    }

    pub fn deadline_for(&self, slot: TimerSlot) -> Option<Instant> {
        self.entries
            .iter()
            .find(|e| e.kind.slot() == slot)
            .map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
