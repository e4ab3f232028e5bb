//! Tier arbiter — the single writer of the priority lock.
//!
//! Every animation request from every collector funnels through
//! [`TierArbiter::request`], which resolves it synchronously against the
//! one `PriorityLock`: accept-or-reject, no queue. Locks carry a
//! generation counter so the expiry timer for an old lock can never
//! clobber a newer one that happened to reuse the same tier.

use std::time::{Duration, Instant};

use mascot_common::{AnimationId, AnimationTier};

use crate::sink::AnimationSink;

/// The arbiter's sole persistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityLock {
    pub tier: AnimationTier,
    pub expires_at: Instant,
    pub seq: u64,
}

/// Proof that a request was honored; carries what the caller needs to arm
/// the matching expiry timer.
#[derive(Debug, Clone, Copy)]
pub struct LockTicket {
    pub seq: u64,
    pub expires_at: Instant,
}

pub struct TierArbiter {
    lock: Option<PriorityLock>,
    next_seq: u64,
    hold: Duration,
}

impl TierArbiter {
    pub fn new(hold: Duration) -> Self {
        Self {
            lock: None,
            next_seq: 0,
            hold,
        }
    }

    /// The active lock, treating an expired one as absent.
    pub fn current(&self, now: Instant) -> Option<PriorityLock> {
        self.lock.filter(|l| l.expires_at > now)
    }

    /// Resolve a request against the current lock.
    ///
    /// Rejected when an unexpired lock is strictly more important
    /// (numerically smaller tier); equal tiers always preempt. On a
    /// playback error the lock is left untouched and `None` is returned —
    /// the failure is logged and otherwise invisible.
    pub fn request(
        &mut self,
        sink: &mut dyn AnimationSink,
        animation: AnimationId,
        tier: AnimationTier,
        now: Instant,
    ) -> Option<LockTicket> {
        if let Some(lock) = self.current(now) {
            if lock.tier < tier {
                tracing::trace!(%animation, %tier, held = %lock.tier, "request rejected");
                return None;
            }
        }

        if let Err(e) = sink.play(animation) {
            tracing::warn!(%animation, error = %e, "animation playback failed");
            return None;
        }

        self.next_seq += 1;
        let lock = PriorityLock {
            tier,
            expires_at: now + self.hold,
            seq: self.next_seq,
        };
        self.lock = Some(lock);
        tracing::debug!(%animation, %tier, seq = lock.seq, "animation lock taken");
        Some(LockTicket {
            seq: lock.seq,
            expires_at: lock.expires_at,
        })
    }

    /// Clear the lock if it is still the generation the caller armed a
    /// timer for. Stale timers fall through harmlessly.
    pub fn release(&mut self, seq: u64) {
        if self.lock.map(|l| l.seq) == Some(seq) {
            self.lock = None;
        }
    }

    /// Push the current lock's expiry out to `until` (speech and stare
    /// holds). Returns the lock's seq so the caller can arm the matching
    /// manual release.
    pub fn extend(&mut self, until: Instant) -> Option<u64> {
        let lock = self.lock.as_mut()?;
        lock.expires_at = until;
        Some(lock.seq)
    }

    /// Unconditional clear, for teardown.
    pub fn clear(&mut self) {
        self.lock = None;
    }
}
