//! The scheduler: one struct, one writer, two entry points.
//!
//! All mutable state — the priority lock, every timer, every collector
//! buffer — lives here and is only touched from [`Scheduler::handle_event`]
//! and [`Scheduler::tick`]. Collectors never see the lock; they hand the
//! scheduler facts and the scheduler decides what to submit to the
//! arbiter.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use mascot_common::{
    AnimationId, AnimationTier, EventBus, Modifiers, Point, SchedulerEvent, SoundEffect,
};

use crate::arbiter::{LockTicket, TierArbiter};
use crate::config::SchedulerConfig;
use crate::idle::IdleDriver;
use crate::mouse::MouseQuadrantTracker;
use crate::reactions::{Reaction, ReactionTriggers};
use crate::sequence::{CloseIntercept, KeySequenceDetector};
use crate::sink::AnimationSink;
use crate::speech::{speech_duration, SpeechGate};
use crate::timer::{TimerKind, TimerQueue, TimerSlot};
use crate::typing::TypingMonitor;

/// Environment events fed to the scheduler by the host.
#[derive(Debug, Clone)]
pub enum EnvEvent {
    KeyDown {
        key: String,
        mods: Modifiers,
        /// Whether the key landed on an editable surface (counts as typing).
        editable: bool,
    },
    PointerMoved(Point),
    /// The agent's on-screen center changed (window moved or resized).
    AgentMoved(Point),
    AngerChanged(u8),
    ErrorCountChanged(u32),
    LintingChanged(bool),
    /// Historical repeat-mistake count, supplied by the host's store.
    RepeatMistakes(u32),
    /// Show a speech bubble; takes an Events-tier lock for its duration.
    Speak(String),
    /// The platform delivered a close-window request directly.
    CloseRequested,
    SetEnabled(bool),
}

pub struct Scheduler {
    config: SchedulerConfig,
    enabled: bool,
    sink: Option<Box<dyn AnimationSink + Send>>,
    bus: EventBus,
    timers: TimerQueue,
    arbiter: TierArbiter,
    idle: IdleDriver,
    mouse: MouseQuadrantTracker,
    typing: TypingMonitor,
    reactions: ReactionTriggers,
    konami: KeySequenceDetector,
    close: CloseIntercept,
    speech: SpeechGate,
    rng: StdRng,
    last_interaction: Option<Instant>,
    agent_center: Option<Point>,
    anger: u8,
    errors: u32,
    repeat_mistakes: u32,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn with_seed(config: SchedulerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SchedulerConfig, rng: StdRng) -> Self {
        let idle = IdleDriver::new(config.interaction_grace());
        let mouse = MouseQuadrantTracker::new(config.mouse.dead_zone_px, config.mouse_debounce());
        let typing = TypingMonitor::new(config.typing_window(), config.typing.wpm_threshold);
        let arbiter = TierArbiter::new(config.lock_hold());
        Self {
            config,
            enabled: false,
            sink: None,
            bus: EventBus::new(64),
            timers: TimerQueue::new(),
            arbiter,
            idle,
            mouse,
            typing,
            reactions: ReactionTriggers::default(),
            konami: KeySequenceDetector::new(),
            close: CloseIntercept::new(),
            speech: SpeechGate::new(),
            rng,
            last_interaction: None,
            agent_center: None,
            anger: 0,
            errors: 0,
            repeat_mistakes: 0,
        }
    }

    /// Attach the agent handle. Until one is set, every request silently
    /// no-ops.
    pub fn set_sink(&mut self, sink: Box<dyn AnimationSink + Send>) {
        self.sink = Some(sink);
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Earliest pending deadline; the event-loop driver sleeps until it.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Master switch. Enabling arms the idle timers; disabling cancels
    /// every outstanding timer, drops the lock and clears collector
    /// state. Both directions are idempotent.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            tracing::debug!("scheduler enabled");
            let interval = self.idle.next_interval(&mut self.rng, self.anger);
            self.timers.schedule(now + interval, TimerKind::IdleTick);
            let ambient = self.idle.next_ambient_interval(&mut self.rng);
            self.timers.schedule(now + ambient, TimerKind::AmbientDrift);
        } else {
            tracing::debug!("scheduler disabled, cancelling all timers");
            self.timers.cancel_all();
            self.arbiter.clear();
            self.speech.end();
            self.mouse.reset();
            self.typing.reset();
            self.konami.reset_buffer();
            self.bus.publish(SchedulerEvent::Disabled);
        }
    }

    /// Feed one environment event. Requests resolve synchronously; the
    /// only deferred work goes through the timer queue.
    pub fn handle_event(&mut self, event: EnvEvent, now: Instant) {
        match event {
            EnvEvent::SetEnabled(enabled) => self.set_enabled(enabled, now),
            EnvEvent::AgentMoved(center) => self.agent_center = Some(center),
            // Snapshots update even while disabled so re-enabling does not
            // replay stale transitions.
            EnvEvent::AngerChanged(level) => {
                let reaction = self.reactions.on_anger(level);
                self.anger = level;
                if self.enabled && reaction == Some(Reaction::AngerRose) {
                    self.on_anger_rose(now);
                }
            }
            EnvEvent::ErrorCountChanged(count) => {
                let reaction = self.reactions.on_errors(count);
                self.errors = count;
                if self.enabled && reaction == Some(Reaction::ErrorsCleared) {
                    self.on_errors_cleared(now);
                }
            }
            EnvEvent::LintingChanged(linting) => {
                let reaction = self.reactions.on_linting(linting);
                if self.enabled && reaction == Some(Reaction::LintStarted) {
                    self.submit(AnimationId::Thinking, AnimationTier::Events, now);
                }
            }
            EnvEvent::RepeatMistakes(count) => self.repeat_mistakes = count,
            EnvEvent::KeyDown {
                key,
                mods,
                editable,
            } if self.enabled => self.on_key_down(&key, mods, editable, now),
            EnvEvent::PointerMoved(position) if self.enabled => {
                self.last_interaction = Some(now);
                if self.speech.is_active(now) {
                    return;
                }
                let deadline = self.mouse.pointer_moved(position, now);
                self.timers.schedule(deadline, TimerKind::MouseDebounce);
            }
            EnvEvent::Speak(text) if self.enabled => {
                self.begin_speech(AnimationId::Speak, &text, now);
            }
            EnvEvent::CloseRequested if self.enabled => self.on_close_attempt(now),
            _ => {}
        }
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        for kind in self.timers.pop_due(now) {
            self.on_timer(kind, now);
        }
    }

    fn on_timer(&mut self, kind: TimerKind, now: Instant) {
        match kind {
            TimerKind::LockExpiry { seq } => self.arbiter.release(seq),
            TimerKind::StareRelease { seq } => self.arbiter.release(seq),
            TimerKind::SpeechEnd { seq } => {
                self.arbiter.release(seq);
                self.speech.end();
                self.bus.publish(SchedulerEvent::SpeechEnded);
            }
            TimerKind::StareFollowUp => {
                // Second phase of the anger reaction: look at the user and
                // hold the stare, then unlock manually instead of re-arming
                // the default expiry.
                if self
                    .submit(AnimationId::LookFront, AnimationTier::Active, now)
                    .is_some()
                {
                    let until = now + self.config.stare_hold();
                    if let Some(seq) = self.arbiter.extend(until) {
                        self.timers.cancel(TimerSlot::LockExpiry);
                        self.timers.schedule(until, TimerKind::StareRelease { seq });
                    }
                }
            }
            TimerKind::IdleTick => {
                let interval = self.idle.next_interval(&mut self.rng, self.anger);
                self.timers.schedule(now + interval, TimerKind::IdleTick);
                if self.idle.suppressed_by_interaction(self.last_interaction, now)
                    || self.speech.is_active(now)
                {
                    return;
                }
                let animation = self.idle.pick_animation(&mut self.rng, self.anger);
                self.submit(animation, AnimationTier::Idle, now);
            }
            TimerKind::AmbientDrift => {
                let interval = self.idle.next_ambient_interval(&mut self.rng);
                self.timers.schedule(now + interval, TimerKind::AmbientDrift);
                let alone = self.arbiter.current(now).is_none()
                    && !self.idle.suppressed_by_interaction(self.last_interaction, now)
                    && !self.speech.is_active(now);
                if alone {
                    self.submit(AnimationId::Drift, AnimationTier::Idle, now);
                }
            }
            TimerKind::MouseDebounce => {
                if self.speech.is_active(now) {
                    return;
                }
                if let Some(animation) = self.mouse.debounce_elapsed(self.agent_center) {
                    self.submit(animation, AnimationTier::Passive, now);
                }
            }
            TimerKind::TypingIdle => {
                if self.errors == 0 {
                    return;
                }
                let animation = if self.repeat_mistakes >= self.config.typing.repeat_mistake_threshold
                {
                    AnimationId::Scold
                } else {
                    AnimationId::Pester
                };
                self.submit(animation, AnimationTier::Active, now);
            }
            TimerKind::SequenceReset => self.konami.reset_buffer(),
            TimerKind::SequenceCooldown => self.konami.end_cooldown(),
            TimerKind::KonamiFollowUp => {
                self.submit(AnimationId::KonamiDance, AnimationTier::Events, now);
            }
        }
    }

    fn on_key_down(&mut self, key: &str, mods: Modifiers, editable: bool, now: Instant) {
        self.last_interaction = Some(now);

        if self.close.matches_chord(key, mods) {
            self.on_close_attempt(now);
            return;
        }

        if self.konami.key_pressed(key) {
            if self.submit(AnimationId::KonamiIntro, AnimationTier::Events, now).is_some() {
                self.timers.schedule(
                    now + self.config.sequence_step_delay(),
                    TimerKind::KonamiFollowUp,
                );
            }
            self.timers.schedule(
                now + self.config.sequence_cooldown(),
                TimerKind::SequenceCooldown,
            );
            self.timers.cancel(TimerSlot::SequenceReset);
        } else {
            self.timers
                .schedule(now + self.config.sequence_reset(), TimerKind::SequenceReset);
        }

        if !editable {
            return;
        }
        let signal = self.typing.key_pressed(key, now);
        if !signal.counted {
            return;
        }
        self.timers
            .schedule(now + self.config.typing_inactivity(), TimerKind::TypingIdle);
        if signal.fast {
            self.submit(AnimationId::Writing, AnimationTier::Active, now);
        }
    }

    fn on_anger_rose(&mut self, now: Instant) {
        self.submit(AnimationId::Alert, AnimationTier::Active, now);
        self.timers
            .schedule(now + self.config.stare_delay(), TimerKind::StareFollowUp);
    }

    fn on_errors_cleared(&mut self, now: Instant) {
        if self
            .submit(AnimationId::Celebrate, AnimationTier::Events, now)
            .is_some()
        {
            if let Some(sink) = self.sink.as_mut() {
                sink.play_sound(SoundEffect::Chime);
            }
            self.bus.publish(SchedulerEvent::SoundPlayed(SoundEffect::Chime));
        }
    }

    fn on_close_attempt(&mut self, now: Instant) {
        // Ask the host to swallow the close first; the mock fires either way.
        self.bus.publish(SchedulerEvent::SuppressClose);
        let message = self.close.pick_message(&mut self.rng);
        self.begin_speech(AnimationId::Mock, message, now);
    }

    /// Speech bubble with an accompanying animation: takes the Events
    /// lock, extends it to the reading time, and gates the idle driver
    /// and mouse tracker until it ends.
    fn begin_speech(&mut self, animation: AnimationId, text: &str, now: Instant) {
        let duration =
            speech_duration(text, self.config.speech_min(), self.config.speech_per_char());
        if self.submit(animation, AnimationTier::Events, now).is_none() {
            return;
        }
        let until = now + duration;
        if let Some(seq) = self.arbiter.extend(until) {
            self.timers.cancel(TimerSlot::LockExpiry);
            self.timers.schedule(until, TimerKind::SpeechEnd { seq });
        }
        self.speech.begin(now, duration);
        if let Some(sink) = self.sink.as_mut() {
            sink.speak(text, duration);
        }
        self.bus.publish(SchedulerEvent::SpeechStarted {
            text: text.to_string(),
            duration_ms: duration.as_millis() as u64,
        });
    }

    /// Route one request through the arbiter and arm the default lock
    /// expiry. A missing sink no-ops.
    fn submit(
        &mut self,
        animation: AnimationId,
        tier: AnimationTier,
        now: Instant,
    ) -> Option<LockTicket> {
        let sink = match self.sink.as_mut() {
            Some(sink) => sink,
            None => {
                tracing::trace!(%animation, "no sink attached, dropping request");
                return None;
            }
        };
        let ticket = self.arbiter.request(sink.as_mut(), animation, tier, now)?;
        self.timers.schedule(
            ticket.expires_at,
            TimerKind::LockExpiry { seq: ticket.seq },
        );
        self.bus
            .publish(SchedulerEvent::AnimationPlayed { animation, tier });
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::KONAMI_SEQUENCE;
    use crate::sink::RecordingSink;
    use mascot_common::PlaybackError;
    use std::sync::{Arc, Mutex};

    /// Cloneable view into a [`RecordingSink`] owned by the scheduler.
    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<RecordingSink>>);

    impl SharedSink {
        fn played(&self) -> Vec<AnimationId> {
            self.0.lock().unwrap().played.clone()
        }

        fn sounds(&self) -> Vec<SoundEffect> {
            self.0.lock().unwrap().sounds.clone()
        }

        fn spoken(&self) -> Vec<(String, Duration)> {
            self.0.lock().unwrap().spoken.clone()
        }
    }

    impl AnimationSink for SharedSink {
        fn play(&mut self, animation: AnimationId) -> Result<(), PlaybackError> {
            self.0.lock().unwrap().play(animation)
        }

        fn play_sound(&mut self, effect: SoundEffect) {
            self.0.lock().unwrap().play_sound(effect);
        }

        fn speak(&mut self, text: &str, duration: Duration) {
            self.0.lock().unwrap().speak(text, duration);
        }
    }

    fn enabled_scheduler() -> (Scheduler, SharedSink, Instant) {
        let mut scheduler = Scheduler::with_seed(SchedulerConfig::default(), 1234);
        let sink = SharedSink::default();
        scheduler.set_sink(Box::new(sink.clone()));
        let t0 = Instant::now();
        scheduler.set_enabled(true, t0);
        (scheduler, sink, t0)
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn key(key: &str) -> EnvEvent {
        EnvEvent::KeyDown {
            key: key.to_string(),
            mods: Modifiers::default(),
            editable: true,
        }
    }

    #[test]
    fn anger_spike_runs_alert_stare_unlock_timeline() {
        let (mut s, sink, t0) = enabled_scheduler();
        // Baseline anger 1 set while the reaction path is quiet
        s.handle_event(EnvEvent::AngerChanged(1), t0);
        sink.0.lock().unwrap().played.clear();

        // 1 -> 2: Alert immediately
        s.handle_event(EnvEvent::AngerChanged(2), t0);
        assert_eq!(sink.played(), vec![AnimationId::Alert]);

        // ~2 s later: LookFront
        s.tick(t0 + ms(2_000));
        assert_eq!(sink.played(), vec![AnimationId::Alert, AnimationId::LookFront]);

        // Stare holds the lock: an idle request 2.5 s into the hold loses
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(4_500))
            .is_none());

        // 3 s after LookFront the manual unlock runs and idle wins again
        s.tick(t0 + ms(5_000));
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(5_100))
            .is_some());
    }

    #[test]
    fn errors_cleared_plays_one_celebrate_and_one_chime() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::ErrorCountChanged(3), t0);
        s.handle_event(EnvEvent::ErrorCountChanged(0), t0 + ms(100));

        // An idle timer firing in the same tick must lose to the Events lock
        s.timers.schedule(t0 + ms(100), TimerKind::IdleTick);
        s.tick(t0 + ms(100));

        let celebrates = sink
            .played()
            .iter()
            .filter(|&&a| a == AnimationId::Celebrate)
            .count();
        assert_eq!(celebrates, 1);
        assert_eq!(sink.sounds(), vec![SoundEffect::Chime]);
        assert_eq!(sink.played(), vec![AnimationId::Celebrate]);
    }

    #[test]
    fn lint_start_plays_thinking_at_events() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::LintingChanged(true), t0);
        s.handle_event(EnvEvent::LintingChanged(true), t0 + ms(50));
        assert_eq!(sink.played(), vec![AnimationId::Thinking]);

        // Thinking holds Events; a lower-tier request is rejected
        assert!(s
            .submit(AnimationId::Alert, AnimationTier::Active, t0 + ms(100))
            .is_none());
    }

    #[test]
    fn disable_mid_flight_stops_pending_stare() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::AngerChanged(1), t0);
        assert_eq!(sink.played(), vec![AnimationId::Alert]);

        // Disable while the stare follow-up is pending
        s.handle_event(EnvEvent::SetEnabled(false), t0 + ms(1_000));
        assert_eq!(s.next_deadline(), None);

        s.tick(t0 + ms(2_000));
        s.tick(t0 + ms(60_000));
        assert_eq!(sink.played(), vec![AnimationId::Alert]);
    }

    #[test]
    fn disable_is_idempotent() {
        let (mut s, _sink, t0) = enabled_scheduler();
        s.set_enabled(false, t0 + ms(10));
        s.set_enabled(false, t0 + ms(20));
        assert!(!s.is_enabled());

        s.set_enabled(true, t0 + ms(30));
        assert!(s.is_enabled());
        assert!(s.next_deadline().is_some());
    }

    #[test]
    fn fast_typing_emits_writing() {
        let (mut s, sink, t0) = enabled_scheduler();
        for i in 0..12 {
            s.handle_event(key("a"), t0 + ms(i * 92));
        }
        assert!(sink.played().contains(&AnimationId::Writing));
    }

    #[test]
    fn slow_typing_stays_quiet() {
        let (mut s, sink, t0) = enabled_scheduler();
        for i in 0..12 {
            s.handle_event(key("a"), t0 + ms(i * 300));
        }
        assert!(!sink.played().contains(&AnimationId::Writing));
    }

    #[test]
    fn typing_inactivity_with_errors_pesters() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::ErrorCountChanged(2), t0);
        s.handle_event(key("a"), t0 + ms(100));

        s.tick(t0 + ms(3_100));
        assert_eq!(sink.played(), vec![AnimationId::Pester]);
    }

    #[test]
    fn typing_inactivity_escalates_on_repeat_mistakes() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::RepeatMistakes(5), t0);
        s.handle_event(EnvEvent::ErrorCountChanged(2), t0);
        s.handle_event(key("a"), t0 + ms(100));

        s.tick(t0 + ms(3_100));
        assert_eq!(sink.played(), vec![AnimationId::Scold]);
    }

    #[test]
    fn typing_inactivity_without_errors_is_silent() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(key("a"), t0 + ms(100));
        s.tick(t0 + ms(3_100));
        assert!(sink.played().is_empty());
    }

    #[test]
    fn konami_fires_two_step_sequence_with_cooldown() {
        let (mut s, sink, t0) = enabled_scheduler();
        let mut t = t0;
        for k in KONAMI_SEQUENCE {
            t += ms(100);
            s.handle_event(
                EnvEvent::KeyDown {
                    key: k.to_string(),
                    mods: Modifiers::default(),
                    editable: false,
                },
                t,
            );
        }
        assert_eq!(sink.played(), vec![AnimationId::KonamiIntro]);

        s.tick(t + ms(1_500));
        assert_eq!(
            sink.played(),
            vec![AnimationId::KonamiIntro, AnimationId::KonamiDance]
        );

        // Retyping during the cooldown does nothing
        for k in KONAMI_SEQUENCE {
            t += ms(100);
            s.handle_event(
                EnvEvent::KeyDown {
                    key: k.to_string(),
                    mods: Modifiers::default(),
                    editable: false,
                },
                t,
            );
        }
        let konami_count = |plays: &[AnimationId]| {
            plays
                .iter()
                .filter(|&&a| a == AnimationId::KonamiIntro)
                .count()
        };
        assert_eq!(konami_count(&sink.played()), 1);
    }

    #[test]
    fn pointer_glance_is_passive_and_debounced() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::AgentMoved(Point::new(400.0, 300.0)), t0);

        s.handle_event(EnvEvent::PointerMoved(Point::new(100.0, 300.0)), t0);
        // Nothing before the debounce elapses
        assert!(sink.played().is_empty());

        s.tick(t0 + ms(300));
        assert_eq!(sink.played(), vec![AnimationId::GlanceLeft]);

        // Same quadrant again: hysteresis holds
        s.handle_event(EnvEvent::PointerMoved(Point::new(120.0, 280.0)), t0 + ms(400));
        s.tick(t0 + ms(700));
        assert_eq!(sink.played(), vec![AnimationId::GlanceLeft]);
    }

    #[test]
    fn speech_gates_mouse_and_idle_until_it_ends() {
        let (mut s, sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::AgentMoved(Point::new(400.0, 300.0)), t0);

        s.handle_event(EnvEvent::Speak("hello".into()), t0);
        assert_eq!(sink.played(), vec![AnimationId::Speak]);
        assert_eq!(sink.spoken(), vec![("hello".to_string(), ms(2_000))]);

        // Pointer moves while speaking are ignored outright
        s.handle_event(EnvEvent::PointerMoved(Point::new(100.0, 300.0)), t0 + ms(500));
        assert!(!s.timers.is_armed(TimerSlot::MouseDebounce));

        // A forced idle firing during speech stays quiet
        s.timers.schedule(t0 + ms(1_000), TimerKind::IdleTick);
        s.tick(t0 + ms(1_000));
        assert_eq!(sink.played(), vec![AnimationId::Speak]);

        // Speech ends at the 2 s floor; the lock drops with it
        s.tick(t0 + ms(2_000));
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(2_100))
            .is_some());
    }

    #[test]
    fn speech_holds_events_lock_past_default_expiry() {
        let (mut s, _sink, t0) = enabled_scheduler();
        // 100 chars * 70 ms = 7 s, well past the 4 s default hold
        let text = "x".repeat(100);
        s.handle_event(EnvEvent::Speak(text), t0);

        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(6_500))
            .is_none());

        s.tick(t0 + ms(7_000));
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(7_100))
            .is_some());
    }

    #[test]
    fn close_attempt_mocks_and_asks_host_to_suppress() {
        let (mut s, sink, t0) = enabled_scheduler();
        let mut rx = s.bus().subscribe();

        s.handle_event(EnvEvent::CloseRequested, t0);
        assert_eq!(sink.played(), vec![AnimationId::Mock]);
        assert_eq!(sink.spoken().len(), 1);

        let first = rx.try_recv().unwrap();
        assert!(matches!(first, SchedulerEvent::SuppressClose));
    }

    #[test]
    fn close_chord_is_not_fed_to_typing() {
        let (mut s, sink, t0) = enabled_scheduler();
        let chord = if cfg!(target_os = "macos") {
            EnvEvent::KeyDown {
                key: "Q".into(),
                mods: Modifiers {
                    super_key: true,
                    ..Modifiers::default()
                },
                editable: true,
            }
        } else {
            EnvEvent::KeyDown {
                key: "F4".into(),
                mods: Modifiers {
                    alt: true,
                    ..Modifiers::default()
                },
                editable: true,
            }
        };
        s.handle_event(chord, t0);
        assert_eq!(sink.played(), vec![AnimationId::Mock]);
        assert!(!s.timers.is_armed(TimerSlot::TypingIdle));
    }

    #[test]
    fn missing_sink_never_panics() {
        let mut s = Scheduler::with_seed(SchedulerConfig::default(), 9);
        let t0 = Instant::now();
        s.set_enabled(true, t0);
        s.handle_event(EnvEvent::AngerChanged(3), t0);
        s.handle_event(key("a"), t0 + ms(10));
        s.tick(t0 + ms(10_000));
    }

    #[test]
    fn lock_expires_after_default_hold() {
        let (mut s, _sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::LintingChanged(true), t0);

        // Still held just before expiry
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(3_900))
            .is_none());

        s.tick(t0 + ms(4_000));
        assert!(s
            .submit(AnimationId::Drift, AnimationTier::Idle, t0 + ms(4_100))
            .is_some());
    }

    #[test]
    fn idle_rescheduling_respects_anger_band() {
        let (mut s, _sink, t0) = enabled_scheduler();
        s.handle_event(EnvEvent::AngerChanged(5), t0);

        // Drain the pending idle deadline and force a firing now
        s.timers.schedule(t0 + ms(1), TimerKind::IdleTick);
        s.tick(t0 + ms(1));

        let next = s.timers.deadline_for(TimerSlot::IdleTick).unwrap();
        let gap = next.duration_since(t0 + ms(1));
        assert!(
            gap >= ms(1_000) && gap < ms(2_000),
            "gap {gap:?} outside the anger-5 band"
        );
    }
}
