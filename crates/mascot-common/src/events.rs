use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{AnimationId, AnimationTier, SoundEffect};

/// Observable output of the scheduler.
///
/// Subscribers (speech bubble, debug overlay, host window) react to these
/// without ever touching the arbiter's lock state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SchedulerEvent {
    AnimationPlayed {
        animation: AnimationId,
        tier: AnimationTier,
    },
    SoundPlayed(SoundEffect),
    SpeechStarted {
        text: String,
        duration_ms: u64,
    },
    SpeechEnded,
    /// The host should swallow the pending close-window request.
    SuppressClose,
    Disabled,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<SchedulerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: SchedulerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
