pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, MascotError, PlaybackError};
pub use events::{EventBus, SchedulerEvent};
pub use types::{AnimationId, AnimationTier, Modifiers, MouseQuadrant, Point, SoundEffect};

pub type Result<T> = std::result::Result<T, MascotError>;
