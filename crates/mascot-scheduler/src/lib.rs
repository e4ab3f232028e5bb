//! Animation priority scheduler for the on-screen mascot.
//!
//! Turns a stream of environment events (typing, pointer movement, anger and
//! error state changes, hidden key sequences) into at most one animation at a
//! time on the agent sink, arbitrated by a tier-based priority lock.
//!
//! The core [`Scheduler`] is a plain single-writer struct driven through
//! [`Scheduler::handle_event`] and [`Scheduler::tick`]; [`runtime::spawn`]
//! wraps it in a tokio task for hosts that want an event-loop handle.

pub mod arbiter;
pub mod config;
pub mod idle;
pub mod mouse;
pub mod reactions;
pub mod runtime;
pub mod scheduler;
pub mod sequence;
pub mod sink;
pub mod speech;
pub mod timer;
pub mod typing;

pub use config::SchedulerConfig;
pub use runtime::{spawn, SchedulerHandle};
pub use scheduler::{EnvEvent, Scheduler};
pub use sink::{AnimationSink, RecordingSink};
