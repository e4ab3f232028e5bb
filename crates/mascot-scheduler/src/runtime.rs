//! Tokio driver for the scheduler.
//!
//! The core stays a plain struct; this wraps it in a task that sleeps
//! until the next timer deadline and wakes for incoming events, keeping
//! the cooperative single-writer model: only the task ever touches the
//! scheduler.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::scheduler::{EnvEvent, Scheduler};

/// Handle to a spawned scheduler task.
pub struct SchedulerHandle {
    tx: mpsc::UnboundedSender<EnvEvent>,
    task: JoinHandle<Scheduler>,
}

impl SchedulerHandle {
    /// Queue an environment event. Returns `false` once the task is gone.
    pub fn send(&self, event: EnvEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Stop the task and recover the scheduler. The scheduler is disabled
    /// on the way out, so no timer survives the teardown. Safe to call
    /// after the task has already exited.
    pub async fn shutdown(self) -> Option<Scheduler> {
        drop(self.tx);
        self.task.await.ok()
    }
}

/// Spawn the scheduler onto the current tokio runtime.
pub fn spawn(mut scheduler: Scheduler) -> SchedulerHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<EnvEvent>();
    let task = tokio::spawn(async move {
        loop {
            let deadline = scheduler.next_deadline();
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => scheduler.handle_event(event, Instant::now()),
                    None => break,
                },
                () = sleep_until_deadline(deadline) => {
                    scheduler.tick(Instant::now());
                }
            }
        }
        scheduler.set_enabled(false, Instant::now());
        tracing::debug!("scheduler task stopped");
        scheduler
    });
    SchedulerHandle { tx, task }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
