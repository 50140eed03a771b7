//! Repeating and one-shot callbacks with explicit cancellation.
//!
//! Controllers never talk to `setInterval` directly. They hold a [`Timer`]
//! (or a bare [`TimerHandle`]) created from a [`Scheduler`], so the same
//! controller runs against the browser event loop or against a virtual
//! clock.

use std::fmt;
use std::rc::Rc;

mod browser;
mod manual;

pub use browser::BrowserScheduler;
pub use manual::ManualScheduler;

/// Source of timer callbacks.
///
/// Callbacks are delivered on the single-threaded event loop, one at a time,
/// and never overlap. A repeating callback runs once per elapsed period until
/// its handle is cancelled or dropped.
pub trait Scheduler {
    fn repeat(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle;

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// A live scheduled callback owned by a [`TimerHandle`].
pub trait ScheduledTask {
    fn cancel(self: Box<Self>);
}

/// Exclusive owner of one scheduled callback. Cancelled on drop.
#[derive(Default)]
pub struct TimerHandle {
    task: Option<Box<dyn ScheduledTask>>,
}

impl TimerHandle {
    pub fn new(task: impl ScheduledTask + 'static) -> Self {
        Self {
            task: Some(Box::new(task)),
        }
    }

    /// A handle that never referred to anything.
    pub fn inert() -> Self {
        Self { task: None }
    }

    pub fn is_set(&self) -> bool {
        self.task.is_some()
    }

    /// Idempotent: cancelling twice, or cancelling an inert handle, does nothing.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("set", &self.is_set())
            .finish()
    }
}

/// A repeating timer slot with a fixed period.
///
/// `restart` cancels the running callback before the replacement is
/// scheduled, so two callbacks from the same slot never coexist.
pub struct Timer {
    scheduler: Rc<dyn Scheduler>,
    period_ms: u32,
    handle: TimerHandle,
}

impl Timer {
    pub fn new(scheduler: Rc<dyn Scheduler>, period_ms: u32) -> Self {
        Self {
            scheduler,
            period_ms,
            handle: TimerHandle::inert(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_set()
    }

    pub fn restart(&mut self, callback: Box<dyn FnMut()>) {
        self.handle.cancel();
        self.handle = self.scheduler.repeat(self.period_ms, callback);
    }

    pub fn cancel(&mut self) {
        self.handle.cancel();
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("period_ms", &self.period_ms)
            .field("running", &self.is_running())
            .finish()
    }
}
