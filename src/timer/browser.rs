use gloo_timers::callback::{Interval, Timeout};

use super::{ScheduledTask, Scheduler, TimerHandle};

/// Schedules callbacks on the browser event loop through gloo-timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn repeat(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::new(Interval::new(period_ms, callback))
    }

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(Timeout::new(delay_ms, callback))
    }
}

// Dropping a gloo timer clears it on the JS side.
impl ScheduledTask for Interval {
    fn cancel(self: Box<Self>) {
        drop(self);
    }
}

impl ScheduledTask for Timeout {
    fn cancel(self: Box<Self>) {
        drop(self);
    }
}
