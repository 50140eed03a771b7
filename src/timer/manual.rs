use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::{ScheduledTask, Scheduler, TimerHandle};

/// Virtual-clock scheduler. Nothing fires until [`ManualScheduler::advance`]
/// moves the clock forward.
///
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Rc<Task>>,
}

struct Task {
    id: u64,
    due_ms: Cell<u64>,
    period_ms: Option<u64>,
    cancelled: Cell<bool>,
    callback: RefCell<TaskFn>,
}

enum TaskFn {
    Repeat(Box<dyn FnMut()>),
    Once(Option<Box<dyn FnOnce()>>),
}

struct ManualTask {
    clock: Weak<RefCell<Clock>>,
    task: Rc<Task>,
}

impl ScheduledTask for ManualTask {
    fn cancel(self: Box<Self>) {
        self.task.cancelled.set(true);
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().tasks.retain(|t| t.id != self.task.id);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of scheduled callbacks that have not been cancelled or spent.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.clock
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.cancelled.get())
            .map(|t| t.due_ms.get())
            .min()
    }

    /// Moves the clock forward, firing every callback that falls due in
    /// order. Callbacks may schedule or cancel timers while they run.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        while let Some(task) = self.next_task(target) {
            self.clock.borrow_mut().now_ms = task.due_ms.get();
            match task.period_ms {
                Some(period) => {
                    task.due_ms.set(task.due_ms.get() + period);
                    if let TaskFn::Repeat(callback) = &mut *task.callback.borrow_mut() {
                        callback();
                    }
                }
                None => {
                    task.cancelled.set(true);
                    self.clock.borrow_mut().tasks.retain(|t| t.id != task.id);
                    let callback = match &mut *task.callback.borrow_mut() {
                        TaskFn::Once(callback) => callback.take(),
                        TaskFn::Repeat(_) => None,
                    };
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }

    fn next_task(&self, target: u64) -> Option<Rc<Task>> {
        self.clock
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.cancelled.get() && t.due_ms.get() <= target)
            .min_by_key(|t| (t.due_ms.get(), t.id))
            .cloned()
    }

    fn schedule(&self, delay_ms: u32, period_ms: Option<u64>, callback: TaskFn) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let task = Rc::new(Task {
            id,
            due_ms: Cell::new(clock.now_ms + u64::from(delay_ms.max(1))),
            period_ms,
            cancelled: Cell::new(false),
            callback: RefCell::new(callback),
        });
        clock.tasks.push(task.clone());
        TimerHandle::new(ManualTask {
            clock: Rc::downgrade(&self.clock),
            task,
        })
    }
}

impl Scheduler for ManualScheduler {
    fn repeat(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle {
        let period = u64::from(period_ms.max(1));
        self.schedule(period_ms, Some(period), TaskFn::Repeat(callback))
    }

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        self.schedule(delay_ms, None, TaskFn::Once(Some(callback)))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now_ms", &self.now_ms())
            .field("pending", &self.pending())
            .finish()
    }
}
