//! One-shot timers on a virtual clock
//!
//! The host advances the clock; tasks that come due are handed back in due
//! order (ties broken by scheduling order).

use lm_dom::NodeId;
use std::time::Duration;

/// Work to run when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Remove the `show` class from a toast element
    HideToast(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// `setTimeout(task, delay)`
    pub fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Move the clock forward and return the tasks that came due
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTask> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = pending;

        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.task).collect()
    }
}
