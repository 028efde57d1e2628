#![forbid(unsafe_code)]

//! One-tick task queue.
//!
//! Stands in for `setTimeout(.., 0)`: work that must wait until freshly
//! inserted nodes exist is queued here and runs on the next
//! [`Document::run_pending`] call.
//!
//! # Invariants
//!
//! 1. Tasks run in scheduling order.
//! 2. A tick runs only tasks queued before it started; tasks scheduled by a
//!    running task wait for the next tick.
//! 3. A cleared task never runs, even when cleared by an earlier task of the
//!    same tick.

use std::collections::VecDeque;

use crate::document::Document;

type Task = Box<dyn FnOnce(&Document)>;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Default)]
pub(crate) struct TimerQueue {
    next: u64,
    tasks: VecDeque<(TimerId, Task)>,
}

impl TimerQueue {
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl Document {
    /// Queue `task` for the next tick.
    pub fn set_timeout(&self, task: impl FnOnce(&Document) + 'static) -> TimerId {
        self.write(|tree| {
            tree.timers.next += 1;
            let id = TimerId(tree.timers.next);
            tree.timers.tasks.push_back((id, Box::new(task)));
            id
        })
    }

    /// Cancel a queued task. Returns `false` if it already ran or was cleared.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.write(|tree| {
            let before = tree.timers.tasks.len();
            tree.timers.tasks.retain(|(queued, _)| *queued != id);
            tree.timers.tasks.len() != before
        })
    }

    /// Number of queued tasks.
    pub fn pending_tasks(&self) -> usize {
        self.read(|tree| tree.timers.len())
    }

    /// Run one tick. Returns the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let cutoff = self.read(|tree| TimerId(tree.timers.next));
        let mut ran = 0;
        loop {
            let task = self.write(|tree| match tree.timers.tasks.front() {
                Some((id, _)) if *id <= cutoff => tree.timers.tasks.pop_front(),
                _ => None,
            });
            let Some((_, task)) = task else {
                break;
            };
            task(self);
            ran += 1;
        }
        ran
    }
}
