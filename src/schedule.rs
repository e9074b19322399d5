//! Frame and timer scheduling
//!
//! Self-rescheduling loops are modeled as [`Task`]s: each step mutates the
//! page and returns a [`Wake`] saying when it wants to run again. The browser
//! driver maps `Frame` to `requestAnimationFrame` and `After` to
//! `setTimeout`; [`Timeline`] runs the same tasks on a virtual clock.

use std::collections::BTreeMap;

use crate::consts::FRAME_MS;
use crate::dom::Dom;

/// When a task wants its next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Next display refresh
    Frame,
    /// After a delay in milliseconds
    After(u32),
    /// Never again
    Done,
}

/// One step of a self-rescheduling loop
pub trait Task {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake;
}

/// Something that can schedule tasks
pub trait Spawn {
    fn spawn(&mut self, task: Box<dyn Task>, wake: Wake);
}

/// Deterministic virtual clock
///
/// Frames fire every [`FRAME_MS`]. Tasks due at the same instant run in the
/// order they were scheduled.
#[derive(Default)]
pub struct Timeline {
    now: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Box<dyn Task>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of scheduled steps
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run every step due at or before `until`, then move the clock there
    pub fn run_until(&mut self, dom: &mut dyn Dom, until: u64) {
        while let Some(entry) = self.queue.first_entry() {
            let (due, _) = *entry.key();
            if due > until {
                break;
            }
            let mut task = entry.remove();
            self.now = due;
            let wake = task.run(dom);
            self.spawn(task, wake);
        }
        self.now = self.now.max(until);
    }

    /// Advance the clock by `ms`
    pub fn advance(&mut self, dom: &mut dyn Dom, ms: u64) {
        let until = self.now + ms;
        self.run_until(dom, until);
    }
}

impl Spawn for Timeline {
    fn spawn(&mut self, task: Box<dyn Task>, wake: Wake) {
        let due = match wake {
            Wake::Frame => self.now + FRAME_MS,
            Wake::After(ms) => self.now + u64::from(ms),
            Wake::Done => return,
        };
        self.queue.insert((due, self.seq), task);
        self.seq += 1;
    }
}
