use std::fmt;

use sequence::{LinkedSequence, Sequence};

use crate::error::TaskError;
use crate::registry::Registry;

/// Narrow capability interface shared by every task kind.
pub trait Task: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Whether `describe` reports a computed value.
    fn has_result(&self) -> bool;

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError>;

    /// Report line. `None` while a result-bearing task has not run yet.
    fn describe(&self) -> Option<String>;
}

pub type BoxedTask = Box<dyn Task>;

/// Every task of a run: the ones already executed, the one executing now,
/// and the ones still pending, plus the registry they count in.
///
/// The running task is owned by the runner while it executes, so the board
/// only remembers whether it carries a result.
#[derive(Debug)]
pub struct Board {
    done: LinkedSequence<BoxedTask>,
    running: Option<bool>,
    pending: LinkedSequence<BoxedTask>,
    registry: Registry,
}

impl Board {
    pub fn new(registry: Registry) -> Self {
        Self {
            done: LinkedSequence::new(),
            running: None,
            pending: LinkedSequence::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Executed, running and pending tasks together.
    pub fn len(&self) -> usize {
        self.done.len() + usize::from(self.running.is_some()) + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn count_with_result(&self) -> usize {
        let done = self.done.iter().filter(|task| task.has_result()).count();
        let pending = self.pending.iter().filter(|task| task.has_result()).count();
        done + usize::from(self.running == Some(true)) + pending
    }

    pub fn push(&mut self, task: BoxedTask) {
        self.pending.push_back(task);
    }

    /// Drop every executed and pending task. A task running at the time is
    /// dropped by the runner once it returns.
    pub fn clear(&mut self) {
        self.done.clear();
        self.running = None;
        self.pending.clear();
    }

    pub(crate) fn next_task(&mut self) -> Option<BoxedTask> {
        let task = self.pending.pop_front()?;
        self.running = Some(task.has_result());
        Some(task)
    }

    /// Keep `task` as executed unless the board was cleared while it ran.
    pub(crate) fn finish(&mut self, task: BoxedTask) {
        if self.running.take().is_some() {
            self.done.push_back(task);
        }
    }
}
