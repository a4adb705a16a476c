use std::cell::Cell;
use std::rc::Rc;

/// Counts live task objects.
///
/// Cloning shares the same count. Every task holds a `Tracker` taken from
/// the registry it was created with, so the count drops back as tasks are
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    live: Rc<Cell<usize>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.get()
    }

    pub fn track(&self) -> Tracker {
        self.live.set(self.live.get() + 1);
        Tracker {
            live: Rc::clone(&self.live),
        }
    }
}

#[derive(Debug)]
pub struct Tracker {
    live: Rc<Cell<usize>>,
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
