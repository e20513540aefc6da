//! Cancelable one-shot timers on a virtual clock
//!
//! Every delayed effect in the synchronizer (scroll-lock release, toast
//! activation, toast removal, toast auto-dismiss) is a [`TimerId`] in a
//! [`Timers`] queue. Time is expressed in [`Millis`] supplied by the caller,
//! so tests advance the clock explicitly and the async driver maps wall
//! time onto the same scale.

use std::collections::{BTreeMap, HashMap};

/// Virtual time in milliseconds
pub type Millis = u64;

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Queue of fire-once tasks ordered by deadline, then by scheduling order
#[derive(Debug)]
pub struct Timers<T> {
    next_id: u64,
    pending: BTreeMap<(Millis, TimerId), T>,
    deadlines: HashMap<TimerId, Millis>,
}

impl<T> Timers<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Schedule `task` to fire `delay` milliseconds after `now`
    pub fn schedule(&mut self, now: Millis, delay: Millis, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now.saturating_add(delay);
        self.pending.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        trace!("Scheduled timer {:?} for t={}", id, deadline);
        id
    }

    /// Cancel a pending task, returning it if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        trace!("Cancelled timer {:?}", id);
        self.pending.remove(&(deadline, id))
    }

    /// Whether `id` is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Remove and return every task whose deadline is at or before `now`
    pub fn fire_due(&mut self, now: Millis) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (deadline, id) = *entry.key();
            if deadline > now {
                break;
            }
            let task = entry.remove();
            self.deadlines.remove(&id);
            fired.push(task);
        }
        fired
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
