use crate::domain::{TaskId, TICK_MS};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default UI poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get the UI poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Repeating tick sources, one per running task
///
/// Each handle remembers when its next tick is due. Cancelling removes the
/// handle, so no tick can fire for that task afterwards.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    next_due: HashMap<TaskId, Instant>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS))
    }
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: HashMap::new(),
        }
    }

    /// Start (or restart) the tick source for `id`; first tick is one period after `now`
    pub fn schedule(&mut self, id: TaskId, now: Instant) {
        self.next_due.insert(id, now + self.period);
    }

    /// Drop the tick source for `id`. Returns whether one was registered.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.next_due.remove(&id).is_some()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.next_due.contains_key(&id)
    }

    /// Collect every tick due at `now`, oldest first
    ///
    /// A source that fell several periods behind (e.g. the loop stalled)
    /// yields one entry per missed period.
    pub fn poll(&mut self, now: Instant) -> Vec<TaskId> {
        let mut fired: Vec<(Instant, TaskId)> = Vec::new();
        for (id, due) in self.next_due.iter_mut() {
            while *due <= now {
                fired.push((*due, *id));
                *due += self.period;
            }
        }
        fired.sort();
        fired.into_iter().map(|(_, id)| id).collect()
    }
}
