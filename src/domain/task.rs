use super::enums::TimerState;
use super::timer::{progress, CountdownTimer};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Unique ID of a task, ordered by creation time
pub type TaskId = Uuid;

/// A unit of work with an attached countdown
#[derive(Debug, Clone)]
pub struct Task {
    /// Unique ID for internal references
    pub id: TaskId,
    /// Task name (trimmed, never empty)
    pub name: String,
    /// Countdown attached to this task
    pub timer: CountdownTimer,
    /// Remaining time snapshotted when the timer last started running
    pub total_time: Option<u64>,
    /// When the task was added
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            timer: CountdownTimer::new(),
            total_time: None,
            created_at: Local::now(),
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.timer.remaining_ms()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    /// Baseline used for the progress bar: the snapshot if any, else the remaining time
    pub fn initial_time(&self) -> u64 {
        self.total_time.unwrap_or_else(|| self.remaining_ms())
    }

    /// Time actually counted down since the last start (never negative)
    pub fn elapsed_ms(&self) -> u64 {
        self.initial_time().saturating_sub(self.remaining_ms())
    }

    /// Fraction of the countdown left, for the progress gauge
    pub fn progress(&self) -> Option<f64> {
        progress(self.remaining_ms(), self.initial_time())
    }
}
