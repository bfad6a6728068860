use super::enums::{TimerState, Urgency};

/// Wall-clock period between two ticks of a running countdown
pub const TICK_MS: u64 = 1_000;

pub const MS_PER_MINUTE: u64 = 60 * 1_000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Result of applying one tick to a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running, with the new remaining time
    TimeChanged(u64),
    /// Reached zero; the timer has stopped
    Complete,
    /// Timer was not running (or had nothing left), nothing happened
    Ignored,
}

/// A countdown with a remaining duration and a running flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining_ms: u64,
    running: bool,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.remaining_ms > 0 {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::from_remaining(self.remaining_ms)
    }

    /// Add an offset to the clock. Ignored while running.
    ///
    /// Returns whether the time was added.
    pub fn add_time(&mut self, hours: u64, minutes: u64) -> bool {
        if self.running {
            return false;
        }
        let offset = hours
            .saturating_mul(MS_PER_HOUR)
            .saturating_add(minutes.saturating_mul(MS_PER_MINUTE));
        self.remaining_ms = self.remaining_ms.saturating_add(offset);
        true
    }

    /// Flip between running and paused. An empty timer cannot be started.
    ///
    /// Returns whether the running flag changed.
    pub fn toggle(&mut self) -> bool {
        if !self.running && self.remaining_ms == 0 {
            return false;
        }
        self.running = !self.running;
        true
    }

    /// Stop counting down (no-op when already paused)
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Advance the countdown by one tick period
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining_ms == 0 {
            return TickOutcome::Ignored;
        }
        if self.remaining_ms <= TICK_MS {
            self.set_remaining(0);
            return TickOutcome::Complete;
        }
        self.remaining_ms -= TICK_MS;
        TickOutcome::TimeChanged(self.remaining_ms)
    }

    /// Clear the clock. Only allowed while paused.
    pub fn reset(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.set_remaining(0);
        true
    }

    /// Overwrite the remaining time. Setting zero also stops the timer.
    pub fn set_remaining(&mut self, remaining_ms: u64) {
        self.remaining_ms = remaining_ms;
        if remaining_ms == 0 {
            self.running = false;
        }
    }
}

/// Format milliseconds as "HH:MM:SS" (hours are not wrapped at 24)
pub fn format_countdown(ms: u64) -> String {
    let total_secs = ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Fraction of the countdown still left, clamped to 0.0..=1.0
///
/// `None` when there is nothing to show (empty timer or no baseline).
pub fn progress(remaining_ms: u64, initial_ms: u64) -> Option<f64> {
    if remaining_ms == 0 || initial_ms == 0 {
        return None;
    }
    Some((remaining_ms as f64 / initial_ms as f64).clamp(0.0, 1.0))
}
