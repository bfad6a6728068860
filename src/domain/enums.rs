/// Lifecycle state of a countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No time on the clock
    Idle,
    /// Time on the clock, not counting down
    Paused,
    /// Counting down
    Running,
}

impl TimerState {
    /// Label shown under the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Empty",
            Self::Paused => "Paused",
            Self::Running => "Running",
        }
    }
}

/// How close a countdown is to zero (drives the countdown color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Empty,
    /// Last minute
    Critical,
    /// Last five minutes
    Warning,
    Normal,
}

impl Urgency {
    pub fn from_remaining(remaining_ms: u64) -> Self {
        match remaining_ms {
            0 => Self::Empty,
            1..=60_000 => Self::Critical,
            60_001..=300_000 => Self::Warning,
            _ => Self::Normal,
        }
    }
}

/// Which top-level view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tasks,
    History,
}

impl View {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Tasks => Self::History,
            Self::History => Self::Tasks,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Tasks => "Task List",
            Self::History => "History",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    ConfirmCompletion,
    ConfirmClear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(Urgency::from_remaining(0), Urgency::Empty);
        assert_eq!(Urgency::from_remaining(1_000), Urgency::Critical);
        assert_eq!(Urgency::from_remaining(60_000), Urgency::Critical);
        assert_eq!(Urgency::from_remaining(60_001), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(300_000), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(300_001), Urgency::Normal);
    }

    #[test]
    fn test_view_toggled() {
        assert_eq!(View::Tasks.toggled(), View::History);
        assert_eq!(View::History.toggled(), View::Tasks);
    }

    #[test]
    fn test_timer_state_label() {
        assert_eq!(TimerState::Running.label(), "Running");
        assert_eq!(TimerState::Paused.label(), "Paused");
    }
}
