use super::enums::TimerState;
use super::task::Task;

/// Format a duration for history stats: "1h 5m", "4m 30s" or "12s"
pub fn format_duration_short(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Get status badge text
pub fn status_badge(task: &Task) -> &'static str {
    match task.state() {
        TimerState::Running => "● Running",
        TimerState::Paused => "○ Paused",
        TimerState::Idle => "",
    }
}

/// Render a progress ratio as a fixed-width bar
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_short() {
        assert_eq!(format_duration_short(0), "0s");
        assert_eq!(format_duration_short(12_345), "12s");
        assert_eq!(format_duration_short(270_000), "4m 30s");
        assert_eq!(format_duration_short(3_900_000), "1h 5m");
        assert_eq!(format_duration_short(7_200_000), "2h 0m");
    }

    #[test]
    fn test_status_badge() {
        let mut task = Task::new("Test".to_string());
        assert_eq!(status_badge(&task), "");

        task.timer.add_time(0, 5);
        assert_eq!(status_badge(&task), "○ Paused");

        task.timer.toggle();
        assert_eq!(status_badge(&task), "● Running");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.0, 3), "███");
        assert_eq!(progress_bar(2.0, 3), "███");
        assert_eq!(progress_bar(0.0, 2), "░░");
    }
}
