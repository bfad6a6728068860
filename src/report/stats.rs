use crate::domain::{HistoryMap, HistoryRecord};

/// Statistics for one day of history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub total_tasks: usize,
    pub total_duration: u64,
    /// Mean duration in milliseconds (0 for an empty day)
    pub average_duration: f64,
}

/// Statistics across the whole history
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub days: usize,
    pub total_tasks: usize,
    pub total_duration: u64,
    pub longest_task: Option<(String, u64)>,
    /// Date key with the most focused time
    pub busiest_day: Option<(String, u64)>,
}

/// Calculate count, total and average for one day's records
pub fn calculate_day_stats(records: &[HistoryRecord]) -> DayStats {
    let total_tasks = records.len();
    let total_duration = records
        .iter()
        .fold(0u64, |total, r| total.saturating_add(r.duration));
    let average_duration = if total_tasks > 0 {
        total_duration as f64 / total_tasks as f64
    } else {
        0.0
    };

    DayStats {
        total_tasks,
        total_duration,
        average_duration,
    }
}

/// Calculate statistics across every day
pub fn calculate_overall_stats(history: &HistoryMap) -> OverallStats {
    let mut total_tasks = 0;
    let mut total_duration = 0u64;
    let mut longest_task: Option<(String, u64)> = None;
    let mut busiest_day: Option<(String, u64)> = None;

    for (date, records) in history {
        let day = calculate_day_stats(records);
        total_tasks += day.total_tasks;
        total_duration = total_duration.saturating_add(day.total_duration);

        if busiest_day.as_ref().map_or(true, |(_, d)| day.total_duration > *d) {
            busiest_day = Some((date.clone(), day.total_duration));
        }

        for record in records {
            if longest_task.as_ref().map_or(true, |(_, d)| record.duration > *d) {
                longest_task = Some((record.name.clone(), record.duration));
            }
        }
    }

    OverallStats {
        days: history.len(),
        total_tasks,
        total_duration,
        longest_task,
        busiest_day,
    }
}
