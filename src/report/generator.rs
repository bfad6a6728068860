use crate::domain::{format_duration_short, parse_date_key};
use crate::history::HistoryStore;
use crate::report::stats::{calculate_day_stats, calculate_overall_stats};

/// Human-readable heading for a date key ("Monday, October 19, 2026")
pub fn format_date_heading(date_key: &str) -> String {
    match parse_date_key(date_key) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => date_key.to_string(),
    }
}

/// Render the whole history as plain text, most recent day first
pub fn generate_summary(store: &HistoryStore) -> String {
    if store.is_empty() {
        return "No completed tasks yet\n".to_string();
    }

    let mut report = String::new();
    let overall = calculate_overall_stats(store.records());

    report.push_str("Task History\n");
    report.push_str("============\n\n");
    report.push_str(&format!(
        "{} tasks over {} days, {} focused\n",
        overall.total_tasks,
        overall.days,
        format_duration_short(overall.total_duration)
    ));
    if let Some((name, duration)) = &overall.longest_task {
        report.push_str(&format!(
            "Longest task: {} ({})\n",
            name,
            format_duration_short(*duration)
        ));
    }
    if let Some((date, duration)) = &overall.busiest_day {
        report.push_str(&format!(
            "Busiest day: {} ({})\n",
            format_date_heading(date),
            format_duration_short(*duration)
        ));
    }

    for date in store.dates() {
        let Some(records) = store.day(&date) else {
            continue;
        };
        let stats = calculate_day_stats(records);

        report.push('\n');
        report.push_str(&format_date_heading(&date));
        report.push('\n');
        report.push_str(&format!(
            "  Tasks Completed: {}   Total Time: {}   Average Time: {}\n",
            stats.total_tasks,
            format_duration_short(stats.total_duration),
            format_duration_short(stats.average_duration as u64)
        ));
        for (index, record) in records.iter().enumerate() {
            report.push_str(&format!(
                "  {:>3}. {}  {}  @ {}\n",
                index + 1,
                record.name,
                format_duration_short(record.duration),
                record.completed_at
            ));
        }
    }

    report
}
