pub mod enums;
pub mod history;
pub mod task;
pub mod timer;
pub mod views;

pub use enums::{TimerState, UiMode, Urgency, View};
pub use history::{date_key, parse_date_key, sorted_dates, HistoryMap, HistoryRecord};
pub use task::{Task, TaskId};
pub use timer::{format_countdown, TickOutcome, TICK_MS};
#[cfg(test)]
pub use timer::MS_PER_MINUTE;
pub use views::{format_duration_short, progress_bar, status_badge};
