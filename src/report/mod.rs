pub mod generator;
pub mod stats;

pub use generator::{format_date_heading, generate_summary};
pub use stats::{calculate_day_stats, calculate_overall_stats};
