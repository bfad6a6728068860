use chrono::{Local, NaiveTime, Timelike};

/// Format a wall-clock time as "hh:mm:ss AM" (or "HH:MM:SS" in 24-hour mode)
pub fn format_clock(time: NaiveTime, use_24h: bool) -> String {
    if use_24h {
        return format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second());
    }
    let (is_pm, hour12) = time.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!(
        "{:02}:{:02}:{:02} {}",
        hour12,
        time.minute(),
        time.second(),
        meridiem
    )
}

/// Current local time, formatted for the header
pub fn now_formatted(use_24h: bool) -> String {
    format_clock(Local::now().time(), use_24h)
}
