use crate::domain::Urgency;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Running status badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused status badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Empty timer style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Countdown color for how close a timer is to zero
pub fn urgency_style(urgency: Urgency) -> Style {
    match urgency {
        Urgency::Empty => idle_style(),
        Urgency::Critical => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Urgency::Warning => Style::default().fg(Color::Yellow),
        Urgency::Normal => Style::default().fg(Color::Green),
    }
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Header clock style
pub fn clock_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress bar style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Success/info message style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}
