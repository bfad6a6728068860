use crate::app::AppState;
use crate::domain::View;
use crate::ui::styles::{done_style, error_style, hint_style};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hint text for the current view
pub fn hints_for(view: View) -> &'static str {
    match view {
        View::Tasks => {
            " ↑/↓ select   a add   1-4 add time   Enter start/pause   r reset   c complete   x delete   Tab history   q quit"
        }
        View::History => " ↑/↓ select   x delete   C clear all   e export   Tab tasks   q quit",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints_for(app.view))).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the transient status message, if any
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(status) = &app.status {
        let style = if status.is_error {
            error_style()
        } else {
            done_style()
        };
        let paragraph = Paragraph::new(Line::raw(format!(" {}", status.text))).style(style);
        f.render_widget(paragraph, area);
    }
}
