use crate::app::AppState;
use crate::clock::now_formatted;
use crate::domain::View;
use crate::ui::styles::{border_style, clock_style, default_style, selected_style};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Render the live clock and the view tabs
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(area);

    let selected = match app.view {
        View::Tasks => 0,
        View::History => 1,
    };
    let tabs = Tabs::new(vec![View::Tasks.title(), View::History.title()])
        .select(selected)
        .style(default_style())
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    f.render_widget(tabs, chunks[0]);

    let date = Local::now().format("%a %b %d");
    let clock = Paragraph::new(Line::from(vec![
        Span::raw(format!("{}  ", date)),
        Span::styled(now_formatted(app.settings.clock_24h), clock_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    f.render_widget(clock, chunks[1]);
}
