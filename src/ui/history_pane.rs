use crate::app::AppState;
use crate::domain::format_duration_short;
use crate::report::{calculate_day_stats, calculate_overall_stats, format_date_heading};
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render completed tasks grouped by day, newest day first
pub fn render_history_list(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Task History ", title_style()));

    if app.history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No completed tasks yet", hint_style()),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let (items, selected) = history_items(app);
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// List rows for every day, plus the list position of the selected record
fn history_items(app: &AppState) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut items = Vec::new();
    let mut selected = None;
    let mut row = 0;
    for date in app.history.dates() {
        let Some(records) = app.history.day(&date) else {
            continue;
        };
        let stats = calculate_day_stats(records);

        items.push(ListItem::new(Line::styled(
            format_date_heading(&date),
            title_style(),
        )));
        items.push(ListItem::new(Line::styled(
            format!(
                "  Tasks Completed: {}  Total Time: {}  Average Time: {}",
                stats.total_tasks,
                format_duration_short(stats.total_duration),
                format_duration_short(stats.average_duration as u64)
            ),
            hint_style(),
        )));

        for record in records {
            let style = if row == app.selected_record {
                selected = Some(items.len());
                selected_style()
            } else {
                default_style()
            };
            items.push(
                ListItem::new(Line::from(vec![
                    Span::raw(format!("  {}  ", record.name)),
                    Span::raw(format_duration_short(record.duration)),
                    Span::raw(format!("  @ {}", record.completed_at)),
                ]))
                .style(style),
            );
            row += 1;
        }
        items.push(ListItem::new(Line::raw("")));
    }
    (items, selected)
}

/// Render totals across the whole history
pub fn render_history_stats(f: &mut Frame, app: &AppState, area: Rect) {
    let overall = calculate_overall_stats(app.history.records());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Days:   ", title_style()),
            Span::raw(overall.days.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Tasks:  ", title_style()),
            Span::raw(overall.total_tasks.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Focus:  ", title_style()),
            Span::raw(format_duration_short(overall.total_duration)),
        ]),
        Line::raw(""),
    ];

    if let Some((name, duration)) = &overall.longest_task {
        lines.push(Line::styled("Longest task:", title_style()));
        lines.push(Line::raw(format!(
            "  {} ({})",
            name,
            format_duration_short(*duration)
        )));
    }
    if let Some((date, duration)) = &overall.busiest_day {
        lines.push(Line::styled("Busiest day:", title_style()));
        lines.push(Line::raw(format!(
            "  {} ({})",
            format_date_heading(date),
            format_duration_short(*duration)
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Summary ", title_style())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
