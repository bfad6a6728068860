use crate::app::AppState;
use crate::domain::{format_countdown, progress_bar, status_badge, Task, TimerState};
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, idle_style, paused_style, running_style,
    selected_style, title_style, urgency_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const PROGRESS_WIDTH: usize = 20;

/// Render the task list
pub fn render_task_list(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Task List ", title_style()));

    if app.registry.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No tasks yet. Press [a] to add one.", hint_style()),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .registry
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if idx == app.selected_task {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(task)).style(style)
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.selected_task));
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Format: Write report  00:25:00  ● Running
fn create_task_line(task: &Task) -> Line<'static> {
    let badge_style = match task.state() {
        TimerState::Running => running_style(),
        TimerState::Paused => paused_style(),
        TimerState::Idle => idle_style(),
    };

    Line::from(vec![
        Span::raw(format!(" {}  ", task.name)),
        Span::styled(
            format_countdown(task.remaining_ms()),
            urgency_style(task.timer.urgency()),
        ),
        Span::raw("  "),
        Span::styled(status_badge(task).to_string(), badge_style),
    ])
}

/// Render the countdown of the selected task with its time controls
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Timer ", title_style()));

    let Some(task) = app.registry.tasks().get(app.selected_task) else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::styled(task.name.clone(), title_style()),
        Line::raw(""),
        Line::styled(
            format!("   {}", format_countdown(task.remaining_ms())),
            urgency_style(task.timer.urgency()),
        ),
        Line::styled(format!("   {}", task.state().label()), hint_style()),
        Line::raw(""),
        Line::styled(
            format!("Added at {}", task.created_at.format("%H:%M")),
            hint_style(),
        ),
        Line::raw(""),
    ];

    if let Some(ratio) = task.progress() {
        lines.push(Line::from(vec![
            Span::styled(progress_bar(ratio, PROGRESS_WIDTH), gauge_style()),
            Span::raw(format!(" {:.0}%", ratio * 100.0)),
        ]));
        lines.push(Line::raw(format!(
            "Elapsed: {}",
            format_countdown(task.elapsed_ms())
        )));
        lines.push(Line::raw(""));
    }

    // Presets are locked while the countdown runs
    let preset_style = if task.is_running() {
        hint_style()
    } else {
        default_style()
    };
    for (i, preset) in app.settings.time_presets.iter().enumerate().take(9) {
        lines.push(Line::styled(
            format!("[{}] {}", i + 1, preset.label),
            preset_style,
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_line() {
        let mut task = Task::new("Test task".to_string());
        task.timer.add_time(0, 25);
        let line = create_task_line(&task);

        let line_str = format!("{:?}", line);
        assert!(line_str.contains("Test task"));
        assert!(line_str.contains("00:25:00"));
        assert!(line_str.contains("Paused"));
    }
}
