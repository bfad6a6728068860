use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the save-to-history prompt for a completed task
pub fn render_completion_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(pending) = &app.pending_completion else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for text in pending.prompt().lines() {
        lines.push(Line::raw(format!("  {}", text)));
    }
    if pending.never_started() {
        lines.push(Line::styled(
            "  (This timer was never started)",
            error_style(),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [y]", modal_title_style()),
        Span::raw(" Save  "),
        Span::styled("[n]", modal_title_style()),
        Span::raw(" Discard"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Complete Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the clear-all-history prompt
pub fn render_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(pending) = &app.pending_clear else {
        return;
    };
    let modal_area = create_modal_area(area);

    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", pending.prompt())),
        Line::styled("  This cannot be undone.", error_style()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear History ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
