pub mod header_pane;
pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;

use crate::app::AppState;
use crate::domain::{UiMode, View};
use header_pane::render_header;
use history_pane::{render_history_list, render_history_stats};
use input_form::render_input_form;
use keybindings::{render_keybindings, render_status};
use layout::create_layout;
use modal::{render_clear_modal, render_completion_modal};
use ratatui::Frame;
use task_pane::{render_task_list, render_timer_pane};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_header(f, app, layout.header_area);

    match app.view {
        View::Tasks => {
            render_task_list(f, app, layout.list_area);
            render_timer_pane(f, app, layout.side_area);
        }
        View::History => {
            render_history_list(f, app, layout.list_area);
            render_history_stats(f, app, layout.side_area);
        }
    }

    render_status(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::ConfirmCompletion => render_completion_modal(f, app, size),
        UiMode::ConfirmClear => render_clear_modal(f, app, size),
        UiMode::Normal => {}
    }
}
