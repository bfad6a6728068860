use crate::app::AppState;
use crate::domain::{UiMode, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => match app.view {
            View::Tasks => handle_tasks_view(app, key),
            View::History => handle_history_view(app, key),
        },
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmCompletion => handle_confirm_completion(app, key),
        UiMode::ConfirmClear => handle_confirm_clear(app, key),
    }
}

/// Handle keys in the task list
fn handle_tasks_view(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => Ok(true),
        KeyCode::Tab => {
            app.toggle_view();
            Ok(false)
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }

        // Time presets: 1..=9 map onto the configured preset list
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.add_preset_time(index);
            Ok(false)
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected(Instant::now());
            Ok(false)
        }
        KeyCode::Char('r') => {
            app.reset_selected();
            Ok(false)
        }
        KeyCode::Char('c') => {
            app.complete_selected();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the history view
fn handle_history_view(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => Ok(true),
        KeyCode::Tab | KeyCode::Esc => {
            app.toggle_view();
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            app.delete_selected_record();
            Ok(false)
        }
        KeyCode::Char('C') => {
            app.request_clear();
            Ok(false)
        }
        KeyCode::Char('e') => {
            app.export_history();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys while typing a task name
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.input_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn handle_confirm_completion(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_completion(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_completion(false),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_clear(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(true),
        // Clearing is destructive: Enter does not confirm
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
            app.confirm_clear(false)
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MS_PER_MINUTE;
    use crate::history::HistoryStore;
    use crate::persistence::{AppSettings, MemoryBackend};

    fn create_test_app() -> AppState {
        let history = HistoryStore::load(Box::new(MemoryBackend::new()));
        let mut app = AppState::new(history, AppSettings::default(), std::env::temp_dir());
        app.registry.add_task("Test task");
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        app.registry.add_task("Task 2");

        assert_eq!(app.selected_task, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_task, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_task, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.registry.len();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // 'q' is text here, not quit
        type_text(&mut app, "quiz");
        assert_eq!(app.input, "quiz");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.registry.len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_escape_cancels_add_task() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Nope");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.registry.len(), 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_preset_keys_add_time() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();

        assert_eq!(app.registry.tasks()[0].remaining_ms(), 25 * MS_PER_MINUTE);
    }

    #[test]
    fn test_enter_toggles_timer() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.registry.tasks()[0].is_running());

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.registry.tasks()[0].is_running());
    }

    #[test]
    fn test_reset_key() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();

        assert_eq!(app.registry.tasks()[0].remaining_ms(), 0);
    }

    #[test]
    fn test_handle_delete_task() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.registry.is_empty());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_complete_and_confirm() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmCompletion);

        // Unrelated keys leave the prompt open
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmCompletion);

        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.registry.is_empty());
        assert_eq!(app.history.record_count(), 1);
    }

    #[test]
    fn test_complete_and_decline() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('c'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert!(app.registry.is_empty());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_history_clear_needs_explicit_yes() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('c'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.view, View::History);

        handle_key(&mut app, key(KeyCode::Char('C'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.history.record_count(), 1);

        handle_key(&mut app, key(KeyCode::Char('C'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_history_delete_record() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('c'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.history.is_empty());
    }
}
