use crate::domain::{TaskId, UiMode, View};
use crate::history::{HistoryStore, PendingClear};
use crate::notifications;
use crate::persistence::AppSettings;
use crate::registry::{PendingCompletion, TaskRegistry, TickEvent};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a status message stays in the footer
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Transient one-line message shown in the footer
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

/// A row of the history view: a record addressed by its day and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date_key: String,
    pub index: usize,
}

/// Main application state
pub struct AppState {
    pub registry: TaskRegistry,
    pub history: HistoryStore,
    pub settings: AppSettings,
    pub view: View,
    pub ui_mode: UiMode,
    pub selected_task: usize,
    pub selected_record: usize,
    /// Name being typed in the add-task form
    pub input: String,
    pub pending_completion: Option<PendingCompletion>,
    /// Tasks whose countdown finished while another prompt was open
    pub completion_queue: VecDeque<TaskId>,
    pub pending_clear: Option<PendingClear>,
    pub status: Option<StatusMessage>,
    /// Directory exports are written to
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(history: HistoryStore, settings: AppSettings, export_dir: PathBuf) -> Self {
        Self {
            registry: TaskRegistry::new(),
            history,
            settings,
            view: View::Tasks,
            ui_mode: UiMode::Normal,
            selected_task: 0,
            selected_record: 0,
            input: String::new(),
            pending_completion: None,
            completion_queue: VecDeque::new(),
            pending_clear: None,
            status: None,
            export_dir,
        }
    }

    /// Switch between the task list and the history view
    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
        if self.view == View::History {
            self.selected_record = 0;
        }
    }

    /// ID of the highlighted task, if any
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.registry.tasks().get(self.selected_task).map(|t| t.id)
    }

    /// Records of the history view in display order (newest day first)
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        let mut rows = Vec::new();
        for date_key in self.history.dates() {
            let count = self.history.day(&date_key).map_or(0, |day| day.len());
            for index in 0..count {
                rows.push(HistoryRow {
                    date_key: date_key.clone(),
                    index,
                });
            }
        }
        rows
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        let selected = match self.view {
            View::Tasks => &mut self.selected_task,
            View::History => &mut self.selected_record,
        };
        *selected = selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let len = match self.view {
            View::Tasks => self.registry.len(),
            View::History => self.history.record_count(),
        };
        let selected = match self.view {
            View::Tasks => &mut self.selected_task,
            View::History => &mut self.selected_record,
        };
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_task = self.selected_task.min(self.registry.len().saturating_sub(1));
        self.selected_record = self
            .selected_record
            .min(self.history.record_count().saturating_sub(1));
    }

    /// Open the add-task form
    pub fn start_add_task(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Submit the add-task form. A blank name keeps the form open.
    pub fn submit_input(&mut self) {
        if self.registry.add_task(&self.input).is_some() {
            self.selected_task = self.registry.len() - 1;
            self.input.clear();
            self.ui_mode = UiMode::Normal;
            self.open_next_completion();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::Normal;
        self.open_next_completion();
    }

    /// Start or pause the selected task
    pub fn toggle_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected_task_id() {
            self.registry.toggle_timer(id, now);
        }
    }

    /// Add the preset at `preset_index` to the selected task
    pub fn add_preset_time(&mut self, preset_index: usize) {
        let Some(preset) = self.settings.time_presets.get(preset_index).cloned() else {
            return;
        };
        if let Some(id) = self.selected_task_id() {
            if !self.registry.add_time(id, preset.hours, preset.minutes) {
                self.set_status("Pause the timer before adding time", false);
            }
        }
    }

    /// Reset the selected task's countdown (paused tasks only)
    pub fn reset_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.registry.reset_time(id);
        }
    }

    /// Delete the selected task without recording it
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.registry.delete_task(id);
            self.completion_queue.retain(|queued| *queued != id);
            self.clamp_selection();
        }
    }

    /// Ask to complete the selected task
    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.open_completion(id);
        }
    }

    fn open_completion(&mut self, id: TaskId) {
        if self.pending_completion.is_some() || self.ui_mode != UiMode::Normal {
            if !self.completion_queue.contains(&id) {
                self.completion_queue.push_back(id);
            }
            return;
        }
        if let Some(pending) = self.registry.request_completion(id) {
            self.pending_completion = Some(pending);
            self.ui_mode = UiMode::ConfirmCompletion;
        }
    }

    /// Answer the completion prompt
    pub fn confirm_completion(&mut self, accepted: bool) {
        let Some(pending) = self.pending_completion.take() else {
            return;
        };
        let name = pending.name().to_string();
        let saved = self
            .registry
            .confirm_completion(pending, accepted, &mut self.history, Local::now());
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();

        if saved.is_some() {
            self.set_status(&format!("Saved \"{}\" to history", name), false);
        }
        self.check_persist_error();
        self.open_next_completion();
    }

    fn open_next_completion(&mut self) {
        while let Some(id) = self.completion_queue.pop_front() {
            if self.registry.get(id).is_some() {
                self.open_completion(id);
                return;
            }
        }
    }

    /// Fire due countdown ticks
    pub fn tick(&mut self, now: Instant) {
        for event in self.registry.poll_ticks(now) {
            if let TickEvent::Completed { id } = event {
                if let Some(task) = self.registry.get(id) {
                    notifications::notify_countdown_done(&task.name);
                }
                self.open_completion(id);
            }
        }

        if let Some(status) = &self.status {
            if status.shown_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Delete the highlighted history record
    pub fn delete_selected_record(&mut self) {
        let rows = self.history_rows();
        if let Some(row) = rows.get(self.selected_record) {
            self.history.delete_record(&row.date_key, row.index);
            self.clamp_selection();
            self.check_persist_error();
        }
    }

    /// Ask to clear the whole history
    pub fn request_clear(&mut self) {
        if let Some(pending) = self.history.request_clear() {
            self.pending_clear = Some(pending);
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    /// Answer the clear-all prompt
    pub fn confirm_clear(&mut self, accepted: bool) {
        if let Some(pending) = self.pending_clear.take() {
            if self.history.confirm_clear(pending, accepted) {
                self.selected_record = 0;
                self.set_status("History cleared", false);
            }
            self.check_persist_error();
        }
        self.ui_mode = UiMode::Normal;
        self.open_next_completion();
    }

    /// Export the history next to the data files
    pub fn export_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self
            .history
            .export_to(&self.export_dir, Local::now().date_naive())
        {
            Ok(path) => self.set_status(&format!("Exported to {}", path.display()), false),
            Err(e) => {
                log::error!("failed to export history: {:#}", e);
                self.set_status("Export failed (see log)", true);
            }
        }
    }

    /// Stop every countdown before exit
    pub fn shutdown(&mut self) {
        self.registry.pause_all();
    }

    pub fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    fn check_persist_error(&mut self) {
        if self.history.take_persist_error().is_some() {
            self.set_status("Could not save history (changes kept for this session)", true);
        }
    }
}
