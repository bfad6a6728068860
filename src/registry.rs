use crate::domain::{date_key, format_countdown, HistoryRecord, Task, TaskId, TickOutcome};
use crate::history::HistoryStore;
use crate::ticker::TickScheduler;
use chrono::{DateTime, Local};
use std::time::Instant;

/// What a tick did to a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    TimeChanged { id: TaskId, remaining_ms: u64 },
    /// Countdown hit zero; the task waits for its completion to be confirmed
    Completed { id: TaskId },
}

/// A completion waiting for the user to save or discard it
#[derive(Debug, Clone)]
#[must_use]
pub struct PendingCompletion {
    id: TaskId,
    name: String,
    elapsed_ms: u64,
    never_started: bool,
}

impl PendingCompletion {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// The timer never ran, so no time was actually counted down
    pub fn never_started(&self) -> bool {
        self.never_started
    }

    pub fn prompt(&self) -> String {
        format!(
            "Task: \"{}\"\nDuration: {}\n\nDo you want to save this task?",
            self.name,
            format_countdown(self.elapsed_ms)
        )
    }
}

/// Ordered list of tasks plus one tick source per running task
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    ticks: TickScheduler,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Whether `id` currently has a live tick source
    #[cfg(test)]
    pub fn is_ticking(&self, id: TaskId) -> bool {
        self.ticks.is_scheduled(id)
    }

    /// Add a task. Blank names are ignored.
    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let task = Task::new(name.to_string());
        let id = task.id;
        log::debug!("added task {} ({})", task.name, id);
        self.tasks.push(task);
        Some(id)
    }

    /// Remove a task and its tick source. Returns false if `id` is unknown.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.ticks.cancel(id);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Start or pause a task's countdown
    ///
    /// Starting snapshots the remaining time as the baseline for elapsed time
    /// and registers a tick source; pausing cancels it.
    pub fn toggle_timer(&mut self, id: TaskId, now: Instant) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !task.timer.toggle() {
            return false;
        }
        if task.is_running() {
            task.total_time = Some(task.remaining_ms());
            self.ticks.schedule(id, now);
        } else {
            self.ticks.cancel(id);
        }
        true
    }

    /// Overwrite a task's remaining time
    pub fn update_task_time(&mut self, id: TaskId, new_time: u64) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.timer.set_remaining(new_time);
        if !task.is_running() {
            self.ticks.cancel(id);
        }
        true
    }

    /// Add an offset to a paused task's countdown
    pub fn add_time(&mut self, id: TaskId, hours: u64, minutes: u64) -> bool {
        self.get_mut(id)
            .map_or(false, |task| task.timer.add_time(hours, minutes))
    }

    /// Clear a paused task's countdown
    pub fn reset_time(&mut self, id: TaskId) -> bool {
        self.get_mut(id).map_or(false, |task| task.timer.reset())
    }

    /// Fire every due tick and report what changed
    pub fn poll_ticks(&mut self, now: Instant) -> Vec<TickEvent> {
        let mut events = Vec::new();

        for id in self.ticks.poll(now) {
            let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
                log::debug!("dropping tick source for removed task {}", id);
                self.ticks.cancel(id);
                continue;
            };
            match task.timer.tick() {
                TickOutcome::TimeChanged(remaining_ms) => {
                    events.push(TickEvent::TimeChanged { id, remaining_ms });
                }
                TickOutcome::Complete => {
                    self.ticks.cancel(id);
                    log::info!("countdown finished for {}", task.name);
                    events.push(TickEvent::Completed { id });
                }
                TickOutcome::Ignored => {
                    self.ticks.cancel(id);
                }
            }
        }

        events
    }

    /// Stop every countdown (e.g. before exit)
    pub fn pause_all(&mut self) {
        for task in &mut self.tasks {
            task.timer.pause();
            self.ticks.cancel(task.id);
        }
    }

    /// First step of completing a task: stop it and compute the elapsed time
    pub fn request_completion(&mut self, id: TaskId) -> Option<PendingCompletion> {
        self.ticks.cancel(id);
        let task = self.get_mut(id)?;
        task.timer.pause();

        Some(PendingCompletion {
            id,
            name: task.name.clone(),
            elapsed_ms: task.elapsed_ms(),
            never_started: task.total_time.is_none(),
        })
    }

    /// Second step: remove the task, and record it in `history` if accepted
    ///
    /// The task leaves the list whatever the answer. Returns the saved record.
    pub fn confirm_completion(
        &mut self,
        pending: PendingCompletion,
        accepted: bool,
        history: &mut HistoryStore,
        at: DateTime<Local>,
    ) -> Option<HistoryRecord> {
        self.delete_task(pending.id);

        if !accepted {
            log::debug!("discarded completion of {}", pending.name);
            return None;
        }
        if pending.never_started {
            log::warn!(
                "saving {} although its timer never ran (duration {} ms)",
                pending.name,
                pending.elapsed_ms
            );
        }

        let record = HistoryRecord::completed(pending.name, pending.elapsed_ms, at);
        history.append(&date_key(at.date_naive()), record.clone());
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TimerState, MS_PER_MINUTE};
    use crate::persistence::MemoryBackend;
    use std::time::Duration;

    fn history() -> HistoryStore {
        HistoryStore::load(Box::new(MemoryBackend::new()))
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_add_task() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("  Write report  ").unwrap();

        let task = registry.get(id).unwrap();
        assert_eq!(task.name, "Write report");
        assert_eq!(task.remaining_ms(), 0);
        assert!(!task.is_running());
    }

    #[test]
    fn test_add_blank_task_is_noop() {
        let mut registry = TaskRegistry::new();
        assert!(registry.add_task("").is_none());
        assert!(registry.add_task("   \t").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_tasks_keep_insertion_order() {
        let mut registry = TaskRegistry::new();
        registry.add_task("First");
        registry.add_task("Second");

        let names: Vec<&str> = registry.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_delete_task() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Gone").unwrap();

        assert!(registry.delete_task(id));
        assert!(registry.get(id).is_none());
        assert!(!registry.delete_task(id));
    }

    #[test]
    fn test_toggle_snapshots_total_time() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Focus").unwrap();
        registry.add_time(id, 0, 10);

        assert!(registry.toggle_timer(id, Instant::now()));

        let task = registry.get(id).unwrap();
        assert!(task.is_running());
        assert_eq!(task.total_time, Some(10 * MS_PER_MINUTE));
        assert!(registry.is_ticking(id));
    }

    #[test]
    fn test_toggle_empty_task_is_noop() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Empty").unwrap();

        assert!(!registry.toggle_timer(id, Instant::now()));
        assert!(!registry.is_ticking(id));
        assert!(registry.get(id).unwrap().total_time.is_none());
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut registry = TaskRegistry::new();
        assert!(!registry.toggle_timer(uuid::Uuid::now_v7(), Instant::now()));
    }

    #[test]
    fn test_add_time_ignored_while_running() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Busy").unwrap();
        registry.add_time(id, 0, 5);
        registry.toggle_timer(id, Instant::now());

        assert!(!registry.add_time(id, 1, 0));
        assert_eq!(registry.get(id).unwrap().remaining_ms(), 5 * MS_PER_MINUTE);
    }

    #[test]
    fn test_update_task_time() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Set").unwrap();

        assert!(registry.update_task_time(id, 42_000));
        assert_eq!(registry.get(id).unwrap().remaining_ms(), 42_000);
    }

    #[test]
    fn test_reset_time() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Reset me").unwrap();
        registry.add_time(id, 0, 5);

        assert!(registry.reset_time(id));
        assert_eq!(registry.get(id).unwrap().state(), TimerState::Idle);
    }

    #[test]
    fn test_write_report_scenario() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Write report").unwrap();
        registry.add_time(id, 0, 15);
        let at_start = registry.get(id).unwrap().remaining_ms();

        registry.toggle_timer(id, start);
        for n in 1..=5 {
            let events = registry.poll_ticks(start + secs(n));
            assert_eq!(events.len(), 1);
        }
        assert_eq!(registry.get(id).unwrap().remaining_ms(), at_start - 5_000);

        registry.toggle_timer(id, start + Duration::from_millis(5_500));
        let events = registry.poll_ticks(start + secs(60));
        assert!(events.is_empty());
        assert_eq!(registry.get(id).unwrap().remaining_ms(), at_start - 5_000);
    }

    #[test]
    fn test_tick_reports_time_change() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Tick").unwrap();
        registry.update_task_time(id, 3_000);
        registry.toggle_timer(id, start);

        assert_eq!(
            registry.poll_ticks(start + secs(1)),
            vec![TickEvent::TimeChanged { id, remaining_ms: 2_000 }]
        );
    }

    #[test]
    fn test_countdown_completes_and_stops_ticking() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Short").unwrap();
        registry.update_task_time(id, 2_000);
        registry.toggle_timer(id, start);

        let events = registry.poll_ticks(start + secs(5));
        assert_eq!(
            events,
            vec![
                TickEvent::TimeChanged { id, remaining_ms: 1_000 },
                TickEvent::Completed { id },
            ]
        );

        let task = registry.get(id).unwrap();
        assert_eq!(task.remaining_ms(), 0);
        assert!(!task.is_running());
        assert!(!registry.is_ticking(id));
    }

    #[test]
    fn test_deleted_task_never_ticks() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Doomed").unwrap();
        registry.add_time(id, 0, 1);
        registry.toggle_timer(id, start);

        registry.delete_task(id);

        assert!(registry.poll_ticks(start + secs(10)).is_empty());
        assert!(!registry.is_ticking(id));
    }

    #[test]
    fn test_running_tasks_tick_independently() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let a = registry.add_task("A").unwrap();
        let b = registry.add_task("B").unwrap();
        registry.add_time(a, 0, 1);
        registry.add_time(b, 0, 1);
        registry.toggle_timer(a, start);
        registry.toggle_timer(b, start + secs(2));

        registry.poll_ticks(start + secs(3));

        assert_eq!(registry.get(a).unwrap().remaining_ms(), 57_000);
        assert_eq!(registry.get(b).unwrap().remaining_ms(), 59_000);
    }

    #[test]
    fn test_completion_elapsed_from_snapshot() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Measured").unwrap();
        registry.update_task_time(id, 600_000);
        registry.toggle_timer(id, Instant::now());
        registry.update_task_time(id, 400_000);

        let pending = registry.request_completion(id).unwrap();
        assert_eq!(pending.elapsed_ms(), 200_000);
        assert!(!pending.never_started());
        assert!(!registry.is_ticking(id));
        assert!(!registry.get(id).unwrap().is_running());
    }

    #[test]
    fn test_confirm_completion_saves_record() {
        let mut registry = TaskRegistry::new();
        let mut history = history();
        let id = registry.add_task("Saved").unwrap();
        registry.update_task_time(id, 600_000);
        registry.toggle_timer(id, Instant::now());
        registry.update_task_time(id, 400_000);

        let pending = registry.request_completion(id).unwrap();
        let at = Local::now();
        let record = registry
            .confirm_completion(pending, true, &mut history, at)
            .unwrap();

        assert_eq!(record.name, "Saved");
        assert_eq!(record.duration, 200_000);
        assert!(registry.get(id).is_none());
        let day = history.day(&date_key(at.date_naive())).unwrap();
        assert_eq!(day, &[record]);
    }

    #[test]
    fn test_cancelled_completion_still_removes_task() {
        let mut registry = TaskRegistry::new();
        let mut history = history();
        let id = registry.add_task("Discarded").unwrap();

        let pending = registry.request_completion(id).unwrap();
        assert!(registry
            .confirm_completion(pending, false, &mut history, Local::now())
            .is_none());

        assert!(registry.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_completion_of_never_started_task_is_flagged() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Never ran").unwrap();
        registry.add_time(id, 0, 15);

        let pending = registry.request_completion(id).unwrap();
        assert!(pending.never_started());
        assert_eq!(pending.elapsed_ms(), 0);
    }

    #[test]
    fn test_completion_prompt() {
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Prompted").unwrap();
        registry.update_task_time(id, 90_000);
        registry.toggle_timer(id, Instant::now());
        registry.update_task_time(id, 30_000);

        let pending = registry.request_completion(id).unwrap();
        assert_eq!(
            pending.prompt(),
            "Task: \"Prompted\"\nDuration: 00:01:00\n\nDo you want to save this task?"
        );
    }

    #[test]
    fn test_request_completion_unknown_id() {
        let mut registry = TaskRegistry::new();
        assert!(registry.request_completion(uuid::Uuid::now_v7()).is_none());
    }

    #[test]
    fn test_pause_all() {
        let start = Instant::now();
        let mut registry = TaskRegistry::new();
        let id = registry.add_task("Running").unwrap();
        registry.add_time(id, 0, 1);
        registry.toggle_timer(id, start);

        registry.pause_all();

        assert!(!registry.get(id).unwrap().is_running());
        assert!(registry.poll_ticks(start + secs(5)).is_empty());
    }
}
