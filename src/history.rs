//! Completed-task history grouped by calendar day.
//!
//! The store keeps the whole document in memory and writes the whole
//! document back after every mutation. Persistence failures never reach the
//! caller as errors: reads fall back to an empty history and failed writes
//! leave the in-memory state updated, both logged. A document that could not
//! be read is moved aside before the first write replaces it.

use crate::domain::{sorted_dates, HistoryMap, HistoryRecord};
use crate::persistence::{atomic_write, export_file_name, HistoryBackend};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Proof that a clear-all was requested; consumed by [`HistoryStore::confirm_clear`]
#[derive(Debug)]
#[must_use]
pub struct PendingClear {
    record_count: usize,
}

impl PendingClear {
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn prompt(&self) -> String {
        format!(
            "Delete all {} history records? This operation cannot be undone!",
            self.record_count
        )
    }
}

pub struct HistoryStore {
    backend: Box<dyn HistoryBackend>,
    records: HistoryMap,
    persist_error: Option<String>,
    /// The persisted document exists but could not be read
    load_failed: bool,
}

impl HistoryStore {
    /// Open the store, reading the persisted document
    pub fn load(backend: Box<dyn HistoryBackend>) -> Self {
        let mut store = Self {
            backend,
            records: HistoryMap::new(),
            persist_error: None,
            load_failed: false,
        };
        store.reload();
        store
    }

    fn reload(&mut self) {
        self.load_failed = false;
        self.records = match self.backend.load() {
            Ok(mut records) => {
                // An empty day is not a valid entry
                records.retain(|_, day| !day.is_empty());
                log::debug!(
                    "loaded history from {}: {} days",
                    self.backend.describe(),
                    records.len()
                );
                records
            }
            Err(e) => {
                log::warn!(
                    "failed to load task history from {}: {}",
                    self.backend.describe(),
                    e
                );
                self.load_failed = true;
                HistoryMap::new()
            }
        };
    }

    pub fn records(&self) -> &HistoryMap {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records across all days
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Records of one day, in completion order
    pub fn day(&self, date_key: &str) -> Option<&[HistoryRecord]> {
        self.records.get(date_key).map(Vec::as_slice)
    }

    /// Date keys, most recent first
    pub fn dates(&self) -> Vec<String> {
        sorted_dates(&self.records)
    }

    /// Append a record under `date_key`, creating the day if needed
    pub fn append(&mut self, date_key: &str, record: HistoryRecord) {
        log::info!(
            "task saved: {} ({} ms) under {}",
            record.name,
            record.duration,
            date_key
        );
        self.records
            .entry(date_key.to_string())
            .or_default()
            .push(record);
        self.persist();
    }

    /// Remove the record at `index` of `date_key`; the day goes away with its last record
    ///
    /// Returns whether a record was removed. Unknown days and out-of-range
    /// indices are ignored.
    pub fn delete_record(&mut self, date_key: &str, index: usize) -> bool {
        let Some(day) = self.records.get_mut(date_key) else {
            return false;
        };
        if index >= day.len() {
            return false;
        }
        let removed = day.remove(index);
        if day.is_empty() {
            self.records.remove(date_key);
        }
        log::info!("deleted history record {} from {}", removed.name, date_key);
        self.persist();
        true
    }

    /// Ask to clear everything. `None` when there is nothing to clear.
    pub fn request_clear(&self) -> Option<PendingClear> {
        if self.records.is_empty() {
            return None;
        }
        Some(PendingClear {
            record_count: self.record_count(),
        })
    }

    /// Answer a clear-all request. Returns whether the history was cleared.
    pub fn confirm_clear(&mut self, pending: PendingClear, accepted: bool) -> bool {
        if !accepted {
            log::debug!("clear history cancelled");
            return false;
        }
        self.records.clear();
        log::info!("cleared {} history records", pending.record_count);
        self.persist();
        true
    }

    /// Pretty-printed JSON of the whole history
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records).context("Failed to serialize history")
    }

    /// Write `task_history_<date>.json` into `dir`, returning its path
    pub fn export_to(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(export_file_name(date));
        let json = self.export_json()?;
        atomic_write(&path, &json)?;
        log::info!("exported history to {}", path.display());
        Ok(path)
    }

    /// Last write failure since the previous call, if any
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }

    fn persist(&mut self) {
        if self.load_failed {
            match self.backend.back_up_unreadable() {
                Ok(backup) => {
                    log::warn!(
                        "moved unreadable task history {} to {}",
                        self.backend.describe(),
                        backup.as_deref().unwrap_or("<nowhere>")
                    );
                    self.load_failed = false;
                }
                Err(e) => {
                    log::error!(
                        "not saving over unreadable task history {}: {}",
                        self.backend.describe(),
                        e
                    );
                    self.persist_error = Some(e.to_string());
                    return;
                }
            }
        }
        if let Err(e) = self.backend.save(&self.records) {
            log::error!(
                "failed to save task history to {}: {}",
                self.backend.describe(),
                e
            );
            self.persist_error = Some(e.to_string());
        }
    }
}
