use crate::domain::HistoryMap;
use crate::persistence::files::atomic_write;
#[cfg(test)]
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
#[cfg(test)]
use std::rc::Rc;
use thiserror::Error;

/// Failure reading or writing the history document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write failed: {0:#}")]
    Write(anyhow::Error),
}

/// Where the history document lives
///
/// Both operations move the whole document; there are no partial updates.
pub trait HistoryBackend {
    fn load(&self) -> Result<HistoryMap, StoreError>;
    fn save(&mut self, history: &HistoryMap) -> Result<(), StoreError>;
    /// Move an unreadable document aside so the next save cannot destroy it.
    /// Returns where it went, if anywhere.
    fn back_up_unreadable(&mut self) -> Result<Option<String>, StoreError>;
    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// History persisted as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl HistoryBackend for JsonFileBackend {
    fn load(&self) -> Result<HistoryMap, StoreError> {
        if !self.path.exists() {
            return Ok(HistoryMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HistoryMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, history: &HistoryMap) -> Result<(), StoreError> {
        let json = serde_json::to_string(history)?;
        atomic_write(&self.path, &json).map_err(StoreError::Write)
    }

    fn back_up_unreadable(&mut self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        Ok(Some(backup.display().to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory document, shared between clones
///
/// Keeps the serialized JSON so callers can inspect exactly what was persisted.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Rc<RefCell<Option<String>>>,
    backup: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw document (may be invalid JSON)
    pub fn with_document(document: &str) -> Self {
        let backend = Self::new();
        *backend.document.borrow_mut() = Some(document.to_string());
        backend
    }

    /// Raw JSON last written, if any
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Raw document moved aside by `back_up_unreadable`
    pub fn backup(&self) -> Option<String> {
        self.backup.borrow().clone()
    }

    /// Make subsequent saves fail
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

#[cfg(test)]
impl HistoryBackend for MemoryBackend {
    fn load(&self) -> Result<HistoryMap, StoreError> {
        match self.document.borrow().as_deref() {
            None => Ok(HistoryMap::new()),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    fn save(&mut self, history: &HistoryMap) -> Result<(), StoreError> {
        if *self.fail_writes.borrow() {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "simulated write failure");
            return Err(err.into());
        }
        *self.document.borrow_mut() = Some(serde_json::to_string(history)?);
        Ok(())
    }

    fn back_up_unreadable(&mut self) -> Result<Option<String>, StoreError> {
        let document = self.document.borrow_mut().take();
        let moved = document.is_some();
        *self.backup.borrow_mut() = document;
        Ok(moved.then(|| "memory backup".to_string()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HistoryRecord;
    use pretty_assertions::assert_eq;

    fn sample() -> HistoryMap {
        let mut history = HistoryMap::new();
        history.insert(
            "2026-10-19".to_string(),
            vec![HistoryRecord::new("Write report".to_string(), 60_000, "9:00:00 AM".to_string())],
        );
        history
    }

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("history.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(temp_dir.path().join("history.json"));

        backend.save(&sample()).unwrap();
        assert_eq!(backend.load().unwrap(), sample());
    }

    #[test]
    fn test_file_backend_creates_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("history.json");
        let mut backend = JsonFileBackend::new(path.clone());

        backend.save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_backend_corrupt_file_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let backend = JsonFileBackend::new(path);
        assert!(matches!(backend.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_file_backend_backs_up_unreadable_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        let mut backend = JsonFileBackend::new(path.clone());

        let backup = backend.back_up_unreadable().unwrap().unwrap();
        assert!(backup.ends_with("history.json.bak"));
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("history.json.bak")).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_file_backend_backup_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(temp_dir.path().join("history.json"));
        assert!(backend.back_up_unreadable().unwrap().is_none());
    }

    #[test]
    fn test_memory_backend_shares_document_between_clones() {
        let backend = MemoryBackend::new();
        let mut writer = backend.clone();

        writer.save(&sample()).unwrap();
        let document = backend.document().unwrap();
        assert!(document.contains("\"completedAt\":\"9:00:00 AM\""));
        assert_eq!(backend.load().unwrap(), sample());
    }

    #[test]
    fn test_memory_backend_failing_writes() {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        let mut writer = backend.clone();

        assert!(matches!(writer.save(&sample()), Err(StoreError::Io(_))));
        assert!(backend.document().is_none());
    }
}
