pub mod backend;
pub mod files;
pub mod settings;

#[cfg(test)]
pub use backend::MemoryBackend;
pub use backend::{HistoryBackend, JsonFileBackend};
pub use files::{
    atomic_write, ensure_data_dir, export_file_name, history_file, init_local_data_dir,
    settings_file,
};
pub use settings::{load_settings, save_settings, AppSettings};
