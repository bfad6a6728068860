use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One quick-add button for the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreset {
    pub label: String,
    pub hours: u64,
    pub minutes: u64,
}

impl TimePreset {
    pub fn new(label: &str, hours: u64, minutes: u64) -> Self {
        Self {
            label: label.to_string(),
            hours,
            minutes,
        }
    }
}

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Show the clock as 24-hour instead of "hh:mm:ss AM"
    #[serde(default)]
    pub clock_24h: bool,
    #[serde(default = "default_time_presets")]
    pub time_presets: Vec<TimePreset>,
}

fn default_time_presets() -> Vec<TimePreset> {
    vec![
        TimePreset::new("+5min", 0, 5),
        TimePreset::new("+10min", 0, 10),
        TimePreset::new("+15min", 0, 15),
        TimePreset::new("+1hr", 1, 0),
    ]
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            clock_24h: false,
            time_presets: default_time_presets(),
        }
    }
}

/// Load settings from settings.json, defaults when the file is missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = std::fs::read_to_string(path)?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
