use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Date key format written for new records
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Older documents keyed days as "Mon Oct 19 2026"
const LEGACY_DATE_KEY_FORMAT: &str = "%a %b %d %Y";

/// Format used for `completed_at` ("3:04:05 PM")
const COMPLETED_AT_FORMAT: &str = "%-I:%M:%S %p";

/// Log entry for a completed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub name: String,
    /// Counted-down time in milliseconds
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub duration: u64,
    /// Local time of day the task was completed
    pub completed_at: String,
}

impl HistoryRecord {
    pub fn new(name: String, duration: u64, completed_at: String) -> Self {
        Self {
            name,
            duration,
            completed_at,
        }
    }

    /// Build a record stamped with the given completion time
    pub fn completed(name: String, duration: u64, at: DateTime<Local>) -> Self {
        Self::new(name, duration, at.format(COMPLETED_AT_FORMAT).to_string())
    }
}

/// Accept any JSON number; older documents can hold negative or fractional
/// durations, which clamp to zero and round respectively.
fn deserialize_duration<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match RawDuration::deserialize(deserializer)? {
        RawDuration::Unsigned(ms) => ms,
        RawDuration::Signed(ms) => u64::try_from(ms).unwrap_or(0),
        RawDuration::Float(ms) if ms.is_finite() && ms > 0.0 => ms.round() as u64,
        RawDuration::Float(_) => 0,
    })
}

/// The persisted document: date key -> records in insertion order
pub type HistoryMap = BTreeMap<String, Vec<HistoryRecord>>;

/// Key under which records completed on `date` are grouped
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a date key in either the current or the legacy format
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(key, LEGACY_DATE_KEY_FORMAT))
        .ok()
}

/// Date keys most recent first
///
/// Keys that parse as dates are ordered by calendar date; anything else
/// sorts after them, in reverse lexicographic order.
pub fn sorted_dates(history: &HistoryMap) -> Vec<String> {
    let mut keys: Vec<(Option<NaiveDate>, &String)> = history
        .keys()
        .map(|key| (parse_date_key(key), key))
        .collect();
    keys.sort_by(|a, b| match (a.0, b.0) {
        (Some(da), Some(db)) => db.cmp(&da).then_with(|| b.1.cmp(a.1)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.1.cmp(a.1),
    });
    keys.into_iter().map(|(_, key)| key.clone()).collect()
}
