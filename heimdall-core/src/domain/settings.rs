//! User display preferences

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::interval::IntervalValue;

pub const REFRESH_INTERVAL: &str = "refreshInterval";
pub const DISPLAY_MODE: &str = "displayMode";
pub const SHOW_JOB_PARALLELISM: &str = "showJobParallelism";
pub const SHOW_JOB_FLINK_VERSION: &str = "showJobFlinkVersion";
pub const SHOW_JOB_IMAGE: &str = "showJobImage";
pub const PAGE_SIZE: &str = "pageSize";
pub const CURRENT_PAGE: &str = "currentPage";

/// Preference document: preference name to value
///
/// No schema is enforced. Keys other than the documented ones are kept as
/// they are, and values are never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// An empty document
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// The documented defaults
    pub fn defaults() -> Self {
        let mut map = Map::new();
        map.insert(REFRESH_INTERVAL.into(), json!("30"));
        map.insert(DISPLAY_MODE.into(), json!("tabular"));
        map.insert(SHOW_JOB_PARALLELISM.into(), json!(true));
        map.insert(SHOW_JOB_FLINK_VERSION.into(), json!(true));
        map.insert(SHOW_JOB_IMAGE.into(), json!(true));
        map.insert(PAGE_SIZE.into(), json!(20));
        map.insert(CURRENT_PAGE.into(), json!(1));
        Self(map)
    }

    /// Fills in every default key missing from this document
    pub fn merged_over_defaults(self) -> Self {
        let mut merged = Self::defaults().0;
        merged.extend(self.0);
        Self(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a single preference, returning the updated document
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // =============================================================================
    // Typed readers
    // =============================================================================

    /// The `refreshInterval` preference, ready to hand to the job poller
    pub fn refresh_interval(&self) -> IntervalValue {
        self.get(REFRESH_INTERVAL)
            .map_or(IntervalValue::Invalid, IntervalValue::from)
    }

    pub fn display_mode(&self) -> Option<&str> {
        self.get(DISPLAY_MODE)?.as_str()
    }

    pub fn page_size(&self) -> Option<u64> {
        as_count(self.get(PAGE_SIZE)?)
    }

    pub fn current_page(&self) -> Option<u64> {
        as_count(self.get(CURRENT_PAGE)?)
    }

    /// Reads a boolean toggle such as `showJobImage`
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Numbers may have been stored as strings by a lenient UI
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults();
        assert_eq!(settings.len(), 7);
        assert_eq!(settings.get(REFRESH_INTERVAL), Some(&json!("30")));
        assert_eq!(settings.display_mode(), Some("tabular"));
        assert_eq!(settings.flag(SHOW_JOB_PARALLELISM), Some(true));
        assert_eq!(settings.flag(SHOW_JOB_FLINK_VERSION), Some(true));
        assert_eq!(settings.flag(SHOW_JOB_IMAGE), Some(true));
        assert_eq!(settings.page_size(), Some(20));
        assert_eq!(settings.current_page(), Some(1));
        assert_eq!(settings.refresh_interval().seconds(), Some(30));
    }

    #[test]
    fn test_merge_keeps_stored_and_unknown_keys() {
        let stored = Settings::empty()
            .with(REFRESH_INTERVAL, "120")
            .with("legacyFlag", "kept");

        let merged = stored.merged_over_defaults();
        assert_eq!(merged.get(REFRESH_INTERVAL), Some(&json!("120")));
        assert_eq!(merged.get("legacyFlag"), Some(&json!("kept")));
        assert_eq!(merged.page_size(), Some(20));
        assert_eq!(merged.len(), 8);
    }

    #[test]
    fn test_no_validation() {
        let settings = Settings::defaults()
            .with(PAGE_SIZE, "not a number")
            .with(DISPLAY_MODE, 7);
        assert_eq!(settings.page_size(), None);
        assert_eq!(settings.display_mode(), None);
        assert_eq!(settings.get(DISPLAY_MODE), Some(&json!(7)));
    }

    #[test]
    fn test_round_trips_as_plain_object() {
        let text = r#"{"currentPage":3,"displayMode":"cards","extra":[1]}"#;
        let settings: Settings = serde_json::from_str(text).unwrap();
        assert_eq!(settings.current_page(), Some(3));
        assert_eq!(serde_json::to_string(&settings).unwrap(), text);
    }
}
