//! Form value snapshots
//!
//! [`FormValues`] is the presentation layer's field-name → value mapping.
//! The creator only ever reads a snapshot; every projection and navigation
//! call receives the current one.

use crate::kind::ItemKind;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Selected content kind
pub const NAME_KIND: &str = "kind";
/// Resource title
pub const NAME_TITLE: &str = "title";
/// Associated bundle ids
pub const NAME_BUNDLES: &str = "bundles";
/// Resource description
pub const NAME_DESCRIPTION: &str = "description";
/// Duration in minutes
pub const NAME_DURATION: &str = "duration";
/// Endpoint URL
pub const NAME_URL: &str = "url";
/// Panel introduction (Markdown)
pub const NAME_PANEL_INTRODUCTION: &str = "panel-overview";
/// Panel prerequisites
pub const NAME_PREREQUISITES: &str = "prerequisites";
/// Task titles; drives the number of task steps
pub const NAME_TASK_TITLES: &str = "task-titles";
/// Task bodies, index-aligned with the titles
pub const NAME_TASKS_ARRAY: &str = "tasks";

/// Task body description
pub const NAME_TASK_DESCRIPTION: &str = "description";
/// Task body work-check toggle
pub const NAME_TASK_ENABLE_WORK_CHECK: &str = "enable_work_check";
/// Task body work-check instructions
pub const NAME_TASK_WORK_CHECK_INSTRUCTIONS: &str = "work_check_instructions";
/// Task body work-check failure message
pub const NAME_TASK_WORK_CHECK_HELP: &str = "work_check_help";

/// Snapshot of form values keyed by field name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, Value>);

impl FormValues {
    /// Empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from YAML text
    ///
    /// # Errors
    /// Returns error if the text is not a YAML mapping
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Parse a snapshot from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a JSON object
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// With a field set, returning the new snapshot
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Remove a field
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Raw value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Field names present in the snapshot
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// String value of a field (non-strings read as absent)
    #[inline]
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Selected kind, if the raw value names a registered kind
    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        self.str_field(NAME_KIND).and_then(|raw| raw.parse().ok())
    }

    /// Resource title
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field(NAME_TITLE)
    }

    /// Resource description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str_field(NAME_DESCRIPTION)
    }

    /// Endpoint URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.str_field(NAME_URL)
    }

    /// Duration in minutes; any JSON number counts, kept as given
    ///
    /// Numeric strings are not accepted: the duration input produces numbers.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<Number> {
        match self.get(NAME_DURATION)? {
            Value::Number(minutes) => Some(minutes.clone()),
            _ => None,
        }
    }

    /// Panel introduction
    #[inline]
    #[must_use]
    pub fn introduction(&self) -> Option<&str> {
        self.str_field(NAME_PANEL_INTRODUCTION)
    }

    /// Panel prerequisites (absent if the field is not an array)
    #[must_use]
    pub fn prerequisites(&self) -> Option<Vec<String>> {
        self.string_array(NAME_PREREQUISITES)
    }

    /// Selected bundle ids
    #[must_use]
    pub fn bundles(&self) -> Vec<String> {
        self.string_array(NAME_BUNDLES).unwrap_or_default()
    }

    /// Task titles
    ///
    /// Defaults to a single empty title when absent: the panel overview starts
    /// with one task row. This list is the source of truth for the task count.
    #[must_use]
    pub fn task_titles(&self) -> Vec<String> {
        self.string_array(NAME_TASK_TITLES)
            .unwrap_or_else(|| vec![String::new()])
    }

    /// Number of task titles
    #[inline]
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.task_titles().len()
    }

    /// Raw task body at `index`, if present and not null
    #[must_use]
    pub fn task_entry(&self, index: usize) -> Option<&Value> {
        self.get(NAME_TASKS_ARRAY)
            .and_then(Value::as_array)
            .and_then(|entries| entries.get(index))
            .filter(|entry| !entry.is_null())
    }

    /// Replace the task titles
    pub fn set_task_titles(&mut self, titles: Vec<String>) {
        self.set(NAME_TASK_TITLES, titles);
    }

    fn string_array(&self, name: &str) -> Option<Vec<String>> {
        let items = self.get(name)?.as_array()?;
        Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

impl FromIterator<(String, Value)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_requires_registered_key() {
        let values = FormValues::new().with(NAME_KIND, "quickstart");
        assert_eq!(values.kind(), Some(ItemKind::Quickstart));

        let values = FormValues::new().with(NAME_KIND, "video");
        assert_eq!(values.kind(), None);

        let values = FormValues::new().with(NAME_KIND, 3);
        assert_eq!(values.kind(), None);
    }

    #[test]
    fn task_titles_default_to_one_empty_row() {
        assert_eq!(FormValues::new().task_titles(), vec![String::new()]);
        assert_eq!(FormValues::new().task_count(), 1);
    }

    #[test]
    fn task_titles_read_array() {
        let values = FormValues::new().with(NAME_TASK_TITLES, json!(["Setup", "Run"]));
        assert_eq!(values.task_titles(), vec!["Setup", "Run"]);
        assert_eq!(values.task_count(), 2);
    }

    #[test]
    fn duration_must_be_numeric() {
        let values = FormValues::new().with(NAME_DURATION, 15);
        assert_eq!(values.duration_minutes(), Some(Number::from(15)));

        let values = FormValues::new().with(NAME_DURATION, "15");
        assert_eq!(values.duration_minutes(), None);

        let values = FormValues::new().with(NAME_DURATION, json!(null));
        assert_eq!(values.duration_minutes(), None);
    }

    #[test]
    fn duration_keeps_float_input() {
        let values = FormValues::from_json_str(r#"{"duration": 15.0}"#).unwrap();
        assert_eq!(values.duration_minutes().and_then(|n| n.as_f64()), Some(15.0));

        let values = FormValues::from_yaml_str("duration: 7.5\n").unwrap();
        assert_eq!(values.duration_minutes().and_then(|n| n.as_f64()), Some(7.5));
    }

    #[test]
    fn task_entry_skips_null_and_missing() {
        let values = FormValues::new().with(
            NAME_TASKS_ARRAY,
            json!([null, { "description": "body" }]),
        );
        assert!(values.task_entry(0).is_none());
        assert!(values.task_entry(1).is_some());
        assert!(values.task_entry(2).is_none());
    }

    #[test]
    fn from_yaml_snapshot() {
        let values = FormValues::from_yaml_str(
            "kind: documentation\ntitle: Docs\nurl: https://example.com\nbundles: [rhel, openshift]\n",
        )
        .unwrap();
        assert_eq!(values.kind(), Some(ItemKind::Documentation));
        assert_eq!(values.url(), Some("https://example.com"));
        assert_eq!(values.bundles(), vec!["rhel", "openshift"]);
    }

    #[test]
    fn from_yaml_rejects_non_mapping() {
        assert!(FormValues::from_yaml_str("- a\n- b\n").is_err());
    }
}
