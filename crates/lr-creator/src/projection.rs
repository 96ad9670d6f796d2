//! Live projection
//!
//! Pure function from the current form snapshot to a [`NormalizedRecord`].
//! The record is always rebuilt from scratch: fields a kind does not declare
//! are cleared even when the raw form still holds stale values from a
//! previously selected kind.

use crate::config::CreatorConfig;
use crate::error::TaskBodyError;
use crate::form::FormValues;
use crate::kind::{meta_for_kind, ExtraMetadata, ItemKind, TagColor};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Normalized content record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Naming and kind flags
    pub metadata: RecordMetadata,
    /// Content definition
    pub spec: RecordSpec,
}

/// Record metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Record name (placeholder until a slug is derived)
    pub name: String,
    /// Kind-specific flags
    #[serde(flatten)]
    pub extra: ExtraMetadata,
}

/// Kind tag shown on the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    pub text: String,
    pub color: TagColor,
}

/// External link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    pub text: String,
    pub href: String,
}

/// Content definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<RecordType>,
    pub display_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<RecordLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

/// One task of a task-capable record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<TaskReview>,
}

/// "Check your work" section of a task
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_task_help: Option<String>,
}

/// Task body as authored in the form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TaskBody {
    description: Option<String>,
    enable_work_check: bool,
    work_check_instructions: Option<String>,
    work_check_help: Option<String>,
}

impl TaskBody {
    fn into_task(self, title: String) -> Task {
        Task {
            title,
            description: self.description.unwrap_or_default(),
            review: self.enable_work_check.then(|| TaskReview {
                instructions: self.work_check_instructions,
                failed_task_help: self.work_check_help,
            }),
        }
    }
}

/// Projection result with recoverable feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Projected record
    pub record: NormalizedRecord,
    /// Task bodies that failed to parse and were replaced by empty bodies
    pub issues: Vec<TaskBodyError>,
}

impl NormalizedRecord {
    /// Placeholder shown before any kind is selected
    #[must_use]
    pub fn placeholder(base_name: impl Into<String>) -> Self {
        Self {
            metadata: RecordMetadata {
                name: base_name.into(),
                extra: ExtraMetadata::NONE,
            },
            spec: RecordSpec::default(),
        }
    }

    /// Task list, if the record's kind supports tasks
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> Option<&[Task]> {
        self.spec.tasks.as_deref()
    }
}

/// Project with default configuration
#[must_use]
pub fn project(kind: Option<ItemKind>, values: &FormValues) -> NormalizedRecord {
    project_with_feedback(kind, values).record
}

/// Project with default configuration, keeping task body feedback
#[must_use]
pub fn project_with_feedback(kind: Option<ItemKind>, values: &FormValues) -> Projection {
    project_configured(&CreatorConfig::default(), kind, values)
}

/// Project a snapshot into a normalized record
///
/// Total over every `(kind, values)` pair; never fails. Malformed task bodies
/// become empty tasks and are reported in [`Projection::issues`].
#[must_use]
pub fn project_configured(
    config: &CreatorConfig,
    kind: Option<ItemKind>,
    values: &FormValues,
) -> Projection {
    let Some(kind) = kind else {
        return Projection {
            record: NormalizedRecord::placeholder(&config.base_name),
            issues: Vec::new(),
        };
    };

    let meta = meta_for_kind(kind);
    let mut issues = Vec::new();

    let link = values
        .url()
        .filter(|_| meta.fields.url)
        .map(|href| RecordLink {
            text: config.link_text.clone(),
            href: href.to_string(),
        });

    let duration_minutes = values.duration_minutes().filter(|_| meta.fields.duration);

    let (tasks, introduction, prerequisites) = if meta.has_tasks {
        (
            Some(project_tasks(values, &mut issues)),
            values.introduction().map(str::to_string),
            values.prerequisites(),
        )
    } else {
        (None, None, None)
    };

    let record = NormalizedRecord {
        metadata: RecordMetadata {
            name: config.base_name.clone(),
            extra: meta.extra_metadata,
        },
        spec: RecordSpec {
            type_tag: Some(RecordType {
                text: meta.display_name.to_string(),
                color: meta.tag_color,
            }),
            display_name: values.title().unwrap_or_default().to_string(),
            description: values.description().unwrap_or_default().to_string(),
            icon: None,
            link,
            duration_minutes,
            prerequisites,
            introduction,
            tasks,
        },
    };

    tracing::debug!(
        kind = %kind,
        tasks = record.tasks().map_or(0, <[Task]>::len),
        issues = issues.len(),
        "projected record"
    );

    Projection { record, issues }
}

/// Zip task titles with bodies; titles decide the count
fn project_tasks(values: &FormValues, issues: &mut Vec<TaskBodyError>) -> Vec<Task> {
    values
        .task_titles()
        .into_iter()
        .enumerate()
        .map(|(index, title)| {
            let body = match values.task_entry(index).map(|entry| parse_task_body(index, entry)) {
                None => TaskBody::default(),
                Some(Ok(body)) => body,
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "substituting empty task body");
                    issues.push(err);
                    TaskBody::default()
                }
            };
            body.into_task(title)
        })
        .collect()
}

fn parse_task_body(index: usize, entry: &Value) -> Result<TaskBody, TaskBodyError> {
    match entry {
        Value::Object(_) => {
            TaskBody::deserialize(entry).map_err(|e| TaskBodyError::Malformed {
                index,
                message: e.to_string(),
            })
        }
        Value::String(text) if text.trim().is_empty() => Ok(TaskBody::default()),
        Value::String(text) => {
            serde_yaml::from_str(text).map_err(|e| TaskBodyError::Malformed {
                index,
                message: e.to_string(),
            })
        }
        _ => Err(TaskBodyError::UnexpectedShape { index }),
    }
}
