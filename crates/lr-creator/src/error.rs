//! Error types for the creator
//!
//! Provides error handling for:
//! - Step identifier decoding (defects, never user mistakes)
//! - Navigation through the step graph
//! - Free-text task bodies (recoverable, surfaced as feedback)
//! - Artifact serialization
//! - Configuration loading

use crate::stage::StepId;
use std::path::PathBuf;

/// Main creator error type
#[derive(Debug, thiserror::Error)]
pub enum CreatorError {
    /// Step identifier could not be decoded
    #[error("stage error: {0}")]
    Stage(#[from] StageError),

    /// Navigation failed
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),

    /// Artifact generation failed
    #[error("artifact generation failed: {0}")]
    Artifact(#[from] ArtifactError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session operation rejected
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Step identifier decoding errors
///
/// Any of these means the graph builder and the decoder have diverged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    /// Identifier matches no known step prefix
    #[error("unable to parse step name: {0}")]
    UnknownStepId(String),

    /// Task step identifier with a non-numeric index
    #[error("unable to parse task index from step name: {0}")]
    InvalidTaskIndex(String),

    /// Details or panel-overview identifier naming an unregistered kind
    #[error("unknown item kind '{kind}' in step name: {id}")]
    UnknownKind { id: String, kind: String },
}

/// Errors resolving a next-step rule against live form values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Step identifier is not part of the graph
    #[error("step not found in graph: {0}")]
    UnknownStep(StepId),

    /// Current task step lies outside the current task title list
    #[error("task step {index} has no matching title (task count: {task_count})")]
    TaskCountMismatch { index: usize, task_count: usize },

    /// More task titles than the graph has task steps
    #[error("task count {count} exceeds maximum of {max}")]
    TooManyTasks { count: usize, max: usize },

    /// Walking the graph did not reach the download step
    #[error("navigation stopped at {0} before reaching the download step")]
    Incomplete(StepId),
}

/// Free-text task body parse failures
///
/// Recoverable: the projection substitutes an empty task body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskBodyError {
    /// Text is not valid YAML
    #[error("task {index}: malformed task body: {message}")]
    Malformed { index: usize, message: String },

    /// Value is neither a mapping nor text
    #[error("task {index}: task body must be a mapping or YAML text")]
    UnexpectedShape { index: usize },
}

impl TaskBodyError {
    /// Index of the task the error refers to
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Malformed { index, .. } | Self::UnexpectedShape { index } => *index,
        }
    }
}

/// Errors during artifact serialization
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// YAML serialization failed
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ArtifactError {
    /// Create serialization error for an artifact name
    pub fn serialize(name: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Serialize {
            name: name.into(),
            source,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid YAML for the config schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Config parsed but violates an invariant
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from wizard session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Navigation failed
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// No next step is available from the current step
    #[error("no next step available from {0}")]
    NoNextStep(StepId),

    /// Adding another task would exceed the maximum
    #[error("cannot add more than {max} tasks")]
    TaskLimit { max: usize },

    /// Task index out of range
    #[error("no task at index {index} (task count: {task_count})")]
    NoSuchTask { index: usize, task_count: usize },

    /// A record with tasks keeps at least one
    #[error("cannot remove the last task")]
    LastTask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_body_error_index() {
        let malformed = TaskBodyError::Malformed {
            index: 3,
            message: "bad".into(),
        };
        assert_eq!(malformed.index(), 3);
        assert_eq!(TaskBodyError::UnexpectedShape { index: 1 }.index(), 1);
    }

    #[test]
    fn navigation_error_converts_into_creator_error() {
        let err: CreatorError = NavigationError::TooManyTasks { count: 11, max: 10 }.into();
        assert!(matches!(err, CreatorError::Navigation(_)));
        assert!(err.to_string().contains("exceeds maximum"));
    }
}
