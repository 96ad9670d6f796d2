//! Step identifiers and wizard stages
//!
//! Provides [`StepId`] for naming nodes of the step graph and
//! [`WizardStage`] for the decoded author position.
//!
//! The stage is never stored on its own: it is always decoded from the
//! current step identifier, so the preview cannot drift from the wizard.

use crate::error::StageError;
use crate::kind::ItemKind;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

const STEP_KIND: &str = "step-kind";
const STEP_DOWNLOAD: &str = "step-download";
const DETAILS_STEP_PREFIX: &str = "step-details-";
const PANEL_OVERVIEW_STEP_PREFIX: &str = "step-panel-overview-";
const TASK_STEP_PREFIX: &str = "step-task-detail-";

/// Opaque identifier of one step in the graph
///
/// # Examples
/// - `step-kind`
/// - `step-details-quickstart`
/// - `step-task-detail-2`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Wrap a raw identifier (not validated)
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into a stage
    ///
    /// # Errors
    /// Returns error if the identifier was not produced by the graph builder
    #[inline]
    pub fn stage(&self) -> Result<WizardStage, StageError> {
        try_stage_from_step_id(&self.0)
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StepId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StepId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Decoded wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WizardStage {
    /// Selecting a kind or editing card details
    Card,
    /// Editing the panel introduction, prerequisites and task titles
    PanelOverview,
    /// Editing one task body
    Task { index: usize },
    /// Terminal: artifacts ready
    Download,
}

impl WizardStage {
    /// Task index if this is a task stage
    #[inline]
    #[must_use]
    pub fn task_index(self) -> Option<usize> {
        match self {
            Self::Task { index } => Some(index),
            _ => None,
        }
    }
}

/// Identifier of the kind-selection step
#[inline]
#[must_use]
pub fn kind_step_id() -> StepId {
    StepId::from(STEP_KIND)
}

/// Identifier of the details step for a kind
#[inline]
#[must_use]
pub fn details_step_id(kind: ItemKind) -> StepId {
    StepId(format!("{DETAILS_STEP_PREFIX}{kind}"))
}

/// Identifier of the panel-overview step for a kind
#[inline]
#[must_use]
pub fn panel_overview_step_id(kind: ItemKind) -> StepId {
    StepId(format!("{PANEL_OVERVIEW_STEP_PREFIX}{kind}"))
}

/// Identifier of the task step at `index`
#[inline]
#[must_use]
pub fn task_step_id(index: usize) -> StepId {
    StepId(format!("{TASK_STEP_PREFIX}{index}"))
}

/// Identifier of the terminal download step
#[inline]
#[must_use]
pub fn download_step_id() -> StepId {
    StepId::from(STEP_DOWNLOAD)
}

/// Inverse of [`task_step_id`]
///
/// Returns `None` for identifiers that are not task steps. The suffix must be
/// a plain decimal index without leading zeros; `step-task-detail-1x` and
/// `step-task-detail-01` are not task steps.
#[must_use]
pub fn task_index_from_step_id(id: &str) -> Option<usize> {
    let suffix = id.strip_prefix(TASK_STEP_PREFIX)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only the canonical form produced by `task_step_id`
    if suffix.len() > 1 && suffix.starts_with('0') {
        return None;
    }
    suffix.parse().ok()
}

/// Classify a step identifier into a stage
///
/// # Errors
/// Returns error if the identifier matches no known prefix, or a known prefix
/// with an unparseable suffix
pub fn try_stage_from_step_id(id: &str) -> Result<WizardStage, StageError> {
    if id == STEP_KIND {
        return Ok(WizardStage::Card);
    }

    if let Some(kind) = id.strip_prefix(DETAILS_STEP_PREFIX) {
        parse_kind_suffix(id, kind)?;
        return Ok(WizardStage::Card);
    }

    if let Some(kind) = id.strip_prefix(PANEL_OVERVIEW_STEP_PREFIX) {
        parse_kind_suffix(id, kind)?;
        return Ok(WizardStage::PanelOverview);
    }

    if id.starts_with(TASK_STEP_PREFIX) {
        return task_index_from_step_id(id)
            .map(|index| WizardStage::Task { index })
            .ok_or_else(|| StageError::InvalidTaskIndex(id.to_string()));
    }

    if id == STEP_DOWNLOAD {
        return Ok(WizardStage::Download);
    }

    Err(StageError::UnknownStepId(id.to_string()))
}

/// Classify a step identifier produced by the step graph
///
/// # Panics
/// Panics if the identifier was not produced by the graph builder. That can
/// only happen when the builder and this decoder are out of sync.
#[must_use]
pub fn stage_from_step_id(id: &str) -> WizardStage {
    match try_stage_from_step_id(id) {
        Ok(stage) => stage,
        Err(err) => panic!("{err}"),
    }
}

fn parse_kind_suffix(id: &str, suffix: &str) -> Result<ItemKind, StageError> {
    suffix.parse().map_err(|_| StageError::UnknownKind {
        id: id.to_string(),
        kind: suffix.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ALL_ITEM_KINDS;

    #[test]
    fn kind_and_details_steps_are_card_stage() {
        assert_eq!(stage_from_step_id(kind_step_id().as_str()), WizardStage::Card);
        for kind in ALL_ITEM_KINDS {
            assert_eq!(
                stage_from_step_id(details_step_id(kind).as_str()),
                WizardStage::Card
            );
        }
    }

    #[test]
    fn panel_overview_stage() {
        let id = panel_overview_step_id(ItemKind::Quickstart);
        assert_eq!(id.as_str(), "step-panel-overview-quickstart");
        assert_eq!(id.stage(), Ok(WizardStage::PanelOverview));
    }

    #[test]
    fn task_stage_carries_index() {
        let id = task_step_id(7);
        assert_eq!(id.as_str(), "step-task-detail-7");
        assert_eq!(stage_from_step_id(id.as_str()), WizardStage::Task { index: 7 });
        assert_eq!(stage_from_step_id(id.as_str()).task_index(), Some(7));
    }

    #[test]
    fn download_stage() {
        assert_eq!(
            stage_from_step_id(download_step_id().as_str()),
            WizardStage::Download
        );
    }

    #[test]
    fn task_index_none_for_other_steps() {
        assert_eq!(task_index_from_step_id("step-kind"), None);
        assert_eq!(task_index_from_step_id("step-download"), None);
        assert_eq!(task_index_from_step_id("step-task-detail-"), None);
        assert_eq!(task_index_from_step_id("step-task-detail-1x"), None);
        assert_eq!(task_index_from_step_id("step-task-detail--1"), None);
        assert_eq!(task_index_from_step_id("step-task-detail-01"), None);
        assert_eq!(task_index_from_step_id("step-task-detail-00"), None);
        assert_eq!(task_index_from_step_id("step-task-detail-0"), Some(0));
        assert_eq!(task_index_from_step_id("step-task-detail-10"), Some(10));
    }

    #[test]
    fn non_canonical_task_id_is_not_decoded() {
        assert!(matches!(
            try_stage_from_step_id("step-task-detail-01"),
            Err(StageError::InvalidTaskIndex(_))
        ));
    }

    #[test]
    fn unknown_identifier_is_error() {
        assert_eq!(
            try_stage_from_step_id("step-bogus"),
            Err(StageError::UnknownStepId("step-bogus".into()))
        );
        assert!(matches!(
            try_stage_from_step_id("step-task-detail-abc"),
            Err(StageError::InvalidTaskIndex(_))
        ));
        assert!(matches!(
            try_stage_from_step_id("step-details-video"),
            Err(StageError::UnknownKind { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "unable to parse step name")]
    fn stage_from_unknown_identifier_panics() {
        let _ = stage_from_step_id("not-a-step");
    }

    #[test]
    fn stage_serializes_tagged() {
        let json = serde_json::to_string(&WizardStage::Task { index: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"task","index":2}"#);
        let json = serde_json::to_string(&WizardStage::PanelOverview).unwrap();
        assert_eq!(json, r#"{"type":"panel-overview"}"#);
    }
}
