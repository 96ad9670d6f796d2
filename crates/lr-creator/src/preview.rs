//! Live preview mode
//!
//! Decides what the preview renders for the current stage: the catalog card,
//! or the task panel when the kind supports tasks and the author is editing
//! the panel.

use crate::kind::KindMeta;
use crate::stage::WizardStage;

/// What the live preview shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// Catalog card
    Card,
    /// Task panel, opened on the introduction (`None`) or on a task
    Panel { task: Option<usize> },
}

impl PreviewMode {
    /// Whether the panel is shown
    #[inline]
    #[must_use]
    pub fn is_panel(self) -> bool {
        matches!(self, Self::Panel { .. })
    }
}

/// Preview mode for a kind and stage
#[must_use]
pub fn preview_mode(meta: Option<&KindMeta>, stage: WizardStage) -> PreviewMode {
    if !meta.is_some_and(|meta| meta.has_tasks) {
        return PreviewMode::Card;
    }
    match stage {
        WizardStage::PanelOverview => PreviewMode::Panel { task: None },
        WizardStage::Task { index } => PreviewMode::Panel { task: Some(index) },
        WizardStage::Card | WizardStage::Download => PreviewMode::Card,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{meta_for_kind, ItemKind};

    #[test]
    fn panel_only_for_task_kinds() {
        let quickstart = meta_for_kind(ItemKind::Quickstart);
        let docs = meta_for_kind(ItemKind::Documentation);

        assert_eq!(
            preview_mode(Some(quickstart), WizardStage::Task { index: 1 }),
            PreviewMode::Panel { task: Some(1) }
        );
        assert_eq!(
            preview_mode(Some(quickstart), WizardStage::PanelOverview),
            PreviewMode::Panel { task: None }
        );
        assert_eq!(
            preview_mode(Some(docs), WizardStage::Task { index: 1 }),
            PreviewMode::Card
        );
        assert_eq!(preview_mode(None, WizardStage::PanelOverview), PreviewMode::Card);
    }

    #[test]
    fn card_and_download_show_card() {
        let quickstart = meta_for_kind(ItemKind::Quickstart);
        assert!(!preview_mode(Some(quickstart), WizardStage::Card).is_panel());
        assert!(!preview_mode(Some(quickstart), WizardStage::Download).is_panel());
    }
}
