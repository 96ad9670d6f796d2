//! Step graph builder
//!
//! Builds the full set of wizard steps and their next-step rules:
//!
//! ```text
//! step-kind ──ByKind──▶ step-details-<kind> ──▶ step-panel-overview-<kind> ──▶ step-task-detail-0
//!                                │                                               │ TaskContinuation
//!                                └──────────(no tasks)──────────▶ step-download ◀┴── ... step-task-detail-N
//! ```
//!
//! Construction is independent of user data and never fails. Only resolving
//! a rule against live values can hit an inconsistent state, and that state
//! is passed in explicitly as a [`NavigationInput`] on every call.

use crate::config::{CreatorConfig, MAX_TASKS};
use crate::error::NavigationError;
use crate::form::{
    FormValues, NAME_BUNDLES, NAME_DESCRIPTION, NAME_DURATION, NAME_KIND,
    NAME_PANEL_INTRODUCTION, NAME_PREREQUISITES, NAME_TASKS_ARRAY, NAME_TASK_DESCRIPTION,
    NAME_TASK_ENABLE_WORK_CHECK, NAME_TASK_TITLES, NAME_TASK_WORK_CHECK_HELP,
    NAME_TASK_WORK_CHECK_INSTRUCTIONS, NAME_TITLE, NAME_URL,
};
use crate::kind::{all_kind_entries, meta_for_kind, ItemKind, ALL_ITEM_KINDS};
use crate::stage::{
    details_step_id, download_step_id, kind_step_id, panel_overview_step_id, task_step_id,
    StepId,
};
use std::collections::HashMap;

/// Form field holding the selected category tags
pub const NAME_TAGS: &str = "tags";

/// Parent title grouping the panel-overview and task steps
pub const PANEL_STEP_TITLE: &str = "Create panel";

/// Rendering component of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldComponent {
    /// Static text, no value
    PlainText,
    /// Single choice from options
    Radio,
    /// Multi-choice dropdown
    Select,
    /// Single-line text
    TextField,
    /// Multi-line text
    TextArea,
    /// Numeric input
    NumberInput,
    /// Boolean toggle
    Checkbox,
    /// Growable list of text rows
    FieldArray,
    /// Category tag picker
    TagsSelector,
    /// Artifact download widget
    DownloadFiles,
}

/// Selectable option of a radio or select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One field rendered by a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form value name (dotted/indexed for task bodies)
    pub name: String,
    /// Label or static text
    pub label: String,
    /// Rendering component
    pub component: FieldComponent,
    /// Whether a value is required to advance
    pub required: bool,
    /// Options for radio/select fields
    pub options: Vec<FieldOption>,
    /// Boolean field that must be set for this field to show
    pub visible_when: Option<String>,
    /// Item limit for array fields
    pub max_items: Option<usize>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, label: impl Into<String>, component: FieldComponent) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            component,
            required: false,
            options: Vec::new(),
            visible_when: None,
            max_items: None,
        }
    }

    fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldComponent::PlainText)
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    fn visible_when(mut self, name: impl Into<String>) -> Self {
        self.visible_when = Some(name.into());
        self
    }

    fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}

/// Live navigation state read by next-step rules
///
/// Always built from the current snapshot; never cache it across edits, the
/// task count is editable mid-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationInput {
    /// Currently selected kind
    pub kind: Option<ItemKind>,
    /// Current number of task titles
    pub task_count: usize,
}

impl NavigationInput {
    /// Create navigation input
    #[inline]
    #[must_use]
    pub fn new(kind: Option<ItemKind>, task_count: usize) -> Self {
        Self { kind, task_count }
    }

    /// Read the current kind and task count from a snapshot
    #[must_use]
    pub fn from_values(values: &FormValues) -> Self {
        Self::new(values.kind(), values.task_count())
    }
}

/// Next-step rule of a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Always the same following step
    Static(StepId),
    /// Details step of the selected kind; unavailable until a kind is chosen
    ByKind,
    /// Next task step while titles remain, else the download step
    TaskContinuation { index: usize },
    /// No following step
    Terminal,
}

impl NextStep {
    /// Resolve against live navigation state
    ///
    /// Returns `Ok(None)` when no next step is available.
    ///
    /// # Errors
    /// Returns error if the task count exceeds [`MAX_TASKS`] or the task
    /// index has no matching title
    pub fn resolve(&self, input: &NavigationInput) -> Result<Option<StepId>, NavigationError> {
        match self {
            Self::Static(id) => Ok(Some(id.clone())),
            Self::ByKind => Ok(input.kind.map(details_step_id)),
            Self::TaskContinuation { index } => {
                let index = *index;
                if input.task_count > MAX_TASKS {
                    return Err(NavigationError::TooManyTasks {
                        count: input.task_count,
                        max: MAX_TASKS,
                    });
                }
                if index >= input.task_count {
                    return Err(NavigationError::TaskCountMismatch {
                        index,
                        task_count: input.task_count,
                    });
                }
                if index + 1 < input.task_count {
                    Ok(Some(task_step_id(index + 1)))
                } else {
                    Ok(Some(download_step_id()))
                }
            }
            Self::Terminal => Ok(None),
        }
    }
}

/// Label of the next button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLabel {
    /// Fixed text
    Fixed(String),
    /// Depends on whether another task follows
    TaskContinuation { index: usize },
    /// No next button
    Hidden,
}

impl NextLabel {
    /// Resolve against live navigation state
    #[must_use]
    pub fn resolve(&self, input: &NavigationInput) -> Option<String> {
        match self {
            Self::Fixed(text) => Some(text.clone()),
            Self::TaskContinuation { index } if index + 1 < input.task_count => {
                Some(format!("Create task {} content", index + 2))
            }
            Self::TaskContinuation { .. } => Some("Approve and generate files".to_string()),
            Self::Hidden => None,
        }
    }
}

/// One node of the step graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    /// Unique identifier
    pub id: StepId,
    /// Human title
    pub title: String,
    /// Parent group title, if nested
    pub substep_of: Option<String>,
    /// Fields to render
    pub fields: Vec<FieldSpec>,
    /// Next-step rule
    pub next: NextStep,
    /// Next button label
    pub next_label: NextLabel,
}

/// Complete step graph for one wizard run
#[derive(Debug, Clone)]
pub struct StepGraph {
    steps: Vec<StepDefinition>,
    positions: HashMap<StepId, usize>,
}

impl StepGraph {
    /// Build the graph
    ///
    /// Order: kind selection; one details step per kind; one panel-overview
    /// step per task-capable kind; [`MAX_TASKS`] task steps; download.
    #[must_use]
    pub fn build(config: &CreatorConfig) -> Self {
        let mut steps = Vec::with_capacity(ALL_ITEM_KINDS.len() * 2 + MAX_TASKS + 2);

        steps.push(make_kind_step());
        steps.extend(ALL_ITEM_KINDS.map(|kind| make_details_step(kind, config)));
        steps.extend(
            ALL_ITEM_KINDS
                .into_iter()
                .filter(|kind| meta_for_kind(*kind).has_tasks)
                .map(make_panel_overview_step),
        );
        steps.extend((0..MAX_TASKS).map(make_task_step));
        steps.push(make_download_step());

        let positions = steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.id.clone(), i))
            .collect();

        tracing::debug!(steps = steps.len(), "built step graph");

        Self { steps, positions }
    }

    /// All steps in construction order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a graph has at least the kind and download steps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StepDefinition> {
        self.positions.get(id).map(|&i| &self.steps[i])
    }

    /// Whether the identifier names a step in this graph
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Kind-selection step
    #[inline]
    #[must_use]
    pub fn first(&self) -> &StepDefinition {
        &self.steps[0]
    }

    /// Resolve the step following `current`
    ///
    /// # Errors
    /// Returns error if `current` is not in the graph or its rule meets an
    /// inconsistent task count
    pub fn next_step(
        &self,
        current: &StepId,
        input: &NavigationInput,
    ) -> Result<Option<StepId>, NavigationError> {
        let step = self
            .get(current.as_str())
            .ok_or_else(|| NavigationError::UnknownStep(current.clone()))?;
        let next = step.next.resolve(input)?;
        tracing::trace!(from = %current, to = ?next.as_ref().map(StepId::as_str), "resolved next step");
        Ok(next)
    }

    /// Next button label of `current`
    ///
    /// # Errors
    /// Returns error if `current` is not in the graph
    pub fn next_label(
        &self,
        current: &StepId,
        input: &NavigationInput,
    ) -> Result<Option<String>, NavigationError> {
        self.get(current.as_str())
            .map(|step| step.next_label.resolve(input))
            .ok_or_else(|| NavigationError::UnknownStep(current.clone()))
    }

    /// Walk from the kind step to the download step
    ///
    /// # Errors
    /// Returns error if a rule fails to resolve, or the walk stops before
    /// the download step (no kind selected)
    pub fn path(&self, input: &NavigationInput) -> Result<Vec<StepId>, NavigationError> {
        let download = download_step_id();
        let mut current = self.first().id.clone();
        let mut path = Vec::new();

        // Acyclic by construction; the bound only guards against a broken rule.
        for _ in 0..self.steps.len() {
            path.push(current.clone());
            if current == download {
                return Ok(path);
            }
            match self.next_step(&current, input)? {
                Some(next) => current = next,
                None => return Err(NavigationError::Incomplete(current)),
            }
        }

        Err(NavigationError::Incomplete(current))
    }
}

fn make_kind_step() -> StepDefinition {
    let options = all_kind_entries()
        .map(|(kind, meta)| FieldOption::new(kind.as_str(), meta.display_name))
        .collect();

    StepDefinition {
        id: kind_step_id(),
        title: "Select content type".to_string(),
        substep_of: None,
        fields: vec![
            FieldSpec::text(
                "internal-text-kind-description",
                "Learning resources are grouped by their 'content type'.",
            ),
            FieldSpec::new(NAME_KIND, "Select content type", FieldComponent::Radio)
                .required()
                .with_options(options),
        ],
        next: NextStep::ByKind,
        next_label: NextLabel::Fixed("Next".to_string()),
    }
}

fn make_details_step(kind: ItemKind, config: &CreatorConfig) -> StepDefinition {
    let meta = meta_for_kind(kind);

    let bundle_options = config
        .bundles
        .iter()
        .map(|bundle| FieldOption::new(&bundle.id, bundle.label()))
        .collect();
    let tag_options = config
        .tag_categories
        .iter()
        .map(|category| FieldOption::new(category, category))
        .collect();

    let mut fields = vec![
        FieldSpec::text(
            "internal-text-details-description",
            "Share the details required to populate a card in the correct places.",
        ),
        FieldSpec::new(NAME_BUNDLES, "Associated bundle(s)", FieldComponent::Select)
            .required()
            .with_options(bundle_options),
        FieldSpec::new(NAME_TAGS, "Tags", FieldComponent::TagsSelector).with_options(tag_options),
        FieldSpec::new(NAME_TITLE, "Resource title", FieldComponent::TextField).required(),
        FieldSpec::new(NAME_DESCRIPTION, "Resource description", FieldComponent::TextArea)
            .required(),
    ];

    if meta.fields.duration {
        fields.push(
            FieldSpec::new(NAME_DURATION, "Duration", FieldComponent::NumberInput).required(),
        );
    }

    if meta.fields.url {
        fields.push(FieldSpec::new(NAME_URL, "Endpoint URL", FieldComponent::TextField).required());
    }

    let (next, label) = if meta.has_tasks {
        (
            panel_overview_step_id(kind),
            format!("Approve card and create {} panel", meta.display_name),
        )
    } else {
        (
            download_step_id(),
            "Approve card and generate files".to_string(),
        )
    };

    StepDefinition {
        id: details_step_id(kind),
        title: format!("{} details", meta.display_name),
        substep_of: None,
        fields,
        next: NextStep::Static(next),
        next_label: NextLabel::Fixed(label),
    }
}

fn make_panel_overview_step(kind: ItemKind) -> StepDefinition {
    let meta = meta_for_kind(kind);

    StepDefinition {
        id: panel_overview_step_id(kind),
        title: "Create overview".to_string(),
        substep_of: Some(PANEL_STEP_TITLE.to_string()),
        fields: vec![
            FieldSpec::text(
                "internal-text-overview-instructions",
                format!(
                    "Share the required details to show on the introduction (first view) in the {}. \
                     Details that you entered in the previous steps have been brought in automatically.",
                    meta.display_name
                ),
            ),
            FieldSpec::text(
                "internal-text-overview-header",
                format!("{} overview", meta.display_name),
            ),
            FieldSpec::new(
                NAME_PANEL_INTRODUCTION,
                "Introduction (Markdown)",
                FieldComponent::TextArea,
            ),
            FieldSpec::new(NAME_PREREQUISITES, "Prerequisites", FieldComponent::FieldArray),
            FieldSpec::new(NAME_TASK_TITLES, "Tasks", FieldComponent::FieldArray)
                .max_items(MAX_TASKS),
        ],
        next: NextStep::Static(task_step_id(0)),
        next_label: NextLabel::Fixed("Create task 1 content".to_string()),
    }
}

fn make_task_step(index: usize) -> StepDefinition {
    let task = format!("{NAME_TASKS_ARRAY}[{index}]");
    let work_check = format!("{task}.{NAME_TASK_ENABLE_WORK_CHECK}");

    StepDefinition {
        id: task_step_id(index),
        title: format!("Task {}", index + 1),
        substep_of: Some(PANEL_STEP_TITLE.to_string()),
        fields: vec![
            FieldSpec::text(
                "internal-text-task-step-description",
                "Add the content for this step of the panel.",
            ),
            FieldSpec::new(
                format!("{task}.{NAME_TASK_DESCRIPTION}"),
                "Description",
                FieldComponent::TextArea,
            ),
            FieldSpec::new(
                work_check.clone(),
                "Show 'Work check' section",
                FieldComponent::Checkbox,
            ),
            FieldSpec::new(
                format!("{task}.{NAME_TASK_WORK_CHECK_INSTRUCTIONS}"),
                "Work check instructions",
                FieldComponent::TextArea,
            )
            .visible_when(work_check.clone()),
            FieldSpec::new(
                format!("{task}.{NAME_TASK_WORK_CHECK_HELP}"),
                "Optional failure message",
                FieldComponent::TextField,
            )
            .visible_when(work_check),
        ],
        next: NextStep::TaskContinuation { index },
        next_label: NextLabel::TaskContinuation { index },
    }
}

fn make_download_step() -> StepDefinition {
    StepDefinition {
        id: download_step_id(),
        title: "Download files".to_string(),
        substep_of: None,
        fields: vec![FieldSpec::new(
            "internal-download",
            "Download files",
            FieldComponent::DownloadFiles,
        )],
        next: NextStep::Terminal,
        next_label: NextLabel::Hidden,
    }
}
