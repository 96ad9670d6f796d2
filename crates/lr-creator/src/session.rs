//! Wizard session
//!
//! [`CreatorSession`] is the explicit state container owned by the host: the
//! current form snapshot, selected tags, and the current step. Everything
//! else (stage, record, artifacts, preview) is derived on demand from that
//! state and never stored.

use crate::artifact::{generate_artifacts_with, Artifact, CategoryTags};
use crate::config::{CreatorConfig, MAX_TASKS};
use crate::error::{ArtifactError, NavigationError, SessionError};
use crate::form::{FormValues, NAME_TASKS_ARRAY};
use crate::graph::{NavigationInput, StepGraph};
use crate::kind::{meta_for_kind, ItemKind};
use crate::preview::{preview_mode, PreviewMode};
use crate::projection::{project_configured, NormalizedRecord, Projection};
use crate::stage::{stage_from_step_id, task_step_id, StepId, WizardStage};
use serde_json::Value;

/// State of one authoring run
#[derive(Debug, Clone)]
pub struct CreatorSession {
    config: CreatorConfig,
    graph: StepGraph,
    values: FormValues,
    tags: CategoryTags,
    current: StepId,
    history: Vec<StepId>,
}

impl CreatorSession {
    /// Start a session on the kind-selection step
    #[must_use]
    pub fn new(config: CreatorConfig) -> Self {
        let graph = StepGraph::build(&config);
        let current = graph.first().id.clone();
        Self {
            config,
            graph,
            values: FormValues::new(),
            tags: CategoryTags::new(),
            current,
            history: Vec::new(),
        }
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CreatorConfig {
        &self.config
    }

    /// Step graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    /// Current form snapshot
    #[inline]
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Replace the form snapshot
    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
    }

    /// Edit the form snapshot in place
    pub fn update_values(&mut self, f: impl FnOnce(&mut FormValues)) {
        f(&mut self.values);
    }

    /// Selected free-form tags
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &CategoryTags {
        &self.tags
    }

    /// Select or deselect a free-form tag
    pub fn toggle_tag(&mut self, category: &str, value: &str) -> bool {
        self.tags.toggle(category, value)
    }

    /// Tags for the index artifact; bundles come from the form
    #[must_use]
    pub fn category_tags(&self) -> CategoryTags {
        self.tags.clone().with_bundles(self.values.bundles())
    }

    /// Current step identifier
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> &StepId {
        &self.current
    }

    /// Current stage, decoded from the current step
    #[must_use]
    pub fn current_stage(&self) -> WizardStage {
        stage_from_step_id(self.current.as_str())
    }

    /// Selected kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        self.values.kind()
    }

    /// Navigation state read from the current snapshot
    #[inline]
    #[must_use]
    pub fn navigation(&self) -> NavigationInput {
        NavigationInput::from_values(&self.values)
    }

    /// Project the current snapshot
    #[must_use]
    pub fn projection(&self) -> Projection {
        project_configured(&self.config, self.kind(), &self.values)
    }

    /// Normalized record of the current snapshot
    #[must_use]
    pub fn record(&self) -> NormalizedRecord {
        self.projection().record
    }

    /// Downloadable artifacts of the current snapshot
    ///
    /// # Errors
    /// Returns error if YAML serialization fails
    pub fn files(&self) -> Result<[Artifact; 2], ArtifactError> {
        generate_artifacts_with(&self.config, &self.record(), &self.category_tags())
    }

    /// Preview mode for the current stage
    #[must_use]
    pub fn preview(&self) -> PreviewMode {
        preview_mode(self.kind().map(meta_for_kind), self.current_stage())
    }

    /// Next button label of the current step
    ///
    /// # Errors
    /// Returns error if the current step is not in the graph
    pub fn next_label(&self) -> Result<Option<String>, NavigationError> {
        self.graph.next_label(&self.current, &self.navigation())
    }

    /// Move to the next step
    ///
    /// # Errors
    /// Returns error if no next step is available or navigation meets an
    /// inconsistent task count
    pub fn advance(&mut self) -> Result<&StepId, SessionError> {
        let next = self
            .graph
            .next_step(&self.current, &self.navigation())?
            .ok_or_else(|| SessionError::NoNextStep(self.current.clone()))?;

        tracing::info!(from = %self.current, to = %next, "advancing wizard");
        self.history.push(std::mem::replace(&mut self.current, next));
        Ok(&self.current)
    }

    /// Return to the previous step
    ///
    /// Returns `None` on the first step.
    pub fn back(&mut self) -> Option<&StepId> {
        let previous = self.history.pop()?;
        tracing::info!(from = %self.current, to = %previous, "going back");
        self.current = previous;
        Some(&self.current)
    }

    /// Append a task title
    ///
    /// Returns the new task's index.
    ///
    /// # Errors
    /// Returns error if the task list is already at [`MAX_TASKS`]
    pub fn add_task(&mut self, title: impl Into<String>) -> Result<usize, SessionError> {
        let mut titles = self.values.task_titles();
        if titles.len() >= MAX_TASKS {
            tracing::warn!(max = MAX_TASKS, "rejected task beyond maximum");
            return Err(SessionError::TaskLimit { max: MAX_TASKS });
        }
        titles.push(title.into());
        let index = titles.len() - 1;
        self.values.set_task_titles(titles);
        Ok(index)
    }

    /// Remove a task title and its body
    ///
    /// If the current step is a task step that no longer exists, the session
    /// moves to the last remaining task step.
    ///
    /// # Errors
    /// Returns error if `index` is out of range or it is the only task
    pub fn remove_task(&mut self, index: usize) -> Result<String, SessionError> {
        let mut titles = self.values.task_titles();
        if index >= titles.len() {
            return Err(SessionError::NoSuchTask {
                index,
                task_count: titles.len(),
            });
        }
        if titles.len() == 1 {
            return Err(SessionError::LastTask);
        }

        let removed = titles.remove(index);
        let remaining = titles.len();
        self.values.set_task_titles(titles);

        match self.values.remove(NAME_TASKS_ARRAY) {
            Some(Value::Array(mut bodies)) => {
                if index < bodies.len() {
                    bodies.remove(index);
                }
                self.values.set(NAME_TASKS_ARRAY, Value::Array(bodies));
            }
            Some(other) => self.values.set(NAME_TASKS_ARRAY, other),
            None => {}
        }

        if let WizardStage::Task { index: current } = self.current_stage() {
            if current >= remaining {
                self.current = task_step_id(remaining - 1);
                if let Some(pos) = self.history.iter().position(|id| *id == self.current) {
                    self.history.truncate(pos);
                }
            }
        }
        self.history.retain(|id| {
            !matches!(stage_from_step_id(id.as_str()), WizardStage::Task { index } if index >= remaining)
        });

        Ok(removed)
    }

    /// Discard all input and return to the first step
    pub fn reset(&mut self) {
        tracing::info!("resetting creator session");
        self.values = FormValues::new();
        self.tags = CategoryTags::new();
        self.current = self.graph.first().id.clone();
        self.history.clear();
    }
}

impl Default for CreatorSession {
    fn default() -> Self {
        Self::new(CreatorConfig::default())
    }
}
