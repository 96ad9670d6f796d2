//! LR Creator - learning resource authoring wizard
//!
//! The headless core of a step-by-step wizard that produces catalog-ready
//! learning resource definitions:
//! - Registers the supported kinds and their field/tag metadata
//! - Encodes wizard stages as step identifiers and decodes them back
//! - Builds the step graph with kind- and task-dependent navigation
//! - Projects raw form values into a normalized record for live preview
//! - Generates the downloadable YAML artifacts
//!
//! # Example
//!
//! ```rust
//! use lr_creator::prelude::*;
//!
//! let mut session = CreatorSession::new(CreatorConfig::new());
//! session.update_values(|values| {
//!     values.set("kind", "documentation");
//!     values.set("title", "Read The Docs");
//!     values.set("url", "https://docs.example.com");
//! });
//! session.advance()?;
//! assert_eq!(session.current_stage(), WizardStage::Card);
//!
//! let [index, record] = session.files()?;
//! assert_eq!(index.name, "metadata.yaml");
//! assert_eq!(record.name, "read-the-docs.yaml");
//! # Ok::<(), lr_creator::CreatorError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod form;
pub mod graph;
pub mod kind;
pub mod preview;
pub mod projection;
pub mod session;
pub mod stage;

// Re-exports for convenience
pub use artifact::{
    generate_artifacts, generate_artifacts_with, slugify, Artifact, CategoryTags, TagEntry,
};
pub use config::{BundleOption, CreatorConfig, MAX_TASKS};
pub use error::{
    ArtifactError, ConfigError, CreatorError, NavigationError, SessionError, StageError,
    TaskBodyError,
};
pub use form::FormValues;
pub use graph::{
    FieldComponent, FieldOption, FieldSpec, NavigationInput, NextLabel, NextStep,
    StepDefinition, StepGraph,
};
pub use kind::{
    all_kind_entries, is_item_kind, meta_for_kind, ExtraMetadata, ItemKind, KindFields,
    KindMeta, TagColor, UnknownKind, ALL_ITEM_KINDS,
};
pub use preview::{preview_mode, PreviewMode};
pub use projection::{
    project, project_configured, project_with_feedback, NormalizedRecord, Projection,
    RecordLink, RecordMetadata, RecordSpec, RecordType, Task, TaskReview,
};
pub use session::CreatorSession;
pub use stage::{
    details_step_id, download_step_id, kind_step_id, panel_overview_step_id,
    stage_from_step_id, task_index_from_step_id, task_step_id, try_stage_from_step_id, StepId,
    WizardStage,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the creator
    pub use crate::{
        generate_artifacts, project, stage_from_step_id, Artifact, CategoryTags,
        CreatorConfig, CreatorError, CreatorSession, FormValues, ItemKind, NavigationInput,
        NormalizedRecord, StepGraph, StepId, WizardStage,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
