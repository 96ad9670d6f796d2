//! Artifact generation
//!
//! Derives the slug name from a record's display name and serializes two
//! independent YAML documents: the catalog index entry and the record itself.
//!
//! Artifacts are regenerated on every change, never patched.

use crate::config::CreatorConfig;
use crate::error::ArtifactError;
use crate::projection::NormalizedRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `kind` of the index document
pub const INDEX_DOCUMENT_KIND: &str = "QuickStarts";

/// Tag kind used for bundle selections
pub const BUNDLE_TAG_KIND: &str = "bundle";

/// Generated downloadable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// File name
    pub name: String,
    /// File content
    pub content: String,
}

impl Artifact {
    /// Create new artifact
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File name without its extension
    #[must_use]
    pub fn file_stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }

    /// File extension, `txt` if the name has none
    #[must_use]
    pub fn extension(&self) -> &str {
        self.name.rsplit_once('.').map_or("txt", |(_, ext)| ext)
    }
}

/// One `{kind, value}` pair of the index document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub kind: String,
    pub value: String,
}

/// Category tags selected for a record
///
/// Bundles are the grouping category and are emitted first, sorted.
/// Free-form categories keep their selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTags {
    /// Selected bundle ids
    pub bundles: Vec<String>,
    /// Selected values per free-form category
    pub tags: IndexMap<String, Vec<String>>,
}

impl CategoryTags {
    /// No tags selected
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tags from YAML text
    ///
    /// # Errors
    /// Returns error if the text does not match the tags shape
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// With bundles
    #[must_use]
    pub fn with_bundles(mut self, bundles: Vec<String>) -> Self {
        self.bundles = bundles;
        self
    }

    /// Replace the bundle selection
    pub fn set_bundles(&mut self, bundles: Vec<String>) {
        self.bundles = bundles;
    }

    /// Select or deselect a tag
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, category: &str, value: &str) -> bool {
        let values = self.tags.entry(category.to_string()).or_default();
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            false
        } else {
            values.push(value.to_string());
            true
        }
    }

    /// Whether a tag is selected
    #[must_use]
    pub fn is_selected(&self, category: &str, value: &str) -> bool {
        self.tags
            .get(category)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Number of selected free-form tags
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.tags.values().map(Vec::len).sum()
    }

    /// Flatten into index entries
    ///
    /// Sorted, de-duplicated bundles first, then categories in selection
    /// order.
    #[must_use]
    pub fn entries(&self) -> Vec<TagEntry> {
        let mut bundles = self.bundles.clone();
        bundles.sort();
        bundles.dedup();

        let bundle_entries = bundles.into_iter().map(|value| TagEntry {
            kind: BUNDLE_TAG_KIND.to_string(),
            value,
        });
        let tag_entries = self.tags.iter().flat_map(|(kind, values)| {
            values.iter().map(move |value| TagEntry {
                kind: kind.clone(),
                value: value.clone(),
            })
        });

        bundle_entries.chain(tag_entries).collect()
    }
}

#[derive(Serialize)]
struct IndexDocument<'a> {
    kind: &'static str,
    name: &'a str,
    tags: Vec<TagEntry>,
}

/// Derive a slug from a display name
///
/// Lowercases, joins whitespace runs with single hyphens, and strips leading
/// and trailing hyphens. An empty or all-whitespace name yields an empty slug.
#[must_use]
pub fn slugify(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

/// Generate both artifacts with default configuration
///
/// # Errors
/// Returns error if YAML serialization fails
pub fn generate_artifacts(
    record: &NormalizedRecord,
    tags: &CategoryTags,
) -> Result<[Artifact; 2], ArtifactError> {
    generate_artifacts_with(&CreatorConfig::default(), record, tags)
}

/// Generate the index artifact and the record artifact
///
/// Deterministic: identical inputs give byte-identical output.
///
/// # Errors
/// Returns error if YAML serialization fails
pub fn generate_artifacts_with(
    config: &CreatorConfig,
    record: &NormalizedRecord,
    tags: &CategoryTags,
) -> Result<[Artifact; 2], ArtifactError> {
    let slug = slugify(&record.spec.display_name);
    if slug.is_empty() {
        tracing::debug!("display name is empty; generating artifacts with an empty slug");
    }

    let index = IndexDocument {
        kind: INDEX_DOCUMENT_KIND,
        name: &slug,
        tags: tags.entries(),
    };
    let index_content = serde_yaml::to_string(&index)
        .map_err(|e| ArtifactError::serialize(&config.metadata_file_name, e))?;

    let mut adjusted = record.clone();
    adjusted.metadata.name.clone_from(&slug);
    adjusted.spec.icon = None;

    let record_name = format!("{slug}.yaml");
    let record_content = serde_yaml::to_string(&adjusted)
        .map_err(|e| ArtifactError::serialize(&record_name, e))?;

    tracing::debug!(slug = %slug, tags = index.tags.len(), "generated artifacts");

    Ok([
        Artifact::new(&config.metadata_file_name, index_content),
        Artifact::new(record_name, record_content),
    ])
}
