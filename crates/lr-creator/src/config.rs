//! Creator configuration
//!
//! Host-supplied settings for a wizard run. Defaults match the catalog's
//! content repository conventions.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum number of task steps in a graph
///
/// Bounds worst-case graph size. Adding a task beyond this is rejected by the
/// session, never by the graph builder.
pub const MAX_TASKS: usize = 10;

/// Placeholder record name used until a slug is derived
pub const DEFAULT_BASE_NAME: &str = "test-quickstart";

/// Text attached to projected links
pub const DEFAULT_LINK_TEXT: &str = "View documentation";

/// File name of the index artifact
pub const DEFAULT_METADATA_FILE_NAME: &str = "metadata.yaml";

/// Bundle offered by the bundle selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOption {
    /// Bundle id stored in the form and the index artifact
    pub id: String,
    /// Human-readable title
    pub title: String,
}

impl BundleOption {
    /// Create new bundle option
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Label shown in the selector: `Title (id)`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.id)
    }
}

/// Creator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CreatorConfig {
    /// Bundles offered on every details step
    pub bundles: Vec<BundleOption>,
    /// Known free-form tag categories, in display order
    pub tag_categories: Vec<String>,
    /// Record name used before a slug exists
    pub base_name: String,
    /// Link text for projected URLs
    pub link_text: String,
    /// Index artifact file name
    pub metadata_file_name: String,
}

impl CreatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With bundle options
    #[inline]
    #[must_use]
    pub fn with_bundles(mut self, bundles: Vec<BundleOption>) -> Self {
        self.bundles = bundles;
        self
    }

    /// With known tag categories
    #[inline]
    #[must_use]
    pub fn with_tag_categories(mut self, categories: Vec<String>) -> Self {
        self.tag_categories = categories;
        self
    }

    /// With link text
    #[inline]
    #[must_use]
    pub fn with_link_text(mut self, text: impl Into<String>) -> Self {
        self.link_text = text.into();
        self
    }

    /// Parse configuration from YAML text
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns error if the text does not match the config schema or
    /// violates an invariant
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "loading creator config");
        Self::from_yaml_str(&text)
    }

    /// Check invariants
    ///
    /// # Errors
    /// Returns error on an empty metadata file name, empty base name, or a
    /// duplicate bundle id
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "metadata-file-name must not be empty".into(),
            ));
        }
        if self.base_name.trim().is_empty() {
            return Err(ConfigError::Invalid("base-name must not be empty".into()));
        }
        for (i, bundle) in self.bundles.iter().enumerate() {
            if self.bundles[..i].iter().any(|b| b.id == bundle.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate bundle id: {}",
                    bundle.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            bundles: Vec::new(),
            tag_categories: Vec::new(),
            base_name: DEFAULT_BASE_NAME.to_string(),
            link_text: DEFAULT_LINK_TEXT.to_string(),
            metadata_file_name: DEFAULT_METADATA_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = CreatorConfig::new();
        assert_eq!(config.base_name, "test-quickstart");
        assert_eq!(config.link_text, "View documentation");
        assert_eq!(config.metadata_file_name, "metadata.yaml");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_and_defaults() {
        let config = CreatorConfig::from_yaml_str(
            r"
bundles:
  - id: rhel
    title: Red Hat Enterprise Linux
tag-categories: [product-families, use-case]
",
        )
        .unwrap();
        assert_eq!(config.bundles.len(), 1);
        assert_eq!(config.bundles[0].label(), "Red Hat Enterprise Linux (rhel)");
        assert_eq!(config.tag_categories, vec!["product-families", "use-case"]);
        assert_eq!(config.metadata_file_name, "metadata.yaml");
    }

    #[test]
    fn empty_text_is_default() {
        assert_eq!(CreatorConfig::from_yaml_str("  \n").unwrap(), CreatorConfig::default());
    }

    #[test]
    fn duplicate_bundles_rejected() {
        let config = CreatorConfig::new().with_bundles(vec![
            BundleOption::new("rhel", "RHEL"),
            BundleOption::new("rhel", "RHEL again"),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_key_shape_is_parse_error() {
        let result = CreatorConfig::from_yaml_str("bundles: 12\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "link-text: Open").unwrap();
        let config = CreatorConfig::load(file.path()).unwrap();
        assert_eq!(config.link_text, "Open");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = CreatorConfig::load("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
