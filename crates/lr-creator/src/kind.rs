//! Kind registry
//!
//! Fixed table of content kinds. Every other component reads its branching
//! and field rules from [`KindMeta`]: which optional fields apply, whether the
//! kind carries an ordered task list, and the metadata merged into records.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Content category of a learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// External documentation link
    #[serde(rename = "documentation")]
    Documentation,
    /// Interactive quickstart with tasks
    #[serde(rename = "quickstart")]
    Quickstart,
    /// Learning path link
    #[serde(rename = "learningPath")]
    LearningPath,
    /// Any other resource link
    #[serde(rename = "other")]
    Other,
}

/// All kinds in registry order
pub const ALL_ITEM_KINDS: [ItemKind; 4] = [
    ItemKind::Documentation,
    ItemKind::Quickstart,
    ItemKind::LearningPath,
    ItemKind::Other,
];

impl ItemKind {
    /// Stable string key used in form values and step identifiers
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Quickstart => "quickstart",
            Self::LearningPath => "learningPath",
            Self::Other => "other",
        }
    }

    /// Metadata for this kind
    #[inline]
    #[must_use]
    pub fn meta(self) -> &'static KindMeta {
        meta_for_kind(self)
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ITEM_KINDS
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// String is not a registered kind key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item kind: {0}")]
pub struct UnknownKind(pub String);

/// Tag color shown on catalog cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    /// `blue`
    Blue,
    /// `cyan`
    Cyan,
    /// `green`, quickstarts
    Green,
    /// `orange`, documentation
    Orange,
    /// `purple`, other resources
    Purple,
    /// `red`
    Red,
    /// `grey`
    Grey,
    /// `teal`, learning paths
    Teal,
}

/// Optional fields a kind declares applicable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindFields {
    /// Endpoint URL field
    pub url: bool,
    /// Duration-in-minutes field
    pub duration: bool,
}

/// Fixed metadata merged into every record of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraMetadata {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external_documentation: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub learning_path: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub other_resource: bool,
}

impl ExtraMetadata {
    /// No extra metadata
    pub const NONE: Self = Self {
        external_documentation: false,
        learning_path: false,
        other_resource: false,
    };

    /// True if no flag is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Registry entry for one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMeta {
    /// Human-readable name ("Quickstart")
    pub display_name: &'static str,
    /// Card tag color
    pub tag_color: TagColor,
    /// Applicable optional fields
    pub fields: KindFields,
    /// Whether the kind supports an ordered task list
    pub has_tasks: bool,
    /// Metadata merged into records of this kind
    pub extra_metadata: ExtraMetadata,
}

static DOCUMENTATION: KindMeta = KindMeta {
    display_name: "Documentation",
    tag_color: TagColor::Orange,
    fields: KindFields {
        url: true,
        duration: false,
    },
    has_tasks: false,
    extra_metadata: ExtraMetadata {
        external_documentation: true,
        ..ExtraMetadata::NONE
    },
};

static QUICKSTART: KindMeta = KindMeta {
    display_name: "Quickstart",
    tag_color: TagColor::Green,
    fields: KindFields {
        url: false,
        duration: true,
    },
    has_tasks: true,
    extra_metadata: ExtraMetadata::NONE,
};

static LEARNING_PATH: KindMeta = KindMeta {
    display_name: "Learning path",
    tag_color: TagColor::Teal,
    fields: KindFields {
        url: true,
        duration: false,
    },
    has_tasks: false,
    extra_metadata: ExtraMetadata {
        learning_path: true,
        ..ExtraMetadata::NONE
    },
};

static OTHER: KindMeta = KindMeta {
    display_name: "Other",
    tag_color: TagColor::Purple,
    fields: KindFields {
        url: true,
        duration: false,
    },
    has_tasks: false,
    extra_metadata: ExtraMetadata {
        other_resource: true,
        ..ExtraMetadata::NONE
    },
};

/// Metadata for a kind (total over the closed set)
#[must_use]
pub fn meta_for_kind(kind: ItemKind) -> &'static KindMeta {
    match kind {
        ItemKind::Documentation => &DOCUMENTATION,
        ItemKind::Quickstart => &QUICKSTART,
        ItemKind::LearningPath => &LEARNING_PATH,
        ItemKind::Other => &OTHER,
    }
}

/// Membership test for untyped input
#[inline]
#[must_use]
pub fn is_item_kind(candidate: &str) -> bool {
    candidate.parse::<ItemKind>().is_ok()
}

/// Iterator over `(kind, meta)` pairs in registry order
pub fn all_kind_entries() -> impl Iterator<Item = (ItemKind, &'static KindMeta)> {
    ALL_ITEM_KINDS.into_iter().map(|kind| (kind, meta_for_kind(kind)))
}
