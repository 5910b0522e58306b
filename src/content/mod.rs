//! Page content for a guided pose walkthrough
//!
//! All copy on the page (document metadata, hero, step catalog, benefits,
//! safety tips, breathing cues, cool down) is one immutable [`PageContent`]
//! value. It is loaded once at startup, either from the embedded Bridge Pose
//! content or from a user TOML file, and passed explicitly to the selector
//! and the renderers.

pub mod catalog;

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{Catalog, CatalogError, Step};

/// Embedded content for the built-in Bridge Pose page
pub const BUILTIN_CONTENT: &str = include_str!("bridge_pose.toml");

/// Errors raised while loading page content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Also covers catalog validation, which runs during deserialization
    #[error("invalid page content in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete content of a pose page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageContent {
    /// Document metadata (`<title>`, meta description)
    pub document: DocumentMeta,
    /// Hero header at the top of the page
    pub hero: Hero,
    /// Summary card next to the pose figure
    pub pose_card: PoseCard,
    /// Header of the step breakdown section
    pub timeline: SectionHeader,
    /// Ordered step catalog driving the step selector
    #[schemars(with = "Vec<Step>")]
    pub steps: Catalog,
    pub benefits: ListSection,
    pub safety: ListSection,
    pub breathing: BreathSection,
    pub cool_down: ProseSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Hero {
    /// Small label above the heading (e.g. "Featured Asana")
    pub badge: String,
    pub heading: String,
    pub intro: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PoseCard {
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub facts: Vec<PoseFact>,
}

/// A labelled fact on the pose card (e.g. "Difficulty: Gentle backbend")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PoseFact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SectionHeader {
    pub heading: String,
    /// Instruction line under the heading
    #[serde(default)]
    pub prompt: String,
}

/// A headed bullet list (benefits, safety tips)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListSection {
    pub heading: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BreathSection {
    pub heading: String,
    #[serde(default)]
    pub phases: Vec<BreathPhase>,
}

/// One breathing cue, e.g. "Exhale: Lift"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BreathPhase {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProseSection {
    pub heading: String,
    pub text: String,
}

impl PageContent {
    /// Parse content from a TOML string. `origin` names the source in errors.
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|source| ContentError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// The embedded Bridge Pose content
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN_CONTENT, "built-in content")
    }

    /// Read and parse a content file
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source, &path.display().to_string())
    }

    /// Load content from `path` if given, otherwise the built-in content
    pub fn load(path: Option<&Path>) -> Result<Self, ContentError> {
        let content = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };

        tracing::debug!(
            title = %content.document.title,
            steps = content.steps.len(),
            custom = path.is_some(),
            "Loaded page content"
        );

        Ok(content)
    }

    /// JSON schema for the content file format
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(PageContent)
    }
}
