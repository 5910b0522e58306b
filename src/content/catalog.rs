//! Step catalog: the ordered, validated list of steps for a pose walkthrough

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One titled instructional phase of the pose walkthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    /// Step title, unique within its catalog (also the selection key)
    pub title: String,
    /// Detail text shown when the step is active
    pub detail: String,
}

impl Step {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Errors raised while building a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("step catalog must contain at least one step")]
    Empty,

    #[error("step {0} has a blank title")]
    BlankTitle(usize),

    #[error("duplicate step title '{0}'")]
    DuplicateTitle(String),
}

/// Ordered, non-empty sequence of steps with unique titles.
///
/// Order is significant: it is the navigation order, and the first step is
/// the default selection. A catalog is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct Catalog {
    steps: Vec<Step>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, blank titles and duplicates
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, step) in steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                return Err(CatalogError::BlankTitle(index));
            }
            if !seen.insert(step.title.as_str()) {
                return Err(CatalogError::DuplicateTitle(step.title.clone()));
            }
        }

        Ok(Self { steps })
    }

    /// The first step, which is also the fallback for unknown titles
    pub fn first(&self) -> &Step {
        // Non-empty by construction
        &self.steps[0]
    }

    /// Find a step by title (linear scan, first match in catalog order)
    pub fn get(&self, title: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.title == title)
    }

    /// Position of a step by title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.title == title)
    }

    /// Resolve a title to a step, falling back to the first step when the
    /// title is not in the catalog
    pub fn resolve(&self, title: &str) -> &Step {
        match self.get(title) {
            Some(step) => step,
            None => {
                tracing::debug!(
                    title,
                    fallback = %self.first().title,
                    "Unknown step title, using first step"
                );
                self.first()
            }
        }
    }

    /// Index of the step [`Catalog::resolve`] would return
    pub fn resolve_index(&self, title: &str) -> usize {
        self.position(title).unwrap_or(0)
    }

    pub fn get_index(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step titles in navigation order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.title.as_str())
    }
}

impl TryFrom<Vec<Step>> for Catalog {
    type Error = CatalogError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<Catalog> for Vec<Step> {
    fn from(catalog: Catalog) -> Self {
        catalog.steps
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
