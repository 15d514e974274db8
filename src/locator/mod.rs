//! Locator inference.
//!
//! Given an element of a [`Document`], [`SelectorEngine`] produces an XPath
//! expression that selects exactly that element and is likely to keep doing
//! so after small changes to the page. Several strategies each propose a
//! [`Candidate`]; the ranker re-verifies them against the document and keeps
//! the best by category priority.

mod anchor;
mod candidate;
mod features;
mod full_path;
mod ranker;
mod relative;
pub mod stability;
mod verify;

pub use anchor::AnchorResult;
pub use candidate::Candidate;
pub use stability::{HeuristicClassifier, StabilityClassifier, is_static};

use crate::config::InferenceOptions;
use crate::dom::{Document, NodeId};
use crate::error::{LocatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy that produced an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorCategory {
    /// Match on the element's own text
    Text,
    /// Path from a stable ancestor
    Relative,
    /// Single attribute predicate on the element
    Direct,
    /// Path from the document root, or as far up as the depth bound allows
    FullPath,
}

impl LocatorCategory {
    /// Categories in the order the ranker tries them
    pub const PRIORITY: [LocatorCategory; 4] = [
        LocatorCategory::Text,
        LocatorCategory::Relative,
        LocatorCategory::Direct,
        LocatorCategory::FullPath,
    ];

    pub fn score(self) -> u32 {
        match self {
            LocatorCategory::Text => 15,
            LocatorCategory::Relative => 10,
            LocatorCategory::Direct => 8,
            LocatorCategory::FullPath => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocatorCategory::Text => "text",
            LocatorCategory::Relative => "relative",
            LocatorCategory::Direct => "direct",
            LocatorCategory::FullPath => "full-path",
        }
    }
}

impl fmt::Display for LocatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chosen expression for a target element.
///
/// `unique` is false when no candidate verified and the expression was
/// returned on a best-effort basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub expression: String,
    pub category: LocatorCategory,
    pub unique: bool,
}

/// Computes locators for elements of one document.
///
/// The engine only reads the document. It holds no state between calls, so
/// repeated calls for the same target return the same locator.
pub struct SelectorEngine<'a, C = HeuristicClassifier> {
    document: &'a Document,
    classifier: C,
    options: InferenceOptions,
}

impl<'a> SelectorEngine<'a, HeuristicClassifier> {
    /// Engine with the default classifier and options
    pub fn new(document: &'a Document) -> Self {
        Self::with_classifier(document, HeuristicClassifier)
    }
}

impl<'a, C: StabilityClassifier> SelectorEngine<'a, C> {
    /// Engine using a custom stability classifier
    pub fn with_classifier(document: &'a Document, classifier: C) -> Self {
        Self {
            document,
            classifier,
            options: InferenceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Best locator for `target`.
    ///
    /// Fails only when `target` is not an element of this document.
    pub fn compute_locator(&self, target: NodeId) -> Result<Locator> {
        self.ensure_element(target)?;
        let candidates = self.generate_candidates(target);
        let locator = self
            .pick_best(&candidates, target)
            .ok_or_else(|| LocatorError::NodeNotFound(format!("no candidate for node {}", target.index())))?;

        log::debug!(
            "Locator for {}: {} ({}, unique: {})",
            self.document.describe(target),
            locator.expression,
            locator.category,
            locator.unique
        );
        Ok(locator)
    }

    /// Highest-scoring candidate for `target`, without the final
    /// verification pass. Used for hover previews.
    pub fn preview(&self, target: NodeId) -> Result<Candidate> {
        self.ensure_element(target)?;
        self.generate_candidates(target)
            .into_iter()
            .fold(None, |best: Option<Candidate>, candidate| match best {
                Some(best) if best.score >= candidate.score => Some(best),
                _ => Some(candidate),
            })
            .ok_or_else(|| LocatorError::NodeNotFound(format!("no candidate for node {}", target.index())))
    }

    fn ensure_element(&self, target: NodeId) -> Result<()> {
        if self.document.is_element(target) {
            Ok(())
        } else {
            Err(LocatorError::NodeNotFound(format!(
                "node {} is not an element",
                target.index()
            )))
        }
    }
}

/// Locator for `target` with default classifier and options
pub fn compute_locator(document: &Document, target: NodeId) -> Result<Locator> {
    SelectorEngine::new(document).compute_locator(target)
}
