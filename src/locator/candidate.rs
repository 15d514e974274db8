use super::features::{attribute_step, contains_text_step, exact_text_step};
use super::stability::StabilityClassifier;
use super::{LocatorCategory, SelectorEngine};
use crate::dom::NodeId;
use serde::{Deserialize, Serialize};

/// A proposed expression for a target element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub expression: String,
    pub score: u32,
    pub category: LocatorCategory,
}

impl Candidate {
    pub fn new(expression: impl Into<String>, category: LocatorCategory) -> Self {
        Self {
            expression: expression.into(),
            score: category.score(),
            category,
        }
    }
}

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// Run every strategy for `target`. Each one either yields a candidate
    /// or is skipped; the full path is always present.
    pub fn generate_candidates(&self, target: NodeId) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(4);

        if let Some(expression) = self.text_candidate(target) {
            candidates.push(Candidate::new(expression, LocatorCategory::Text));
        }
        if let Some(expression) = self.relative_candidate(target) {
            candidates.push(Candidate::new(expression, LocatorCategory::Relative));
        }
        if let Some(expression) = self.direct_candidate(target) {
            candidates.push(Candidate::new(expression, LocatorCategory::Direct));
        }
        candidates.push(Candidate::new(self.build_full_path(target), LocatorCategory::FullPath));

        for candidate in &candidates {
            log::trace!("{} candidate: {}", candidate.category, candidate.expression);
        }
        candidates
    }

    /// Verified exact text match, else a verified `contains()` on the text
    /// prefix.
    fn text_candidate(&self, target: NodeId) -> Option<String> {
        let text = self.text_below(target, self.options.max_text_len)?;
        let tag = self.tag(target);

        if text.chars().count() < self.options.max_exact_text_len && self.classifier.is_static(&text) {
            let exact = format!("//{}", exact_text_step(tag, &text));
            if self.resolves_uniquely_to(&exact, target) {
                return Some(exact);
            }
        }

        let contains = format!("//{}", contains_text_step(tag, &text, self.options.contains_prefix_len));
        self.resolves_uniquely_to(&contains, target).then_some(contains)
    }

    fn relative_candidate(&self, target: NodeId) -> Option<String> {
        let anchor = self.find_anchor(target);
        if anchor.node == target {
            return None;
        }
        log::trace!(
            "Anchor {} found {} hop(s) above target",
            self.document.describe(anchor.node),
            anchor.hops
        );
        self.build_relative_path(anchor.node, target)
    }

    fn direct_candidate(&self, target: NodeId) -> Option<String> {
        self.stable_attribute(target)
            .map(|(name, value)| format!("//{}", attribute_step(self.tag(target), name, value)))
    }
}
