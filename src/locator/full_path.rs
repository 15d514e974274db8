use super::SelectorEngine;
use super::features::{attribute_step, exact_text_step};
use super::stability::StabilityClassifier;
use crate::dom::NodeId;

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// Path from the target upward, stopping at the first element with
    /// stable text or a stable attribute.
    ///
    /// Elements without one get a positional step. When the walk reaches the
    /// root element the path is absolute (`/html/...`); when the depth bound
    /// runs out first it starts with `//`. Never empty for an element.
    pub fn build_full_path(&self, target: NodeId) -> String {
        let max_depth = self.options.max_full_path_depth.max(1);
        let mut segments = Vec::new();
        let mut current = Some(target).filter(|&node| self.document.is_element(node));

        while let Some(node) = current {
            if segments.len() == max_depth {
                break;
            }
            if let Some(step) = self.identifying_step(node) {
                segments.push(step);
                return format!("//{}", join_upward(segments));
            }
            segments.push(self.positional_step(node));
            current = self.document.parent_element(node);
        }

        match current {
            Some(_) => format!("//{}", join_upward(segments)),
            None => format!("/{}", join_upward(segments)),
        }
    }

    fn identifying_step(&self, node: NodeId) -> Option<String> {
        let tag = self.tag(node);
        if let Some(text) = self.stable_text(node) {
            return Some(exact_text_step(tag, &text));
        }
        self.stable_attribute(node)
            .map(|(name, value)| attribute_step(tag, name, value))
    }
}

fn join_upward(mut segments: Vec<String>) -> String {
    segments.reverse();
    segments.join("/")
}
