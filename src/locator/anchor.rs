use super::SelectorEngine;
use super::stability::StabilityClassifier;
use crate::dom::NodeId;
use serde::Serialize;

/// Nearest stable ancestor of a target, and how far up it was found.
///
/// When nothing qualifies within the hop bound, `node` is the target itself
/// and `hops` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorResult {
    pub node: NodeId,
    pub hops: usize,
}

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// Stable short text on a text-bearing tag, or a stable attribute
    pub fn has_stable_identifier(&self, node: NodeId) -> bool {
        self.stable_text(node).is_some() || self.stable_attribute(node).is_some()
    }

    /// Walk up from `target` (hop 0) for at most `max_anchor_hops` hops and
    /// return the first element with a stable identifier.
    pub fn find_anchor(&self, target: NodeId) -> AnchorResult {
        std::iter::once(target)
            .chain(self.document.ancestors(target))
            .take_while(|&node| self.document.is_element(node))
            .take(self.options.max_anchor_hops + 1)
            .enumerate()
            .find(|&(_, node)| self.has_stable_identifier(node))
            .map(|(hops, node)| AnchorResult { node, hops })
            .unwrap_or(AnchorResult { node: target, hops: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InferenceOptions;
    use crate::dom::{Document, ElementNode};

    /// `levels` nested plain divs inside `section#main`
    fn nested(levels: usize) -> Document {
        let mut inner = ElementNode::new("div");
        for _ in 1..levels {
            inner = ElementNode::new("div").with_child(inner);
        }
        Document::new(
            &ElementNode::new("body")
                .with_child(ElementNode::new("section").with_attribute("id", "main").with_child(inner)),
        )
    }

    fn innermost(doc: &Document) -> NodeId {
        doc.descendants(doc.root()).filter(|&n| doc.is_element(n)).last().unwrap()
    }

    #[test]
    fn test_target_is_its_own_anchor() {
        let doc = Document::new(&ElementNode::new("button").with_attribute("id", "submitBtn"));
        let engine = SelectorEngine::new(&doc);
        let button = doc.root_element().unwrap();
        assert_eq!(engine.find_anchor(button), AnchorResult { node: button, hops: 0 });
    }

    #[test]
    fn test_anchor_within_bound() {
        let doc = nested(4);
        let engine = SelectorEngine::new(&doc);
        let target = innermost(&doc);
        let section = doc.element_at_path(&[0]).unwrap();

        let anchor = engine.find_anchor(target);
        assert_eq!(anchor, AnchorResult { node: section, hops: 4 });
    }

    #[test]
    fn test_anchor_beyond_bound() {
        let doc = nested(5);
        let engine = SelectorEngine::new(&doc);
        let target = innermost(&doc);

        assert_eq!(engine.find_anchor(target), AnchorResult { node: target, hops: 0 });

        let wider = SelectorEngine::new(&doc).with_options(InferenceOptions::new().max_anchor_hops(5));
        assert_eq!(wider.find_anchor(target).hops, 5);
    }

    #[test]
    fn test_text_qualifies_as_identifier() {
        let doc = Document::new(
            &ElementNode::new("li")
                .with_text("Settings")
                .with_child(ElementNode::new("i").with_attribute("class", "x9")),
        );
        let engine = SelectorEngine::new(&doc);
        let icon = doc.element_at_path(&[0]).unwrap();
        let item = doc.root_element().unwrap();

        assert!(!engine.has_stable_identifier(icon));
        assert!(engine.has_stable_identifier(item));
        assert_eq!(engine.find_anchor(icon), AnchorResult { node: item, hops: 1 });
    }
}
