//! Short paths from a stable ancestor down to the target.

use super::SelectorEngine;
use super::features::{attribute_step, contains_text_step, exact_text_step};
use super::stability::StabilityClassifier;
use crate::dom::NodeId;

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// Document-wide expression for `anchor`, trying exact text, text
    /// prefix, then each stable attribute, and keeping the first that
    /// selects only `anchor`.
    pub fn anchor_expression(&self, anchor: NodeId) -> Option<String> {
        let tag = self.tag(anchor);
        let mut attempts = Vec::new();

        if let Some(text) = self.stable_text(anchor) {
            attempts.push(format!("//{}", exact_text_step(tag, &text)));
        }
        if let Some(text) = self.text_below(anchor, self.options.max_exact_text_len) {
            attempts.push(format!(
                "//{}",
                contains_text_step(tag, &text, self.options.contains_prefix_len)
            ));
        }
        attempts.extend(
            self.stable_attributes(anchor)
                .map(|(name, value)| format!("//{}", attribute_step(tag, name, value))),
        );

        attempts
            .into_iter()
            .find(|expression| self.resolves_uniquely_to(expression, anchor))
    }

    /// Anchor expression followed by one step per element between the anchor
    /// and `target`.
    ///
    /// Returns `None` when `anchor` is neither `target` nor one of its
    /// ancestors, or when no expression for the anchor verifies.
    pub fn build_relative_path(&self, anchor: NodeId, target: NodeId) -> Option<String> {
        if anchor != target && !self.document.is_ancestor_of(anchor, target) {
            return None;
        }
        let anchor_expression = self.anchor_expression(anchor)?;
        if anchor == target {
            return Some(anchor_expression);
        }

        let mut segments = Vec::new();
        let mut current = target;
        while current != anchor {
            segments.push(self.relative_step(current));
            current = self.document.parent(current)?;
        }
        segments.reverse();

        Some(format!("{}/{}", anchor_expression, segments.join("/")))
    }

    /// Most specific step for an element below the anchor. Text predicates
    /// must single it out among its siblings; attributes are taken as is.
    fn relative_step(&self, node: NodeId) -> String {
        let tag = self.tag(node);

        if let (Some(parent), Some(text)) = (
            self.document.parent(node),
            self.text_below(node, self.options.max_exact_text_len),
        ) {
            let exact = exact_text_step(tag, &text);
            if self.resolves_uniquely_within(&exact, parent, node) {
                return exact;
            }
            let contains = contains_text_step(tag, &text, self.options.contains_prefix_len);
            if self.resolves_uniquely_within(&contains, parent, node) {
                return contains;
            }
        }

        match self.stable_attribute(node) {
            Some((name, value)) => attribute_step(tag, name, value),
            None => self.positional_step(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementNode};

    fn card_list() -> Document {
        let card = |title: &str| {
            ElementNode::new("div")
                .with_attribute("class", "card-4821")
                .with_child(ElementNode::new("h3").with_text(title))
                .with_child(
                    ElementNode::new("div")
                        .with_child(ElementNode::new("a").with_text("Edit"))
                        .with_child(ElementNode::new("a").with_text("Delete")),
                )
        };
        Document::new(
            &ElementNode::new("main")
                .with_child(ElementNode::new("section").with_attribute("id", "projects").with_children(vec![
                    card("Alpha"),
                    card("Beta"),
                ]))
                .with_child(ElementNode::new("section").with_attribute("id", "archive").with_child(card("Gamma"))),
        )
    }

    #[test]
    fn test_anchor_expression_prefers_text() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        let beta = doc.element_at_path(&[0, 1, 0]).unwrap();
        assert_eq!(engine.anchor_expression(beta), Some(r#"//h3[text()="Beta"]"#.to_string()));
    }

    #[test]
    fn test_anchor_expression_falls_back_to_attributes() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        // "Edit" appears in every card, so neither text form verifies
        let edit = doc.element_at_path(&[0, 0, 1, 0]).unwrap();
        assert_eq!(engine.anchor_expression(edit), None);

        let archive = doc.element_at_path(&[1]).unwrap();
        assert_eq!(engine.anchor_expression(archive), Some(r#"//section[@id="archive"]"#.to_string()));
    }

    #[test]
    fn test_anchor_expression_skips_long_text() {
        let doc = Document::new(
            &ElementNode::new("div")
                .with_child(
                    ElementNode::new("p")
                        .with_attribute("id", "intro")
                        .with_text("Welcome to the project dashboard, where every team member can"),
                )
                .with_child(ElementNode::new("p").with_text("Other")),
        );
        let engine = SelectorEngine::new(&doc);
        let intro = doc.element_at_path(&[0]).unwrap();
        assert_eq!(engine.anchor_expression(intro), Some(r#"//p[@id="intro"]"#.to_string()));
    }

    #[test]
    fn test_path_from_anchor() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        let archive = doc.element_at_path(&[1]).unwrap();
        let delete = doc.element_at_path(&[1, 0, 1, 1]).unwrap();

        let path = engine.build_relative_path(archive, delete).unwrap();
        assert_eq!(path, r#"//section[@id="archive"]/div/div/a[text()="Delete"]"#);
        assert!(engine.resolves_uniquely_to(&path, delete));
    }

    #[test]
    fn test_positional_steps_between_anchor_and_target() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        let projects = doc.element_at_path(&[0]).unwrap();
        let second_card = doc.element_at_path(&[0, 1]).unwrap();

        let path = engine.build_relative_path(projects, second_card).unwrap();
        assert_eq!(path, r#"//section[@id="projects"]/div[2]"#);
        assert!(engine.resolves_uniquely_to(&path, second_card));
    }

    #[test]
    fn test_anchor_equal_to_target() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        let projects = doc.element_at_path(&[0]).unwrap();
        assert_eq!(
            engine.build_relative_path(projects, projects),
            Some(r#"//section[@id="projects"]"#.to_string())
        );
    }

    #[test]
    fn test_unrelated_anchor() {
        let doc = card_list();
        let engine = SelectorEngine::new(&doc);
        let archive = doc.element_at_path(&[1]).unwrap();
        let alpha = doc.element_at_path(&[0, 0, 0]).unwrap();
        assert_eq!(engine.build_relative_path(archive, alpha), None);
    }
}
