use super::SelectorEngine;
use super::stability::StabilityClassifier;
use crate::dom::NodeId;

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    /// `true` iff `expression` selects exactly `target` in the whole document.
    ///
    /// Expressions that fail to parse or evaluate count as not unique.
    pub fn resolves_uniquely_to(&self, expression: &str, target: NodeId) -> bool {
        self.resolves_uniquely_within(expression, self.document.root(), target)
    }

    /// Same check with `context` as the context node, so relative
    /// expressions only see what is reachable from it.
    pub fn resolves_uniquely_within(&self, expression: &str, context: NodeId, target: NodeId) -> bool {
        match self.document.evaluate(expression, context) {
            Ok(nodes) => nodes == [target],
            Err(e) => {
                log::debug!("Discarding expression '{}': {}", expression, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementNode};

    fn list() -> Document {
        Document::new(
            &ElementNode::new("div")
                .with_child(
                    ElementNode::new("ul")
                        .with_child(ElementNode::new("li").with_text("One"))
                        .with_child(ElementNode::new("li").with_text("Two")),
                )
                .with_child(ElementNode::new("ul").with_child(ElementNode::new("li").with_text("One"))),
        )
    }

    #[test]
    fn test_unique_match() {
        let doc = list();
        let engine = SelectorEngine::new(&doc);
        let two = doc.element_at_path(&[0, 1]).unwrap();

        assert!(engine.resolves_uniquely_to(r#"//li[text()="Two"]"#, two));
        assert!(!engine.resolves_uniquely_to("//li", two));
        assert!(!engine.resolves_uniquely_to(r#"//li[text()="Three"]"#, two));
    }

    #[test]
    fn test_match_must_be_the_target() {
        let doc = list();
        let engine = SelectorEngine::new(&doc);
        let two = doc.element_at_path(&[0, 1]).unwrap();
        let first = doc.element_at_path(&[0, 0]).unwrap();

        assert!(!engine.resolves_uniquely_to(r#"//li[text()="Two"]"#, first));
        assert!(engine.resolves_uniquely_to("//ul[1]/li[2]", two));
    }

    #[test]
    fn test_invalid_expressions_are_not_unique() {
        let doc = list();
        let engine = SelectorEngine::new(&doc);
        let two = doc.element_at_path(&[0, 1]).unwrap();

        assert!(!engine.resolves_uniquely_to(r#"//li[text()="Two]"#, two));
        assert!(!engine.resolves_uniquely_to("count(//li)", two));
        assert!(!engine.resolves_uniquely_to("", two));
    }

    #[test]
    fn test_scoped_to_context() {
        let doc = list();
        let engine = SelectorEngine::new(&doc);
        let first_list = doc.element_at_path(&[0]).unwrap();
        let second_list = doc.element_at_path(&[1]).unwrap();
        let one = doc.element_at_path(&[0, 0]).unwrap();
        let other_one = doc.element_at_path(&[1, 0]).unwrap();

        assert!(!engine.resolves_uniquely_to(r#"//li[text()="One"]"#, one));
        assert!(engine.resolves_uniquely_within(r#"li[text()="One"]"#, first_list, one));
        assert!(engine.resolves_uniquely_within(r#"li[text()="One"]"#, second_list, other_one));
    }
}
