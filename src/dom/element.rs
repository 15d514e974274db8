use indexmap::IndexMap;

/// A child of an [`ElementNode`]: a run of text or a nested element
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotChild {
    Text(String),
    Element(ElementNode),
}

/// Owned DOM element assembled by hand, typically in tests or when a page
/// is built programmatically.
///
/// Text runs and child elements keep their source order, so
/// `<p>Total: <b>5</b> items</p>` is three children. Selector inference runs
/// on the [`Document`](super::Document) built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "button", "input")
    pub tag_name: String,

    /// Element attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Text runs and child elements in document order
    pub children: Vec<SnapshotChild>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: add a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text run after the current children
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder method: append child elements
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children.extend(children.into_iter().map(SnapshotChild::Element));
        self
    }

    /// Builder method: append a child
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.add_child(child);
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Append a text run
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(SnapshotChild::Text(text.into()));
    }

    /// Append a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(SnapshotChild::Element(child));
    }

    /// Child elements, skipping text runs
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|child| match child {
            SnapshotChild::Element(element) => Some(element),
            SnapshotChild::Text(_) => None,
        })
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let mut attrs = IndexMap::new();
        attrs.insert("id".to_string(), "test-id".to_string());
        attrs.insert("class".to_string(), "btn primary".to_string());

        let element = ElementNode::new("button")
            .with_attributes(attrs)
            .with_text("Click me");

        assert_eq!(element.tag_name, "button");
        assert_eq!(element.id(), Some(&"test-id".to_string()));
        assert_eq!(element.children, vec![SnapshotChild::Text("Click me".to_string())]);
        assert_eq!(
            element.attributes.keys().collect::<Vec<_>>(),
            vec!["id", "class"]
        );
    }

    #[test]
    fn test_is_tag_ignores_case() {
        let element = ElementNode::new("BUTTON");
        assert!(element.is_tag("button"));
        assert!(!element.is_tag("a"));
    }

    #[test]
    fn test_text_and_elements_keep_order() {
        let element = ElementNode::new("p")
            .with_text("Total: ")
            .with_child(ElementNode::new("b").with_text("5"))
            .with_text(" items");

        assert_eq!(element.children.len(), 3);
        assert!(matches!(&element.children[0], SnapshotChild::Text(text) if text == "Total: "));
        assert!(matches!(&element.children[1], SnapshotChild::Element(b) if b.is_tag("b")));
        assert!(matches!(&element.children[2], SnapshotChild::Text(text) if text == " items"));
        assert_eq!(element.elements().count(), 1);
    }

    #[test]
    fn test_with_children_appends() {
        let element = ElementNode::new("ul")
            .with_child(ElementNode::new("li"))
            .with_children(vec![ElementNode::new("li"), ElementNode::new("li")]);
        assert_eq!(element.elements().count(), 3);
    }
}
