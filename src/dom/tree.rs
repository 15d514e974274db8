use crate::dom::element::{ElementNode, SnapshotChild};
use crate::dom::snapshot::SnapshotNode;
use crate::error::{LocatorError, Result};
use headless_chrome::Tab;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Handle to a node inside a [`Document`].
///
/// Ids are assigned in document order, so comparing two ids of the same
/// document compares their position in a pre-order traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in document order
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The document root; parent of the root element
    Document,
    Element {
        tag_name: String,
        attributes: IndexMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable, arena-backed document tree.
///
/// Parent links are plain ids and never own anything. Once built the
/// document is never mutated, which makes it safe to share across threads
/// while locators are computed.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Build a document whose root element is `root`
    pub fn new(root: &ElementNode) -> Self {
        let mut document = Self::empty();
        let root_id = document.push_element(document.root(), root);

        // Explicit stack so deep trees cannot exhaust the call stack
        let mut stack = vec![(root_id, root.children.iter())];
        while let Some((parent, children)) = stack.last_mut() {
            let parent = *parent;
            match children.next() {
                Some(SnapshotChild::Text(text)) => {
                    if !text.is_empty() {
                        document.push(parent, NodeKind::Text(text.clone()));
                    }
                }
                Some(SnapshotChild::Element(element)) => {
                    let id = document.push_element(parent, element);
                    stack.push((id, element.children.iter()));
                }
                None => {
                    stack.pop();
                }
            }
        }
        document
    }

    /// Build a document from flat snapshot records.
    ///
    /// Records must be in document order with each parent listed before its
    /// children. Script, style, noscript and template subtrees are dropped.
    pub fn from_snapshot(records: &[SnapshotNode]) -> Result<Self> {
        let mut document = Self::empty();
        // Node built for each record; None inside dropped subtrees
        let mut built: Vec<Option<NodeId>> = Vec::with_capacity(records.len());
        // Element records from the root down to the latest one
        let mut open: Vec<usize> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let parent = match record.parent {
                None if index == 0 && record.is_element() => Some(document.root()),
                None => return Err(malformed(index, "only the first record is parentless and it must be an element")),
                Some(parent) => {
                    while open.last().is_some_and(|&top| top != parent) {
                        open.pop();
                    }
                    if open.is_empty() {
                        return Err(malformed(index, format!("parent {} is not an enclosing element", parent)));
                    }
                    built.get(parent).copied().flatten()
                }
            };

            let node = match (parent, &record.tag_name, &record.text) {
                (Some(parent), Some(tag_name), _) if !record.is_skipped() => Some(document.push(
                    parent,
                    NodeKind::Element {
                        tag_name: tag_name.to_ascii_lowercase(),
                        attributes: record.attributes.clone(),
                    },
                )),
                (Some(parent), None, Some(text)) if !text.is_empty() => {
                    Some(document.push(parent, NodeKind::Text(text.clone())))
                }
                _ => None,
            };

            if record.is_element() {
                open.push(index);
            }
            built.push(node);
        }

        if document.root_element().is_none() {
            return Err(LocatorError::DomParseFailed("Snapshot has no root element".to_string()));
        }
        Ok(document)
    }

    /// Parse a JSON array of [`SnapshotNode`] records
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<SnapshotNode> = serde_json::from_str(json)
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e)))?;
        let document = Self::from_snapshot(&records)?;
        log::trace!(
            "Parsed DOM snapshot of {} records into {} elements",
            records.len(),
            document.count_elements()
        );
        Ok(document)
    }

    /// Snapshot the DOM of a browser tab
    pub fn from_tab(tab: &Arc<Tab>) -> Result<Self> {
        // The script returns the records as a JSON string
        let js_code = include_str!("snapshot_dom.js");

        let result = tab.evaluate(js_code, false).map_err(|e| {
            LocatorError::DomParseFailed(format!("Failed to execute DOM snapshot script: {}", e))
        })?;

        let json_value = result
            .value
            .ok_or_else(|| LocatorError::DomParseFailed("No value returned from DOM snapshot".to_string()))?;

        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        Self::from_json(&json_str)
    }

    fn empty() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn push_element(&mut self, parent: NodeId, element: &ElementNode) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                tag_name: element.tag_name.to_ascii_lowercase(),
                attributes: element.attributes.clone(),
            },
        )
    }

    // Nodes are only ever appended below the most recent open element, which
    // keeps ids in document order.
    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The outermost element
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&child| self.is_element(child))
    }

    /// Total number of nodes, including the document and text nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root_element().is_none()
    }

    /// Whether `id` belongs to this document
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|data| &data.kind)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).and_then(|data| data.parent)
    }

    /// Parent, if the parent is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&parent| self.is_element(parent))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|data| data.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.is_element(child))
    }

    /// Lowercased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> Option<&IndexMap<String, String>> {
        match self.kind(id)? {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)?.get(name).map(String::as_str)
    }

    /// Concatenated text of all descendant text nodes in document order
    /// (untrimmed)
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(_) => self.descendants(id).filter_map(|node| self.text(node)).collect(),
            None => String::new(),
        }
    }

    /// The element's own text nodes, the ones a `text()` step selects
    pub fn own_text(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.children(id).iter().filter_map(move |&child| self.text(child))
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Ancestors of `id`, nearest first, ending with the document node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&node| self.parent(node))
    }

    /// All descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        // Pre-order ids make a subtree a contiguous id range.
        let end = self.subtree_end(id);
        (id.0 + 1..end).map(NodeId)
    }

    fn subtree_end(&self, id: NodeId) -> usize {
        let mut current = id;
        loop {
            match self.children(current).last() {
                Some(&last) => current = last,
                None => return current.0 + 1,
            }
        }
    }

    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// 1-based position of an element among its same-tag siblings, together
    /// with the number of such siblings.
    pub fn same_tag_position(&self, id: NodeId) -> (usize, usize) {
        let Some(tag) = self.tag_name(id) else {
            return (1, 1);
        };
        let Some(parent) = self.parent(id) else {
            return (1, 1);
        };

        let mut position = 0;
        let mut count = 0;
        for sibling in self.element_children(parent) {
            if self.tag_name(sibling) == Some(tag) {
                count += 1;
                if sibling == id {
                    position = count;
                }
            }
        }
        (position.max(1), count.max(1))
    }

    /// Follow child-element indices (0-based) down from the root element
    pub fn element_at_path(&self, path: &[usize]) -> Option<NodeId> {
        let mut current = self.root_element()?;
        for &index in path {
            current = self.element_children(current).nth(index)?;
        }
        Some(current)
    }

    /// Count element nodes
    pub fn count_elements(&self) -> usize {
        self.nodes
            .iter()
            .filter(|data| matches!(data.kind, NodeKind::Element { .. }))
            .count()
    }

    /// Short opening-tag summary such as `<button id="save" class="btn">`
    pub fn describe(&self, id: NodeId) -> String {
        let Some(tag) = self.tag_name(id) else {
            return String::new();
        };
        let mut parts = vec![format!("<{}", tag)];

        if let Some(id) = self.attribute(id, "id") {
            parts.push(format!(" id=\"{}\"", id));
        }

        if let Some(class) = self.attribute(id, "class") {
            parts.push(format!(" class=\"{}\"", class));
        }

        parts.push(">".to_string());
        parts.join("")
    }

    /// Flatten the document into snapshot records, one per node
    pub fn to_snapshot(&self) -> Vec<SnapshotNode> {
        // Record i holds node i + 1; the document node has no record
        self.nodes
            .iter()
            .skip(1)
            .filter_map(|data| {
                let parent = data.parent.filter(|parent| parent.0 > 0).map(|parent| parent.0 - 1);
                match &data.kind {
                    NodeKind::Element { tag_name, attributes } => {
                        Some(SnapshotNode::element(parent, tag_name.clone(), attributes.clone()))
                    }
                    NodeKind::Text(text) => parent.map(|parent| SnapshotNode::text(parent, text.clone())),
                    NodeKind::Document => None,
                }
            })
            .collect()
    }

    /// Serialize the document into the snapshot JSON format
    pub fn to_json(&self) -> Result<String> {
        if self.root_element().is_none() {
            return Err(LocatorError::NodeNotFound("document has no root element".to_string()));
        }
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Evaluate an XPath expression with `context` as the context node and
    /// return the selected nodes in document order.
    pub fn evaluate(&self, expression: &str, context: NodeId) -> Result<Vec<NodeId>> {
        crate::xpath::select(self, expression, context)
    }
}

fn malformed(index: usize, reason: impl fmt::Display) -> LocatorError {
    LocatorError::DomParseFailed(format!("Malformed snapshot record {}: {}", index, reason))
}
