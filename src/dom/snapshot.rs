use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tags whose subtrees never hold pickable content
pub const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// One record of a flat DOM snapshot.
///
/// A snapshot is a JSON array of records in document order. Each record
/// names its parent by index into that array; only the first record, the
/// root element, has no parent. Element records carry `tag_name` and
/// `attributes`, text records carry `text`:
///
/// ```json
/// [
///   {"tag_name": "p", "attributes": {"class": "total"}},
///   {"parent": 0, "text": "Total: "},
///   {"parent": 0, "tag_name": "b"},
///   {"parent": 2, "text": "5"},
///   {"parent": 0, "text": " items"}
/// ]
/// ```
///
/// Nesting depth never shows up in the JSON, so arbitrarily deep pages
/// parse like shallow ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,

    /// Tag name; absent on text records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Content of a text record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SnapshotNode {
    pub fn element(parent: Option<usize>, tag_name: impl Into<String>, attributes: IndexMap<String, String>) -> Self {
        Self {
            parent,
            tag_name: Some(tag_name.into()),
            attributes,
            text: None,
        }
    }

    pub fn text(parent: usize, text: impl Into<String>) -> Self {
        Self {
            parent: Some(parent),
            tag_name: None,
            attributes: IndexMap::new(),
            text: Some(text.into()),
        }
    }

    pub fn is_element(&self) -> bool {
        self.tag_name.is_some()
    }

    /// Element whose subtree is dropped when a document is built
    pub fn is_skipped(&self) -> bool {
        self.tag_name
            .as_deref()
            .is_some_and(|tag| SKIPPED_TAGS.iter().any(|skipped| tag.eq_ignore_ascii_case(skipped)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_records() {
        let records: Vec<SnapshotNode> = serde_json::from_str(
            r#"[
                {"tag_name": "p", "attributes": {"class": "total"}},
                {"parent": 0, "text": "Total: "},
                {"parent": 0, "tag_name": "b"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_element());
        assert_eq!(records[0].parent, None);
        assert_eq!(records[0].attributes.get("class").map(String::as_str), Some("total"));
        assert_eq!(records[1], SnapshotNode::text(0, "Total: "));
        assert_eq!(records[2], SnapshotNode::element(Some(0), "b", IndexMap::new()));
    }

    #[test]
    fn test_serialize_omits_empty_fields() {
        let json = serde_json::to_string(&SnapshotNode::text(3, "Hi")).unwrap();
        assert_eq!(json, r#"{"parent":3,"text":"Hi"}"#);

        let json = serde_json::to_string(&SnapshotNode::element(None, "html", IndexMap::new())).unwrap();
        assert_eq!(json, r#"{"tag_name":"html"}"#);
    }

    #[test]
    fn test_skipped_tags() {
        assert!(SnapshotNode::element(Some(0), "SCRIPT", IndexMap::new()).is_skipped());
        assert!(SnapshotNode::element(Some(0), "template", IndexMap::new()).is_skipped());
        assert!(!SnapshotNode::element(Some(0), "p", IndexMap::new()).is_skipped());
        assert!(!SnapshotNode::text(0, "script").is_skipped());
    }
}
