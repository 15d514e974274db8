use crate::dom::{Document, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction a test would perform on a picked element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementAction {
    Click,
    Fill,
    Check,
    SelectOption,
}

impl ElementAction {
    /// Action implied by the element's tag and `type` attribute
    pub fn for_element(document: &Document, node: NodeId) -> Self {
        match document.tag_name(node) {
            Some("input") => {
                let kind = document.attribute(node, "type").map(str::to_ascii_lowercase);
                match kind.as_deref() {
                    Some("checkbox") | Some("radio") => ElementAction::Check,
                    _ => ElementAction::Fill,
                }
            }
            Some("textarea") => ElementAction::Fill,
            Some("select") => ElementAction::SelectOption,
            _ => ElementAction::Click,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementAction::Click => "click()",
            ElementAction::Fill => "fill()",
            ElementAction::Check => "check()",
            ElementAction::SelectOption => "selectOption()",
        }
    }
}

impl fmt::Display for ElementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
