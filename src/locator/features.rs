//! Identifying features of a single element and the predicates built from
//! them.

use super::SelectorEngine;
use super::stability::StabilityClassifier;
use crate::dom::NodeId;
use crate::xpath::literal::{prefix, quote};

/// `tag[text()="..."]`
pub(crate) fn exact_text_step(tag: &str, text: &str) -> String {
    format!("{}[text()={}]", tag, quote(text))
}

/// `tag[contains(text(),"...")]` on the first `max_chars` characters
pub(crate) fn contains_text_step(tag: &str, text: &str, max_chars: usize) -> String {
    format!("{}[contains(text(),{})]", tag, quote(prefix(text, max_chars)))
}

/// `tag[@name="..."]`
pub(crate) fn attribute_step(tag: &str, name: &str, value: &str) -> String {
    format!("{}[@{}={}]", tag, name, quote(value))
}

impl<C: StabilityClassifier> SelectorEngine<'_, C> {
    pub(crate) fn tag(&self, node: NodeId) -> &str {
        self.document.tag_name(node).unwrap_or("*")
    }

    /// Trimmed text of a text-bearing element, if shorter than `limit`
    /// characters and not empty.
    pub(crate) fn text_below(&self, node: NodeId, limit: usize) -> Option<String> {
        let tag = self.document.tag_name(node)?;
        if !self.options.is_text_tag(tag) {
            return None;
        }
        let text = self.document.text_content(node).trim().to_string();
        let len = text.chars().count();
        (len > 0 && len < limit).then_some(text)
    }

    /// Text usable as a standalone identifier: short, stable and held whole
    /// by one of the element's own text nodes, so that `text()=` selects it.
    pub(crate) fn stable_text(&self, node: NodeId) -> Option<String> {
        self.text_below(node, self.options.max_exact_text_len)
            .filter(|text| self.classifier.is_static(text))
            .filter(|text| self.document.own_text(node).any(|run| run == text.as_str()))
    }

    /// Stable attributes in priority order: `id`, `placeholder`, then the
    /// configured list.
    pub(crate) fn stable_attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        let attributes = self.document.attributes(node);
        ["id", "placeholder"]
            .into_iter()
            .chain(self.options.priority_attributes.iter().map(String::as_str))
            .filter_map(move |name| attributes?.get_key_value(name))
            .filter(move |(_, value)| self.classifier.is_static(value))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) fn stable_attribute(&self, node: NodeId) -> Option<(&str, &str)> {
        self.stable_attributes(node).next()
    }

    /// `tag[n]` among same-tag siblings, or the bare tag when it is the only
    /// one.
    pub(crate) fn positional_step(&self, node: NodeId) -> String {
        let tag = self.tag(node);
        let (position, count) = self.document.same_tag_position(node);
        if count > 1 {
            format!("{}[{}]", tag, position)
        } else {
            tag.to_string()
        }
    }
}
