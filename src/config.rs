use serde::{Deserialize, Serialize};

/// Tags whose text content is used as an identifying feature
pub const DEFAULT_TEXT_TAGS: &[&str] = &[
    "a", "button", "h1", "h2", "h3", "h4", "h5", "h6", "label", "li", "p", "span", "td", "th",
];

/// Attributes tried after `id` and `placeholder`, in this order
pub const DEFAULT_PRIORITY_ATTRIBUTES: &[&str] = &[
    "name",
    "class",
    "aria-label",
    "data-testid",
    "data-id",
    "role",
    "title",
];

/// Tuning knobs for selector inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceOptions {
    /// Ancestor hops searched for an anchor (default: 4)
    pub max_anchor_hops: usize,

    /// Elements walked by the full-path builder (default: 8)
    pub max_full_path_depth: usize,

    /// Text must be shorter than this to be used at all (default: 100)
    pub max_text_len: usize,

    /// Text must be shorter than this for exact matching (default: 50)
    pub max_exact_text_len: usize,

    /// Characters kept for `contains()` matching (default: 40)
    pub contains_prefix_len: usize,

    /// Text-bearing tags
    pub text_tags: Vec<String>,

    /// Attributes tried after `id` and `placeholder`
    pub priority_attributes: Vec<String>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            max_anchor_hops: 4,
            max_full_path_depth: 8,
            max_text_len: 100,
            max_exact_text_len: 50,
            contains_prefix_len: 40,
            text_tags: DEFAULT_TEXT_TAGS.iter().map(|t| t.to_string()).collect(),
            priority_attributes: DEFAULT_PRIORITY_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl InferenceOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor search bound
    pub fn max_anchor_hops(mut self, hops: usize) -> Self {
        self.max_anchor_hops = hops;
        self
    }

    /// Set the full-path depth bound
    pub fn max_full_path_depth(mut self, depth: usize) -> Self {
        self.max_full_path_depth = depth;
        self
    }

    /// Set the text length limits
    pub fn text_limits(mut self, max_text_len: usize, max_exact_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self.max_exact_text_len = max_exact_text_len;
        self
    }

    /// Set the `contains()` prefix length
    pub fn contains_prefix_len(mut self, len: usize) -> Self {
        self.contains_prefix_len = len;
        self
    }

    /// Replace the attribute priority list
    pub fn priority_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the text-bearing tag set
    pub fn text_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_text_tag(&self, tag: &str) -> bool {
        self.text_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
