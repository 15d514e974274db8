//! Heuristics for telling hand-written identifiers apart from generated ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// Digit runs, double underscores, bracketed indices and hex hashes
static GENERATED_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2,}|__|\[\d+\]|[a-f0-9]{8}").unwrap());

/// Numbered layout helpers such as `row3` or `wrapper1`
static NUMBERED_LAYOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(row|col|btn|container|wrapper)\d+$").unwrap());

/// Judges whether a value is likely to survive re-renders.
pub trait StabilityClassifier {
    fn is_static(&self, value: &str) -> bool;
}

impl<F> StabilityClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_static(&self, value: &str) -> bool {
        self(value)
    }
}

/// Default regex-based classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl StabilityClassifier for HeuristicClassifier {
    fn is_static(&self, value: &str) -> bool {
        is_static(value)
    }
}

/// `true` when `value` looks hand-authored
pub fn is_static(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if GENERATED_FRAGMENT.is_match(value) {
        return false;
    }
    if value.starts_with(':') || value.chars().count() < 3 {
        return false;
    }
    !NUMBERED_LAYOUT.is_match(value)
}
