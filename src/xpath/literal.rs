//! Quoting of arbitrary strings as XPath 1.0 string expressions.
//!
//! XPath 1.0 literals have no escape sequences, so a value containing a
//! double quote is split and rebuilt with `concat()`, using `'"'` for each
//! quote character. The output is accepted by any XPath 1.0 engine, browsers
//! included.

/// Render `value` as an XPath expression that evaluates to exactly `value`.
pub fn quote(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let mut parts = Vec::new();
    for (i, segment) in value.split('"').enumerate() {
        if i > 0 {
            parts.push("'\"'".to_string());
        }
        if !segment.is_empty() {
            parts.push(format!("\"{}\"", segment));
        }
    }

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        format!("concat({})", parts.join(", "))
    }
}

/// First `max_chars` characters of `value`, cut on a character boundary.
pub fn prefix(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}
