//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. The ellipsis is appended after `max_len`
/// bytes of content, so the result may be up to `max_len + 3` bytes.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", truncate_str(s, max_len))
    }
}

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Count whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
