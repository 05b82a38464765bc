//! Low-level extraction of structure embedded in free-form model text.
//!
//! Every function here is total: malformed input yields `None` or an empty
//! collection, never an error. Callers decide the fallback.

use serde::de::DeserializeOwned;

/// The slice between the first `open` and the last `close`, inclusive.
fn span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the outermost JSON array embedded in `text`.
pub fn json_array<T: DeserializeOwned>(text: &str) -> Option<Vec<T>> {
    serde_json::from_str(span(text, '[', ']')?).ok()
}

/// Parse the outermost JSON object embedded in `text`.
pub fn json_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(span(text, '{', '}')?).ok()
}

/// Parse an embedded JSON array element by element, keeping the elements
/// that deserialize as `T` and skipping the rest.
pub fn json_array_lenient<T: DeserializeOwned>(text: &str) -> Vec<T> {
    json_array::<serde_json::Value>(text)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

/// Split `|`-delimited lines, keeping those with at least `min_fields`
/// fields. Fields are trimmed; extra fields are kept.
pub fn delimited_rows(text: &str, min_fields: usize) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| line.contains('|'))
        .map(|line| line.split('|').map(|f| f.trim().to_string()).collect::<Vec<_>>())
        .filter(|fields| fields.len() >= min_fields)
        .collect()
}

/// Value of the first line starting with `label` (e.g. `"TITLE:"`).
pub fn labeled_value(text: &str, label: &str) -> Option<String> {
    text.lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix(label))
        .map(|value| value.trim().to_string())
}

/// Trimmed lines longer than `min_chars` characters, at most `max` of them.
pub fn lines_longer_than(text: &str, min_chars: usize, max: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().count() > min_chars)
        .take(max)
        .map(str::to_string)
        .collect()
}
