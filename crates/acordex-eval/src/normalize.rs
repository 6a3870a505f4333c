use serde_json::Value;

/// Canonicalize text for comparison: trim, lowercase, and strip `$` and `,`
/// so differently formatted currency amounts compare equal.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(['$', ','], "")
}

/// Canonicalize a field value for comparison.
///
/// `Null` maps to the empty string. Everything else is rendered as text and
/// normalized. Total over any value.
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => normalize(s),
        other => normalize(&other.to_string()),
    }
}
