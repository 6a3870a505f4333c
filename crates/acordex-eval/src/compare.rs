use acordex_core::AcordexError;
use serde_json::Value;

use crate::similarity::string_similarity;

/// Minimum similarity at which a field counts as matching.
pub const DEFAULT_THRESHOLD: f64 = 0.9;

/// Outcome of comparing one extracted value against its expected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldComparison {
    pub is_match: bool,
    pub similarity: f64,
}

impl FieldComparison {
    fn matched() -> Self {
        Self {
            is_match: true,
            similarity: 1.0,
        }
    }

    fn mismatched() -> Self {
        Self {
            is_match: false,
            similarity: 0.0,
        }
    }
}

/// Recursively compare an extracted value against its ground-truth value.
///
/// Nulls match nulls and nothing else. Sequences match when their lengths
/// match; element contents are not inspected for equal-length non-empty
/// sequences. Records score the average child similarity over the
/// ground-truth keys: a key missing from the extraction contributes zero,
/// and keys only present in the extraction are ignored. Scalars are scored
/// by [`string_similarity`].
///
/// A container on one side and a scalar on the other is a shape error, not a
/// mismatch: it returns [`AcordexError::InvalidInput`] naming `path`.
pub fn compare_values(
    extracted: &Value,
    ground_truth: &Value,
    threshold: f64,
    path: &str,
) -> Result<FieldComparison, AcordexError> {
    match (extracted, ground_truth) {
        (Value::Null, Value::Null) => Ok(FieldComparison::matched()),
        (Value::Null, _) | (_, Value::Null) => Ok(FieldComparison::mismatched()),
        (Value::Array(ext), Value::Array(truth)) => {
            if ext.len() != truth.len() {
                return Ok(FieldComparison::mismatched());
            }
            // Equal-length sequences are taken as matching wholesale; element
            // contents are not inspected.
            Ok(FieldComparison::matched())
        }
        (Value::Object(ext), Value::Object(truth)) => {
            if truth.is_empty() {
                return Ok(FieldComparison::matched());
            }
            let mut total_similarity = 0.0;
            for (key, truth_value) in truth {
                if let Some(ext_value) = ext.get(key) {
                    let child =
                        compare_values(ext_value, truth_value, threshold, &child_path(path, key))?;
                    total_similarity += child.similarity;
                }
                // a key missing from the extraction contributes zero similarity
            }
            let similarity = total_similarity / truth.len() as f64;
            Ok(FieldComparison {
                is_match: similarity >= threshold,
                similarity,
            })
        }
        (ext, truth) if is_scalar(ext) && is_scalar(truth) => {
            let similarity = string_similarity(&scalar_text(ext), &scalar_text(truth));
            Ok(FieldComparison {
                is_match: similarity >= threshold,
                similarity,
            })
        }
        (ext, truth) => Err(AcordexError::invalid_input(
            path,
            format!(
                "cannot compare {} against {}",
                value_kind(ext),
                value_kind(truth)
            ),
        )),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_) | Value::Number(_) | Value::Bool(_)
    )
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
