use acordex_core::AcordexError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::compare::{compare_values, value_kind, DEFAULT_THRESHOLD};

/// Top-level scalar fields every extraction is scored on.
pub const TOP_LEVEL_FIELDS: [&str; 3] = ["named_insured", "secondary_insured", "alternate_name"];

/// Scalar fields scored per premises entry.
pub const PREMISES_FIELDS: [&str; 3] = ["premises_number", "street_address", "building_number"];

/// Fields scored per coverage entry. `Subject_of_insurance` keeps the casing
/// the extraction prompt mandates.
pub const COVERAGE_FIELDS: [&str; 3] = ["Subject_of_insurance", "amount", "deductible"];

/// Score for one schema field. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    /// Schema location, e.g. `premises[0].coverage[1].amount`.
    pub field: String,
    pub is_match: bool,
    pub similarity: f64,
    pub extracted: Value,
    pub expected: Value,
}

/// Percentage renderings of the aggregate metrics, formatted `"NN.NN%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub accuracy_percentage: String,
    pub precision_percentage: String,
    pub recall_percentage: String,
    pub f1_score_percentage: String,
    pub avg_similarity_percentage: String,
}

/// Aggregate scores for one extraction, recomputed fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub avg_similarity: f64,
    pub total_fields: usize,
    pub correct_fields: usize,
    pub incorrect_fields: usize,
    pub field_metrics: Vec<FieldResult>,
    pub summary: MetricsSummary,
}

impl MetricsReport {
    /// Aggregate per-field results into a report.
    ///
    /// With no results at all, accuracy and average similarity default to 0.0
    /// rather than dividing by zero.
    pub fn from_results(field_metrics: Vec<FieldResult>) -> Self {
        let total_fields = field_metrics.len();
        let correct_fields = field_metrics.iter().filter(|r| r.is_match).count();
        let incorrect_fields = total_fields - correct_fields;

        let accuracy = if total_fields > 0 {
            correct_fields as f64 / total_fields as f64
        } else {
            0.0
        };
        let avg_similarity = if total_fields > 0 {
            field_metrics.iter().map(|r| r.similarity).sum::<f64>() / total_fields as f64
        } else {
            0.0
        };

        // Every schema field counts as "extracted": an incorrect value is a
        // false positive and false negatives are not tracked, so the recall
        // term degenerates to its zero-division fallback of 1.0.
        let precision = accuracy;
        let recall = 1.0;
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        let summary = MetricsSummary {
            accuracy_percentage: percentage(accuracy),
            precision_percentage: percentage(precision),
            recall_percentage: percentage(recall),
            f1_score_percentage: percentage(f1_score),
            avg_similarity_percentage: percentage(avg_similarity),
        };

        Self {
            accuracy,
            precision,
            recall,
            f1_score,
            avg_similarity,
            total_fields,
            correct_fields,
            incorrect_fields,
            field_metrics,
            summary,
        }
    }
}

fn percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Score an extracted record against its ground truth with the default
/// match threshold.
pub fn evaluate(extracted: &Value, ground_truth: &Value) -> Result<MetricsReport, AcordexError> {
    evaluate_with_threshold(extracted, ground_truth, DEFAULT_THRESHOLD)
}

/// Score an extracted record against its ground truth.
///
/// Walks the fixed extraction schema in order: the top-level scalar fields,
/// then premises entries pairwise by index, then each premises' coverage
/// entries pairwise by index. When the two sides disagree on how many
/// premises (or coverage) entries exist, that whole section is skipped and
/// produces no field results.
pub fn evaluate_with_threshold(
    extracted: &Value,
    ground_truth: &Value,
    threshold: f64,
) -> Result<MetricsReport, AcordexError> {
    let extracted_record = as_object(extracted, "extracted")?;
    let truth_record = as_object(ground_truth, "ground_truth")?;

    let mut results = Vec::new();

    for field in TOP_LEVEL_FIELDS {
        results.push(score_field(
            extracted_record,
            truth_record,
            field,
            field,
            threshold,
        )?);
    }

    let extracted_premises = entry_array(extracted_record, "premises_information", "extracted")?;
    let truth_premises = entry_array(truth_record, "premises_information", "ground_truth")?;

    if extracted_premises.len() == truth_premises.len() {
        for (i, (ext_entry, truth_entry)) in extracted_premises
            .iter()
            .zip(truth_premises.iter())
            .enumerate()
        {
            let ext_prem = as_object(ext_entry, &format!("extracted.premises_information[{i}]"))?;
            let truth_prem = as_object(truth_entry, &format!("ground_truth.premises_information[{i}]"))?;

            for field in PREMISES_FIELDS {
                results.push(score_field(
                    ext_prem,
                    truth_prem,
                    field,
                    &format!("premises[{i}].{field}"),
                    threshold,
                )?);
            }

            let ext_coverage = entry_array(
                ext_prem,
                "coverage_information",
                &format!("extracted.premises_information[{i}]"),
            )?;
            let truth_coverage = entry_array(
                truth_prem,
                "coverage_information",
                &format!("ground_truth.premises_information[{i}]"),
            )?;

            if ext_coverage.len() == truth_coverage.len() {
                for (j, (ext_cov, truth_cov)) in
                    ext_coverage.iter().zip(truth_coverage.iter()).enumerate()
                {
                    let ext_cov = as_object(
                        ext_cov,
                        &format!("extracted.premises_information[{i}].coverage_information[{j}]"),
                    )?;
                    let truth_cov = as_object(
                        truth_cov,
                        &format!("ground_truth.premises_information[{i}].coverage_information[{j}]"),
                    )?;
                    for field in COVERAGE_FIELDS {
                        results.push(score_field(
                            ext_cov,
                            truth_cov,
                            field,
                            &format!("premises[{i}].coverage[{j}].{field}"),
                            threshold,
                        )?);
                    }
                }
            } else {
                warn!(
                    premises = i,
                    extracted = ext_coverage.len(),
                    expected = truth_coverage.len(),
                    "coverage entry counts differ, skipping coverage comparison"
                );
            }
        }
    } else {
        warn!(
            extracted = extracted_premises.len(),
            expected = truth_premises.len(),
            "premises entry counts differ, skipping premises comparison"
        );
    }

    let report = MetricsReport::from_results(results);
    debug!(
        total_fields = report.total_fields,
        correct_fields = report.correct_fields,
        "extraction evaluated"
    );
    Ok(report)
}

/// Compare one named field of two records. Absent keys compare as null.
fn score_field(
    extracted: &Map<String, Value>,
    ground_truth: &Map<String, Value>,
    field: &str,
    path: &str,
    threshold: f64,
) -> Result<FieldResult, AcordexError> {
    let extracted_value = extracted.get(field).cloned().unwrap_or(Value::Null);
    let expected_value = ground_truth.get(field).cloned().unwrap_or(Value::Null);

    let comparison = compare_values(&extracted_value, &expected_value, threshold, path)?;

    Ok(FieldResult {
        field: path.to_string(),
        is_match: comparison.is_match,
        similarity: comparison.similarity,
        extracted: extracted_value,
        expected: expected_value,
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, AcordexError> {
    value
        .as_object()
        .ok_or_else(|| AcordexError::invalid_input(path, "expected a record"))
}

/// Read an array field from a record. Absent and null are an empty array;
/// any other non-array shape is an input error.
fn entry_array<'a>(
    record: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a [Value], AcordexError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(AcordexError::invalid_input(
            format!("{path}.{field}"),
            format!("expected an array, found {}", value_kind(other)),
        )),
    }
}
