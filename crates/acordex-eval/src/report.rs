use std::fmt::Write;

use acordex_core::AcordexError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metrics::{evaluate, FieldResult, MetricsReport};

const RULE: &str =
    "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Agreement between two extraction runs of the same document.
///
/// Produced by [`compare_extractions`], which scores one run against the
/// other: `agreement_score` is the share of schema fields the runs agree on,
/// not a correctness measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparison: String,
    pub label_a: String,
    pub label_b: String,
    pub agreement_score: f64,
    pub similarity_score: f64,
    pub matching_fields: usize,
    pub differing_fields: usize,
    pub total_fields: usize,
    pub details: Vec<FieldResult>,
    pub summary: ComparisonSummary,
}

/// Percentage renderings of the comparison scores, formatted `"NN.NN%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub agreement_percentage: String,
    pub similarity_percentage: String,
}

/// Measure how much two extraction runs agree, treating the second as the
/// reference for the first.
pub fn compare_extractions(
    extraction_a: &Value,
    extraction_b: &Value,
    label_a: &str,
    label_b: &str,
) -> Result<ComparisonReport, AcordexError> {
    let metrics = evaluate(extraction_a, extraction_b)?;

    Ok(ComparisonReport {
        comparison: format!("{label_a} vs {label_b}"),
        label_a: label_a.to_string(),
        label_b: label_b.to_string(),
        agreement_score: metrics.accuracy,
        similarity_score: metrics.avg_similarity,
        matching_fields: metrics.correct_fields,
        differing_fields: metrics.incorrect_fields,
        total_fields: metrics.total_fields,
        details: metrics.field_metrics,
        summary: ComparisonSummary {
            agreement_percentage: metrics.summary.accuracy_percentage,
            similarity_percentage: metrics.summary.avg_similarity_percentage,
        },
    })
}

/// Render an evaluation report as display text.
///
/// With `verbose`, every field gets its own line; expected and extracted
/// values are shown only for mismatches.
pub fn format_report(report: &MetricsReport, verbose: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "ACORD EXTRACTION EVALUATION REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Overall Metrics:");
    let _ = writeln!(out, "   Accuracy:    {}", report.summary.accuracy_percentage);
    let _ = writeln!(out, "   Precision:   {}", report.summary.precision_percentage);
    let _ = writeln!(out, "   Recall:      {}", report.summary.recall_percentage);
    let _ = writeln!(out, "   F1 Score:    {}", report.summary.f1_score_percentage);
    let _ = writeln!(
        out,
        "   Similarity:  {}",
        report.summary.avg_similarity_percentage
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Field Statistics:");
    let _ = writeln!(out, "   Total Fields:     {}", report.total_fields);
    let _ = writeln!(out, "   Correct Fields:   {}", report.correct_fields);
    let _ = writeln!(out, "   Incorrect Fields: {}", report.incorrect_fields);

    if verbose && !report.field_metrics.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Field-by-Field Results:");
        let _ = writeln!(out, "{THIN_RULE}");
        for result in &report.field_metrics {
            let status = if result.is_match { "✓" } else { "✗" };
            let _ = writeln!(out);
            let _ = writeln!(out, "{status} {}", result.field);
            let _ = writeln!(out, "   Similarity: {:.1}%", result.similarity * 100.0);
            if !result.is_match {
                let _ = writeln!(out, "   Expected:   {}", value_text(&result.expected));
                let _ = writeln!(out, "   Extracted:  {}", value_text(&result.extracted));
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    out
}

/// Render a two-run comparison as display text, listing every differing field
/// with both runs' values.
pub fn format_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "EXTRACTION COMPARISON: {}", report.comparison);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "   Agreement:  {}",
        report.summary.agreement_percentage
    );
    let _ = writeln!(
        out,
        "   Similarity: {}",
        report.summary.similarity_percentage
    );
    let _ = writeln!(out, "   Matching Fields:   {}", report.matching_fields);
    let _ = writeln!(out, "   Differing Fields:  {}", report.differing_fields);

    if report.differing_fields > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Field Differences:");
        let _ = writeln!(out, "{THIN_RULE}");
        for detail in report.details.iter().filter(|d| !d.is_match) {
            let _ = writeln!(out);
            let _ = writeln!(out, "✗ {}", detail.field);
            let _ = writeln!(out, "   {}: {}", report.label_a, value_text(&detail.extracted));
            let _ = writeln!(out, "   {}: {}", report.label_b, value_text(&detail.expected));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    out
}

/// Render the batch-validation summary: averaged metrics over all files plus
/// one accuracy/F1 row per file.
pub fn format_batch_summary(results: &[(String, MetricsReport)]) -> String {
    if results.is_empty() {
        return "No files validated.\n".to_string();
    }

    let count = results.len() as f64;
    let avg_accuracy = results.iter().map(|(_, m)| m.accuracy).sum::<f64>() / count;
    let avg_f1 = results.iter().map(|(_, m)| m.f1_score).sum::<f64>() / count;
    let avg_similarity = results.iter().map(|(_, m)| m.avg_similarity).sum::<f64>() / count;

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "BATCH VALIDATION SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Average Metrics Across {} Files:", results.len());
    let _ = writeln!(out, "   Accuracy:   {:.2}%", avg_accuracy * 100.0);
    let _ = writeln!(out, "   F1 Score:   {:.2}%", avg_f1 * 100.0);
    let _ = writeln!(out, "   Similarity: {:.2}%", avg_similarity * 100.0);
    let _ = writeln!(out);
    let _ = writeln!(out, "Per-File Results:");
    let _ = writeln!(out, "{THIN_RULE}");
    for (file, metrics) in results {
        let _ = writeln!(
            out,
            "{file:30} | Accuracy: {:6.2}% | F1: {:6.2}%",
            metrics.accuracy * 100.0,
            metrics.f1_score * 100.0
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    out
}

/// Display a field value without JSON string quoting.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
