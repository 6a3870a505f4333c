use acordex_eval::{
    compare_extractions, evaluate, format_batch_summary, format_comparison, format_report,
};
use serde_json::json;

fn extraction_a() -> serde_json::Value {
    json!({
        "named_insured": "ACME Corp",
        "premises_information": [
            {
                "premises_number": "1",
                "street_address": "123 Main St",
                "building_number": "A",
                "coverage_information": [
                    {"Subject_of_insurance": "Building", "amount": "$500000.00", "deductible": "$1000.00"}
                ]
            }
        ]
    })
}

fn extraction_b() -> serde_json::Value {
    let mut value = extraction_a();
    value["premises_information"][0]["coverage_information"][0]["amount"] = json!("$750.00");
    value
}

#[test]
fn verbose_report_lists_every_field() {
    let report = evaluate(&extraction_a(), &extraction_b()).unwrap();
    let text = format_report(&report, true);

    assert!(text.contains("ACORD EXTRACTION EVALUATION REPORT"));
    assert!(text.contains("Accuracy:"));
    assert!(text.contains("✓ named_insured"));
    assert!(text.contains("✗ premises[0].coverage[0].amount"));
    // expected/extracted values are shown for the mismatch only
    assert!(text.contains("Expected:   $750.00"));
    assert!(text.contains("Extracted:  $500000.00"));
}

#[test]
fn terse_report_omits_the_field_breakdown() {
    let report = evaluate(&extraction_a(), &extraction_a()).unwrap();
    let text = format_report(&report, false);

    assert!(text.contains("Total Fields:"));
    assert!(!text.contains("Field-by-Field Results:"));
}

#[test]
fn identical_runs_agree_completely() {
    let comparison =
        compare_extractions(&extraction_a(), &extraction_a(), "run-a", "run-b").unwrap();

    assert_eq!(comparison.comparison, "run-a vs run-b");
    assert_eq!(comparison.agreement_score, 1.0);
    assert_eq!(comparison.differing_fields, 0);
    assert_eq!(comparison.matching_fields, comparison.total_fields);
    assert_eq!(comparison.summary.agreement_percentage, "100.00%");
}

#[test]
fn differing_runs_report_the_disagreement() {
    let comparison =
        compare_extractions(&extraction_a(), &extraction_b(), "run-a", "run-b").unwrap();

    assert!(comparison.differing_fields > 0);
    assert!(comparison.agreement_score < 1.0);

    let text = format_comparison(&comparison);
    assert!(text.contains("EXTRACTION COMPARISON: run-a vs run-b"));
    assert!(text.contains("Field Differences:"));
    assert!(text.contains("run-a: $500000.00"));
    assert!(text.contains("run-b: $750.00"));
}

#[test]
fn comparison_report_serializes_with_summary_strings() {
    let comparison =
        compare_extractions(&extraction_a(), &extraction_b(), "run-a", "run-b").unwrap();
    let as_json = serde_json::to_value(&comparison).unwrap();

    assert!(as_json["summary"]["agreement_percentage"]
        .as_str()
        .unwrap()
        .ends_with('%'));
    assert!(as_json["details"].is_array());
}

#[test]
fn batch_summary_averages_across_files() {
    let perfect = evaluate(&extraction_a(), &extraction_a()).unwrap();
    let degraded = evaluate(&extraction_a(), &extraction_b()).unwrap();
    let text = format_batch_summary(&[
        ("ACORD-125-sample.json".to_string(), perfect),
        ("ACORD-126-sample.json".to_string(), degraded),
    ]);

    assert!(text.contains("BATCH VALIDATION SUMMARY"));
    assert!(text.contains("Average Metrics Across 2 Files:"));
    assert!(text.contains("ACORD-125-sample.json"));
    assert!(text.contains("ACORD-126-sample.json"));
}

#[test]
fn empty_batch_summary_is_harmless() {
    assert_eq!(format_batch_summary(&[]), "No files validated.\n");
}
