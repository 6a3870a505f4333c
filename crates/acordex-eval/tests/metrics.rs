use acordex_core::AcordexError;
use acordex_eval::{evaluate, evaluate_with_threshold, MetricsReport};
use serde_json::{json, Value};

fn sample_record() -> Value {
    json!({
        "named_insured": "ACME Corp",
        "secondary_insured": "ACME Holdings",
        "alternate_name": "ACME",
        "premises_information": [
            {
                "premises_number": "1",
                "street_address": "123 Main St, Springfield",
                "building_number": "A",
                "coverage_information": [
                    {
                        "Subject_of_insurance": "Building",
                        "amount": "$500000.00",
                        "deductible": "$1000.00"
                    },
                    {
                        "Subject_of_insurance": "Business Personal Property",
                        "amount": "$250000.00",
                        "deductible": "$500.00"
                    }
                ]
            }
        ]
    })
}

#[test]
fn self_evaluation_is_perfect() {
    let record = sample_record();
    let report = evaluate(&record, &record).unwrap();

    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.avg_similarity, 1.0);
    assert_eq!(report.correct_fields, report.total_fields);
    assert_eq!(report.incorrect_fields, 0);
}

#[test]
fn schema_walk_produces_one_result_per_field() {
    let record = sample_record();
    let report = evaluate(&record, &record).unwrap();

    // 3 top-level + 3 premises + 2 coverage entries * 3 fields
    assert_eq!(report.total_fields, 12);
    assert_eq!(
        report.field_metrics[0].field, "named_insured",
        "top-level fields come first"
    );
    assert_eq!(report.field_metrics[3].field, "premises[0].premises_number");
    assert_eq!(
        report.field_metrics[9].field,
        "premises[0].coverage[1].Subject_of_insurance"
    );
}

#[test]
fn traversal_order_is_deterministic() {
    let extracted = sample_record();
    let ground_truth = sample_record();

    let a = evaluate(&extracted, &ground_truth).unwrap();
    let b = evaluate(&extracted, &ground_truth).unwrap();
    let paths_a: Vec<&str> = a.field_metrics.iter().map(|r| r.field.as_str()).collect();
    let paths_b: Vec<&str> = b.field_metrics.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(paths_a, paths_b);
}

#[test]
fn internal_whitespace_difference_still_matches() {
    let extracted = json!({"named_insured": "John Doe", "premises_information": []});
    let ground_truth = json!({"named_insured": "John  Doe", "premises_information": []});

    let report = evaluate(&extracted, &ground_truth).unwrap();

    assert_eq!(report.total_fields, 3);
    let named = &report.field_metrics[0];
    assert!(named.is_match);
    assert!(named.similarity >= 0.9);
    assert!(named.similarity < 1.0);
    // the two absent fields compare null-to-null
    assert_eq!(report.accuracy, 1.0);
}

#[test]
fn currency_formatting_differences_are_equivalent() {
    let mut extracted = sample_record();
    extracted["premises_information"][0]["coverage_information"][0]["amount"] =
        json!("500,000.00");

    let report = evaluate(&extracted, &sample_record()).unwrap();

    let amount = report
        .field_metrics
        .iter()
        .find(|r| r.field == "premises[0].coverage[0].amount")
        .unwrap();
    assert!(amount.is_match);
    assert_eq!(amount.similarity, 1.0);
    assert_eq!(report.accuracy, 1.0);
}

#[test]
fn mismatched_premises_counts_skip_the_whole_section() {
    let mut extracted = sample_record();
    let second = extracted["premises_information"][0].clone();
    extracted["premises_information"]
        .as_array_mut()
        .unwrap()
        .push(second);

    let report = evaluate(&extracted, &sample_record()).unwrap();

    // only the top-level scalars remain
    assert_eq!(report.total_fields, 3);
    assert!(report
        .field_metrics
        .iter()
        .all(|r| !r.field.starts_with("premises")));
}

#[test]
fn mismatched_coverage_counts_skip_only_that_coverage_table() {
    let mut extracted = sample_record();
    extracted["premises_information"][0]["coverage_information"]
        .as_array_mut()
        .unwrap()
        .pop();

    let report = evaluate(&extracted, &sample_record()).unwrap();

    // 3 top-level + 3 premises scalars, no coverage results
    assert_eq!(report.total_fields, 6);
    assert!(report
        .field_metrics
        .iter()
        .all(|r| !r.field.contains("coverage")));
}

#[test]
fn incorrect_field_degrades_accuracy_and_f1() {
    let mut extracted = sample_record();
    extracted["named_insured"] = json!("Completely Different Inc");

    let report = evaluate(&extracted, &sample_record()).unwrap();

    assert_eq!(report.total_fields, 12);
    assert_eq!(report.correct_fields, 11);
    assert_eq!(report.incorrect_fields, 1);
    assert!((report.accuracy - 11.0 / 12.0).abs() < 1e-12);
    assert_eq!(report.precision, report.accuracy);
    assert_eq!(report.recall, 1.0);
    let expected_f1 = 2.0 * report.precision / (report.precision + 1.0);
    assert!((report.f1_score - expected_f1).abs() < 1e-12);
}

#[test]
fn zero_fields_hit_the_documented_defaults() {
    let report = MetricsReport::from_results(vec![]);

    assert_eq!(report.total_fields, 0);
    assert_eq!(report.accuracy, 0.0);
    assert_eq!(report.avg_similarity, 0.0);
    assert_eq!(report.precision, 0.0);
    assert_eq!(report.recall, 1.0);
    // precision 0 forces F1 to 0 despite recall 1.0
    assert_eq!(report.f1_score, 0.0);
    assert_eq!(report.summary.accuracy_percentage, "0.00%");
    assert_eq!(report.summary.recall_percentage, "100.00%");
    assert_eq!(report.summary.f1_score_percentage, "0.00%");
}

#[test]
fn summary_percentages_are_formatted_strings() {
    let record = sample_record();
    let report = evaluate(&record, &record).unwrap();

    assert_eq!(report.summary.accuracy_percentage, "100.00%");
    assert_eq!(report.summary.avg_similarity_percentage, "100.00%");

    let as_json = serde_json::to_value(&report).unwrap();
    assert_eq!(as_json["summary"]["accuracy_percentage"], "100.00%");
    assert!(as_json["field_metrics"].as_array().unwrap().len() == 12);
}

#[test]
fn stricter_threshold_flips_borderline_fields() {
    let extracted = json!({"named_insured": "John Doe"});
    let ground_truth = json!({"named_insured": "John  Doe"});

    let loose = evaluate_with_threshold(&extracted, &ground_truth, 0.9).unwrap();
    assert!(loose.field_metrics[0].is_match);

    let strict = evaluate_with_threshold(&extracted, &ground_truth, 0.95).unwrap();
    assert!(!strict.field_metrics[0].is_match);
}

#[test]
fn non_record_top_level_fails_fast() {
    let err = evaluate(&json!("not a record"), &json!({})).unwrap_err();
    assert!(matches!(err, AcordexError::InvalidInput { .. }));

    let err = evaluate(&json!({}), &json!([1, 2])).unwrap_err();
    assert!(matches!(err, AcordexError::InvalidInput { .. }));
}

#[test]
fn non_array_premises_fails_fast() {
    let extracted = json!({"premises_information": "oops"});
    let err = evaluate(&extracted, &json!({})).unwrap_err();
    match err {
        AcordexError::InvalidInput { path, .. } => {
            assert_eq!(path, "extracted.premises_information");
        }
        other => panic!("expected InvalidInput, got {other}"),
    }
}

#[test]
fn wrong_leaf_type_names_the_field_path() {
    let extracted = json!({"named_insured": {"first": "John"}});
    let ground_truth = json!({"named_insured": "John Doe"});

    let err = evaluate(&extracted, &ground_truth).unwrap_err();
    match err {
        AcordexError::InvalidInput { path, .. } => assert_eq!(path, "named_insured"),
        other => panic!("expected InvalidInput, got {other}"),
    }
}

#[test]
fn absent_and_null_premises_are_equivalent() {
    let extracted = json!({"named_insured": "ACME Corp"});
    let ground_truth = json!({"named_insured": "ACME Corp", "premises_information": null});

    let report = evaluate(&extracted, &ground_truth).unwrap();
    assert_eq!(report.total_fields, 3);
    assert_eq!(report.accuracy, 1.0);
}
