use std::path::Path;

use acordex::core::{AcordexError, Extractor};
use acordex::eval::{compare_extractions, evaluate, format_comparison, format_report};
use acordex::extract::ScriptedExtractor;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), AcordexError> {
    let ground_truth = json!({
        "named_insured": "ACME Corporation",
        "premises_information": [
            {
                "premises_number": "1",
                "street_address": "123 Main Street, Springfield",
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
    });

    // two extraction runs of the same form, scripted instead of calling a model
    let first_run = json!({
        "named_insured": "ACME Corp.",
        "premises_information": [
            {
                "premises_number": "1",
                "street_address": "123 Main St, Springfield",
                "building_number": "A",
                "coverage_information": [
                    {
                        "Subject_of_insurance": "Building",
                        "amount": "500,000.00",
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
    });
    let mut second_run = first_run.clone();
    second_run["named_insured"] = json!("ACME Incorporated");

    let extractor = ScriptedExtractor::new(vec![first_run, second_run]);
    let document = Path::new("samples/ACORD-125-sample.pdf");

    // --- Validation against ground truth ---
    let extraction = extractor.extract(document).await?;
    let report = evaluate(&extraction, &ground_truth)?;
    print!("{}", format_report(&report, true));

    // --- Agreement between two runs ---
    let repeat = extractor.extract(document).await?;
    let comparison = compare_extractions(&extraction, &repeat, "run-1", "run-2")?;
    print!("{}", format_comparison(&comparison));

    Ok(())
}
