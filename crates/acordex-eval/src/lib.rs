mod compare;
mod metrics;
mod normalize;
mod report;
mod similarity;

pub use compare::{compare_values, FieldComparison, DEFAULT_THRESHOLD};
pub use metrics::{
    evaluate, evaluate_with_threshold, FieldResult, MetricsReport, MetricsSummary,
    COVERAGE_FIELDS, PREMISES_FIELDS, TOP_LEVEL_FIELDS,
};
pub use normalize::{normalize, normalize_value};
pub use report::{
    compare_extractions, format_batch_summary, format_comparison, format_report,
    ComparisonReport, ComparisonSummary,
};
pub use similarity::string_similarity;
