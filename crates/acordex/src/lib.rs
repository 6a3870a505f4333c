//! Acordex — ACORD insurance-form extraction validation.
//!
//! This crate re-exports the Acordex sub-crates for convenient single-import
//! usage.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use acordex::core::ExtractionRecord;
//! use acordex::eval::{evaluate, format_report};
//!
//! let report = evaluate(&extracted, &ground_truth)?;
//! println!("{}", format_report(&report, true));
//! ```

/// Core types: AcordexError, the extraction record model, and the Extractor trait.
pub use acordex_core as core;

/// Scoring: value normalization, string similarity, structural comparison,
/// metrics aggregation, report formatting.
pub use acordex_eval as eval;

/// Extraction collaborators: FileExtractor, ScriptedExtractor, GroundTruthStore.
pub use acordex_extract as extract;
