use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for the Acordex workspace with variants covering all subsystems.
#[derive(Debug, Error)]
pub enum AcordexError {
    /// A record had the wrong shape at the named field path. Raised instead of
    /// silently coercing containers to strings.
    #[error("invalid input at {path}: {reason}")]
    InvalidInput { path: String, reason: String },
    #[error("parsing error: {0}")]
    Parsing(String),
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("ground truth error: {0}")]
    GroundTruth(String),
    #[error("config error: {0}")]
    Config(String),
}

impl AcordexError {
    /// Shorthand for an `InvalidInput` error at a field path.
    pub fn invalid_input(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AcordexError::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction record model
// ---------------------------------------------------------------------------

/// A coverage line item within a premises entry.
///
/// `amount` and `deductible` are currency-formatted strings (e.g. "$500000.00");
/// the evaluation layer strips formatting before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Coverage {
    #[serde(
        rename = "Subject_of_insurance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subject_of_insurance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<String>,
}

/// A premises entry on an ACORD form, with its coverage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Premises {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premises_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage_information: Vec<Coverage>,
}

/// The structured data extracted from one ACORD form.
///
/// Every field is optional; a missing field and an empty value are treated
/// identically as "absent" by the evaluation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExtractionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_insured: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_insured: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub premises_information: Vec<Premises>,
}

impl ExtractionRecord {
    /// Parse a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AcordexError> {
        serde_json::from_str(json).map_err(|e| AcordexError::Parsing(format!("invalid JSON: {e}")))
    }

    /// Parse a record from an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, AcordexError> {
        serde_json::from_value(value.clone())
            .map_err(|e| AcordexError::Parsing(format!("record does not match schema: {e}")))
    }

    /// Convert this record into a JSON value for comparison.
    pub fn to_value(&self) -> Result<Value, AcordexError> {
        serde_json::to_value(self).map_err(|e| AcordexError::Parsing(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Extractor trait (forward-declared here, implementations in acordex-extract)
// ---------------------------------------------------------------------------

/// A collaborator that produces one extracted record per source document.
///
/// The production implementation calls a multimodal model over the document;
/// that lives outside this workspace. In-tree implementations replay
/// pre-computed extraction runs from disk or from a scripted queue.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract structured field data from the document at `document`.
    ///
    /// Returns the raw JSON record; callers validate its shape at the
    /// evaluation boundary.
    async fn extract(&self, document: &Path) -> Result<Value, AcordexError>;
}
