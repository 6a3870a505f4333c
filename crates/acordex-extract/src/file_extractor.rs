use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use acordex_core::{AcordexError, Extractor};

/// Replays a pre-computed extraction run from disk.
///
/// For a document `samples/ACORD-125.pdf` the extractor reads the sidecar
/// file `samples/ACORD-125.json`, or `<dir>/ACORD-125.json` when an
/// extraction directory is configured. This stands in for the hosted model
/// call in environments where extraction output has already been captured.
pub struct FileExtractor {
    extraction_dir: Option<PathBuf>,
}

impl FileExtractor {
    pub fn new() -> Self {
        Self {
            extraction_dir: None,
        }
    }

    /// Resolve sidecar files in `dir` instead of next to each document.
    pub fn with_extraction_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extraction_dir = Some(dir.into());
        self
    }

    fn sidecar_path(&self, document: &Path) -> PathBuf {
        let mut path = match &self.extraction_dir {
            Some(dir) => dir.join(document.file_name().unwrap_or_default()),
            None => document.to_path_buf(),
        };
        path.set_extension("json");
        path
    }
}

impl Default for FileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for FileExtractor {
    async fn extract(&self, document: &Path) -> Result<Value, AcordexError> {
        let path = self.sidecar_path(document);
        debug!(
            document = %document.display(),
            sidecar = %path.display(),
            "loading extraction sidecar"
        );

        let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AcordexError::Extraction(format!("cannot read {}: {e}", path.display()))
        })?;

        serde_json::from_str(&json).map_err(|e| {
            AcordexError::Parsing(format!("invalid JSON in {}: {e}", path.display()))
        })
    }
}
