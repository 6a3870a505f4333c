use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use acordex_core::AcordexError;

/// Directory of manually verified reference records, one JSON file per
/// source document, keyed by the document's file stem
/// (`ACORD-125.pdf` → `<dir>/ACORD-125.json`).
pub struct GroundTruthStore {
    dir: PathBuf,
}

impl GroundTruthStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ground-truth file path for a document.
    pub fn path_for(&self, document: &Path) -> Result<PathBuf, AcordexError> {
        let stem = document.file_stem().ok_or_else(|| {
            AcordexError::GroundTruth(format!(
                "cannot derive a ground-truth name from {}",
                document.display()
            ))
        })?;
        let mut path = self.dir.join(stem);
        path.set_extension("json");
        Ok(path)
    }

    pub async fn exists(&self, document: &Path) -> bool {
        match self.path_for(document) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Load the reference record for a document.
    pub async fn load(&self, document: &Path) -> Result<Value, AcordexError> {
        let path = self.path_for(document)?;
        debug!(path = %path.display(), "loading ground truth");

        let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AcordexError::GroundTruth(format!("cannot read {}: {e}", path.display()))
        })?;

        serde_json::from_str(&json).map_err(|e| {
            AcordexError::Parsing(format!("invalid JSON in {}: {e}", path.display()))
        })
    }

    /// Save a reference record for a document, creating the store directory
    /// if needed. Refuses to replace an existing file unless `overwrite` is
    /// set.
    pub async fn save(
        &self,
        document: &Path,
        record: &Value,
        overwrite: bool,
    ) -> Result<PathBuf, AcordexError> {
        let path = self.path_for(document)?;

        if !overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AcordexError::GroundTruth(format!(
                "{} already exists, pass overwrite to replace it",
                path.display()
            )));
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AcordexError::GroundTruth(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| AcordexError::Parsing(e.to_string()))?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            AcordexError::GroundTruth(format!("cannot write {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), "ground truth saved");
        Ok(path)
    }

    /// All ground-truth files in the store, sorted by name.
    pub async fn list(&self) -> Result<Vec<PathBuf>, AcordexError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            AcordexError::GroundTruth(format!("cannot read {}: {e}", self.dir.display()))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AcordexError::GroundTruth(format!("directory entry error: {e}"))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}
