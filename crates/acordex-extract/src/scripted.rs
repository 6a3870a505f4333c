use std::{collections::VecDeque, path::Path, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use acordex_core::{AcordexError, Extractor};

/// Test double that yields a scripted queue of records, one per call,
/// ignoring the document path.
#[derive(Clone)]
pub struct ScriptedExtractor {
    records: Arc<Mutex<VecDeque<Value>>>,
}

impl ScriptedExtractor {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::from(records))),
        }
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract(&self, _document: &Path) -> Result<Value, AcordexError> {
        let mut records = self.records.lock().await;
        records.pop_front().ok_or_else(|| {
            AcordexError::Extraction("scripted extractor exhausted its records".to_string())
        })
    }
}
