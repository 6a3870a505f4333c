use std::path::Path;

use acordex_core::{AcordexError, Extractor};
use acordex_extract::ScriptedExtractor;
use serde_json::json;

#[tokio::test]
async fn yields_records_in_order_then_errors() {
    let first = json!({"named_insured": "ACME Corp"});
    let second = json!({"named_insured": "Globex Inc"});
    let extractor = ScriptedExtractor::new(vec![first.clone(), second.clone()]);

    let doc = Path::new("ignored.pdf");
    assert_eq!(extractor.extract(doc).await.unwrap(), first);
    assert_eq!(extractor.extract(doc).await.unwrap(), second);

    let err = extractor.extract(doc).await.unwrap_err();
    assert!(matches!(err, AcordexError::Extraction(_)));
}
