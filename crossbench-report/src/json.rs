//! JSON snapshot with sorted keys.

use crate::metadata::RunMetadata;
use serde_json::Value;
use std::collections::BTreeMap;

/// Key under which run provenance is stored in every snapshot.
pub const METADATA_KEY: &str = "_metadata";

/// Assemble the snapshot document: per-implementation values plus the
/// `_metadata` block. `BTreeMap` keeps top-level keys sorted for
/// diffability.
pub fn comparison_document(
    values: BTreeMap<String, Value>,
    metadata: &RunMetadata,
) -> Result<BTreeMap<String, Value>, serde_json::Error> {
    let mut document = values;
    document.insert(METADATA_KEY.to_string(), serde_json::to_value(metadata)?);
    Ok(document)
}

/// Pretty-print a snapshot document.
pub fn render_json(document: &BTreeMap<String, Value>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_keys_are_sorted_with_metadata() {
        let mut values = BTreeMap::new();
        values.insert("rust".to_string(), json!(0.5));
        values.insert("c".to_string(), json!(0.25));

        let metadata = RunMetadata::collect("plot", vec!["c".into(), "rust".into()], 5, &[]);
        let document = comparison_document(values, &metadata).unwrap();

        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys, vec!["_metadata", "c", "rust"]);

        let rendered = render_json(&document).unwrap();
        let meta = &document[METADATA_KEY];
        assert_eq!(meta["repetitions"], 5);
        assert!(rendered.contains("\"operation\": \"plot\""));
    }

    #[test]
    fn null_markers_survive_serialization() {
        let mut values = BTreeMap::new();
        values.insert("broken".to_string(), Value::Null);
        let metadata = RunMetadata::collect("compare", vec!["broken".into()], 1, &[]);

        let rendered = render_json(&comparison_document(values, &metadata).unwrap()).unwrap();
        assert!(rendered.contains("\"broken\": null"));
    }
}
