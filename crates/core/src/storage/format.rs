use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// Current document schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Versioned envelope every document is written in:
/// `{ "schemaVersion": 1, "items": [...] }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a, T> {
    schema_version: u32,
    items: &'a [T],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentIn {
    schema_version: u32,
    items: Value,
}

/// Serialize a collection into the current envelope, pretty-printed.
pub fn write_document<T: Serialize>(items: &[T]) -> Result<Vec<u8>, CoreError> {
    let doc = DocumentOut {
        schema_version: SCHEMA_VERSION,
        items,
    };
    serde_json::to_vec_pretty(&doc)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
}

/// Parse a document, accepting both the current envelope and the legacy
/// bare-array form (treated as schema version 0), migrating forward as
/// needed.
pub fn read_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, CoreError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let (version, items) = match value {
        // Legacy documents predate the envelope and are bare arrays.
        Value::Array(_) => (0, value),
        Value::Object(_) => {
            let doc: DocumentIn = serde_json::from_value(value)?;
            if !doc.items.is_array() {
                return Err(CoreError::InvalidFileFormat(
                    "Document 'items' is not an array".into(),
                ));
            }
            (doc.schema_version, doc.items)
        }
        _ => {
            return Err(CoreError::InvalidFileFormat(
                "Document is neither an array nor an envelope object".into(),
            ));
        }
    };

    if version > SCHEMA_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let migrated = migrate(version, items)?;
    let items: Vec<T> = serde_json::from_value(migrated)?;
    Ok(items)
}

/// Apply one migration step per version increment until the items match the
/// current schema.
fn migrate(mut version: u32, mut items: Value) -> Result<Value, CoreError> {
    while version < SCHEMA_VERSION {
        items = match version {
            // v0 → v1: records are structurally identical; the envelope
            // itself is the only addition.
            0 => items,
            v => {
                return Err(CoreError::InvalidFileFormat(format!(
                    "No migration path from schema version {v}"
                )));
            }
        };
        version += 1;
    }
    Ok(items)
}
