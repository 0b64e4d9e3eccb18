use common::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row returned by a view query.
///
/// Map rows carry the emitting document's id; reduce rows do not. The
/// `doc` field is populated only when the query asked for
/// `include_docs`, and holds the linked document when the row's value
/// names one via `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,

    pub key: Value,

    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}

impl ViewRow {
    /// Creates a map row for the given document.
    pub fn emitted(id: impl Into<DocumentId>, key: Value, value: Value) -> Self {
        Self {
            id: Some(id.into()),
            key,
            value,
            doc: None,
        }
    }

    /// Creates a reduce row, which carries no document id.
    pub fn reduced(key: Value, value: Value) -> Self {
        Self {
            id: None,
            key,
            value,
            doc: None,
        }
    }
}
