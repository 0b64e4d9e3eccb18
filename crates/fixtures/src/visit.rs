use common::DocumentId;
use serde::{Deserialize, Serialize};

/// Format visits record their timestamp in. Plain lexicographic order
/// on this format is chronological, which the timestamp view's key
/// ordering relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A synthetic visit record.
///
/// `customer` is a weak reference: it names a customer id a view query
/// returned earlier, and nothing here enforces that the document still
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(rename = "type")]
    pub kind: String,
    pub customer: DocumentId,
    pub timestamp: String,
    pub ip_address: String,
}

impl Visit {
    /// The `type` tag visit documents carry.
    pub const KIND: &'static str = "visit";
}
