use serde::{Deserialize, Serialize};

/// A synthetic customer record.
///
/// Created by the generator and never mutated; the store assigns
/// identity on save. `family` repeats the surname embedded in `name`,
/// and `email` is derived from the same name fields rather than drawn
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub age: i64,
    pub occupation: String,
    pub height: i64,
    pub weight: i64,
    pub family: String,
    pub birthplace: String,
    pub email: String,
    pub race: String,
}

impl Customer {
    /// The `type` tag customer documents carry.
    pub const KIND: &'static str = "customer";
}
