use thiserror::Error;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A transport-level error occurred while talking to the store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a status we do not handle.
    #[error("store returned {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The target database does not exist.
    #[error("database does not exist")]
    DatabaseMissing,

    /// The target database already exists.
    #[error("database already exists")]
    DatabaseExists,

    /// The named view does not exist in the store.
    #[error("view {design_document}/{view_name} does not exist")]
    ViewMissing {
        design_document: String,
        view_name: String,
    },

    /// The query options are not a valid combination.
    #[error("invalid view query: {0}")]
    InvalidQuery(String),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
