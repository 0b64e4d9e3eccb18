use doc_store::StoreError;
use fixtures::FixtureError;
use thiserror::Error;
use views::ViewLoadError;

/// Errors that can abort a seeding run.
///
/// The pipeline never retries; the first failure propagates out and
/// the database may be left partially recreated.
#[derive(Debug, Error)]
pub enum SeederError {
    /// An error occurred in the document store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// View definitions could not be loaded from disk.
    #[error("view load error: {0}")]
    ViewLoad(#[from] ViewLoadError),

    /// Word-list fixtures could not be loaded.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// A view produced a row the pipeline cannot interpret.
    #[error("view {view} returned an unexpected row shape: {reason}")]
    MalformedRow { view: String, reason: String },

    /// A serialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for seeding operations.
pub type Result<T> = std::result::Result<T, SeederError>;
