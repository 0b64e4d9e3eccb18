use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading word-list fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A word-list file is not there.
    #[error("missing word list fixture at {path}")]
    MissingFixtureFile { path: PathBuf },

    /// A word-list file exists but could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A word-list file has no usable entries, so uniform choice from
    /// it is undefined.
    #[error("word list {path} is empty")]
    EmptyWordList { path: PathBuf },
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
