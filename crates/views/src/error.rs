use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading view definitions from disk.
#[derive(Debug, Error)]
pub enum ViewLoadError {
    /// A discovered view directory has no map source file.
    #[error("view {design_document}/{view_name} has no map source at {path}")]
    MissingMapSource {
        design_document: String,
        view_name: String,
        path: PathBuf,
    },

    /// A filesystem error occurred while reading view sources.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for view loading operations.
pub type Result<T> = std::result::Result<T, ViewLoadError>;
