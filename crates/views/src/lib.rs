//! On-disk view definition loading.
//!
//! View sources live under a two-level directory tree,
//! `{root}/{design_document}/{view_name}/`, each view directory holding
//! a required `map.js` and an optional `reduce.js`. [`ViewLoader`]
//! walks that tree and produces [`ViewDefinition`]s in a deterministic
//! order, ready to be synced to a store.
//!
//! [`ViewDefinition`]: doc_store::ViewDefinition

pub mod error;
pub mod loader;

pub use error::{Result, ViewLoadError};
pub use loader::{MAP_SOURCE_FILE, REDUCE_SOURCE_FILE, ViewLoader};
