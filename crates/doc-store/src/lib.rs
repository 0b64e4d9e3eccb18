//! Document-store client surface for the fixture seeder.
//!
//! This crate defines the contract the seeding pipeline depends on:
//! - [`DocumentStore`] trait covering database lifecycle, document writes,
//!   view sync, and view queries
//! - [`ViewQuery`] options and [`ViewRow`] result rows
//! - [`ViewDefinition`] for named map/reduce views
//! - Two implementations: [`CouchDbStore`] over HTTP and
//!   [`InMemoryDocumentStore`] for tests

pub mod collation;
pub mod couchdb;
pub mod design;
pub mod error;
pub mod memory;
pub mod query;
pub mod row;
pub mod store;

pub use collation::collate;
pub use common::DocumentId;
pub use couchdb::CouchDbStore;
pub use design::ViewDefinition;
pub use error::{Result, StoreError};
pub use memory::InMemoryDocumentStore;
pub use query::ViewQuery;
pub use row::ViewRow;
pub use store::{DocumentStore, DocumentStoreExt};
