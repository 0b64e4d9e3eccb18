use async_trait::async_trait;
use serde_json::Value;

use common::DocumentId;

use crate::{Result, ViewDefinition, ViewQuery, ViewRow};

/// Core trait for document store implementations.
///
/// Covers the operations the seeding pipeline needs: database
/// lifecycle, single and bulk document writes, view sync, and view
/// queries. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Deletes the target database and everything in it.
    ///
    /// A database that does not exist is treated as already deleted.
    async fn delete_database(&self) -> Result<()>;

    /// Creates the target database.
    ///
    /// Fails with [`DatabaseExists`] if the database is already there.
    ///
    /// [`DatabaseExists`]: crate::StoreError::DatabaseExists
    async fn create_database(&self) -> Result<()>;

    /// Saves a single document, returning the id the store assigned.
    async fn save(&self, document: Value) -> Result<DocumentId>;

    /// Submits a batch of documents in one call.
    ///
    /// Per-record failure semantics belong to the store; the returned
    /// ids are reported as-is without validating individual outcomes.
    async fn bulk_update(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>>;

    /// Upserts a view into its design document, creating the design
    /// document if absent.
    ///
    /// Re-applying an identical definition is a no-op; a differing
    /// definition overwrites the stored view.
    async fn sync_view(&self, definition: &ViewDefinition) -> Result<()>;

    /// Executes a named view and returns its rows in traversal order.
    async fn query_view(
        &self,
        design_document: &str,
        view_name: &str,
        query: ViewQuery,
    ) -> Result<Vec<ViewRow>>;
}

/// Extension trait providing convenience methods for document stores.
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Drops and recreates the target database.
    async fn recreate_database(&self) -> Result<()> {
        self.delete_database().await?;
        self.create_database().await
    }

    /// Applies a sequence of view definitions in order.
    async fn sync_views(&self, definitions: &[ViewDefinition]) -> Result<()> {
        for definition in definitions {
            self.sync_view(definition).await?;
        }
        Ok(())
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}
