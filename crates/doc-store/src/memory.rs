use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

use common::DocumentId;

use crate::collation::collate;
use crate::{Result, StoreError, ViewDefinition, ViewQuery, ViewRow};

/// A synced view's sources plus a version counter for observing sync
/// idempotency.
#[derive(Debug, Clone)]
struct StoredView {
    map_source: String,
    reduce_source: Option<String>,
    version: u64,
}

#[derive(Default)]
struct Inner {
    database_exists: bool,
    documents: HashMap<DocumentId, Value>,
    views: HashMap<(String, String), StoredView>,
    rows: HashMap<(String, String), Vec<ViewRow>>,
}

/// In-memory document store implementation for testing.
///
/// Documents, synced views, and staged rows live behind an `RwLock`.
/// The store cannot run map functions, so tests stage the map rows a
/// view would produce with [`set_view_rows`]; query options (key
/// range, direction, skip, limit, include_docs, `_count`/`_sum`
/// reduce, grouping) are then evaluated against the staged rows the
/// same way the real store evaluates them against an index. Staged
/// rows survive database recreation so a test can stage them before
/// running a pipeline that starts by dropping the database.
///
/// [`set_view_rows`]: InMemoryDocumentStore::set_view_rows
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryDocumentStore {
    /// Creates a new store with no database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages the map rows a view query will be evaluated against.
    pub async fn set_view_rows(
        &self,
        design_document: impl Into<String>,
        view_name: impl Into<String>,
        rows: Vec<ViewRow>,
    ) {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .insert((design_document.into(), view_name.into()), rows);
    }

    /// Returns how many times a view's definition has changed through
    /// sync, or `None` if it was never synced.
    pub async fn view_version(&self, design_document: &str, view_name: &str) -> Option<u64> {
        let inner = self.inner.read().await;
        inner
            .views
            .get(&(design_document.to_string(), view_name.to_string()))
            .map(|view| view.version)
    }

    /// Returns the total number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.inner.read().await.documents.len()
    }

    /// Returns all stored documents.
    pub async fn documents(&self) -> Vec<(DocumentId, Value)> {
        let inner = self.inner.read().await;
        inner
            .documents
            .iter()
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect()
    }

    /// Returns the stored documents whose `type` field matches.
    pub async fn documents_of_type(&self, doc_type: &str) -> Vec<Value> {
        let inner = self.inner.read().await;
        inner
            .documents
            .values()
            .filter(|doc| doc.get("type").and_then(Value::as_str) == Some(doc_type))
            .cloned()
            .collect()
    }

    fn assign_id() -> DocumentId {
        DocumentId::new(Uuid::new_v4().simple().to_string())
    }
}

#[async_trait]
impl crate::DocumentStore for InMemoryDocumentStore {
    async fn delete_database(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.database_exists = false;
        inner.documents.clear();
        inner.views.clear();
        // staged rows are test scaffolding and survive recreation
        Ok(())
    }

    async fn create_database(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.database_exists {
            return Err(StoreError::DatabaseExists);
        }
        inner.database_exists = true;
        Ok(())
    }

    async fn save(&self, document: Value) -> Result<DocumentId> {
        let mut inner = self.inner.write().await;
        if !inner.database_exists {
            return Err(StoreError::DatabaseMissing);
        }
        let id = Self::assign_id();
        inner.documents.insert(id.clone(), document);
        Ok(id)
    }

    async fn bulk_update(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>> {
        let mut inner = self.inner.write().await;
        if !inner.database_exists {
            return Err(StoreError::DatabaseMissing);
        }
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            let id = Self::assign_id();
            inner.documents.insert(id.clone(), document);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn sync_view(&self, definition: &ViewDefinition) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.database_exists {
            return Err(StoreError::DatabaseMissing);
        }
        let key = (
            definition.design_document().to_string(),
            definition.view_name().to_string(),
        );
        match inner.views.entry(key) {
            Entry::Occupied(mut entry) => {
                let stored = entry.get_mut();
                if stored.map_source != definition.map_source()
                    || stored.reduce_source.as_deref() != definition.reduce_source()
                {
                    stored.map_source = definition.map_source().to_string();
                    stored.reduce_source = definition.reduce_source().map(str::to_string);
                    stored.version += 1;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(StoredView {
                    map_source: definition.map_source().to_string(),
                    reduce_source: definition.reduce_source().map(str::to_string),
                    version: 1,
                });
            }
        }
        Ok(())
    }

    async fn query_view(
        &self,
        design_document: &str,
        view_name: &str,
        query: ViewQuery,
    ) -> Result<Vec<ViewRow>> {
        query.validate()?;

        let inner = self.inner.read().await;
        if !inner.database_exists {
            return Err(StoreError::DatabaseMissing);
        }

        let key = (design_document.to_string(), view_name.to_string());
        let synced = inner.views.get(&key);
        let staged = inner.rows.get(&key);
        if synced.is_none() && staged.is_none() {
            return Err(StoreError::ViewMissing {
                design_document: design_document.to_string(),
                view_name: view_name.to_string(),
            });
        }

        let mut rows: Vec<ViewRow> = staged.cloned().unwrap_or_default();
        rows.sort_by(|a, b| collate(&a.key, &b.key));
        if query.descending {
            rows.reverse();
        }
        rows.retain(|row| in_range(&row.key, &query));

        let mut rows = if query.reduce {
            // staged rows without a synced definition reduce as _count
            let function = match synced {
                Some(view) => view.reduce_source.as_deref().ok_or_else(|| {
                    StoreError::InvalidQuery(format!(
                        "view {design_document}/{view_name} has no reduce function"
                    ))
                })?,
                None => "_count",
            };
            reduce_rows(rows, function.trim(), query.group)?
        } else {
            rows
        };

        if let Some(skip) = query.skip {
            rows.drain(..rows.len().min(skip as usize));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }

        if query.include_docs {
            for row in &mut rows {
                // a value carrying an _id links to that document instead
                // of the emitting one; a doc staged on the row stands in
                // when the target is not stored
                let target = row
                    .value
                    .get("_id")
                    .and_then(Value::as_str)
                    .map(DocumentId::from)
                    .or_else(|| row.id.clone());
                if let Some(doc) = target.and_then(|id| inner.documents.get(&id).cloned()) {
                    row.doc = Some(doc);
                }
            }
        } else {
            for row in &mut rows {
                row.doc = None;
            }
        }

        Ok(rows)
    }
}

/// Whether a key falls inside the query's bounds, which apply in
/// traversal order: with `descending`, `start_key` is the upper end.
fn in_range(key: &Value, query: &ViewQuery) -> bool {
    if let Some(start) = &query.start_key {
        let before_start = match collate(key, start) {
            Ordering::Less => !query.descending,
            Ordering::Greater => query.descending,
            Ordering::Equal => false,
        };
        if before_start {
            return false;
        }
    }
    if let Some(end) = &query.end_key {
        match collate(key, end) {
            Ordering::Equal if !query.inclusive_end => return false,
            Ordering::Greater if !query.descending => return false,
            Ordering::Less if query.descending => return false,
            _ => {}
        }
    }
    true
}

fn reduce_rows(rows: Vec<ViewRow>, function: &str, group: bool) -> Result<Vec<ViewRow>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    if group {
        let mut grouped: Vec<ViewRow> = Vec::new();
        let mut current: Vec<ViewRow> = Vec::new();
        for row in rows {
            if let Some(last) = current.last()
                && collate(&last.key, &row.key) != Ordering::Equal
            {
                let key = last.key.clone();
                grouped.push(ViewRow::reduced(key, apply_reduce(&current, function)?));
                current.clear();
            }
            current.push(row);
        }
        if let Some(last) = current.last() {
            let key = last.key.clone();
            grouped.push(ViewRow::reduced(key, apply_reduce(&current, function)?));
        }
        Ok(grouped)
    } else {
        let value = apply_reduce(&rows, function)?;
        Ok(vec![ViewRow::reduced(Value::Null, value)])
    }
}

fn apply_reduce(rows: &[ViewRow], function: &str) -> Result<Value> {
    match function {
        "_count" => Ok(json!(rows.len())),
        "_sum" => {
            let total: f64 = rows
                .iter()
                .filter_map(|row| row.value.as_f64())
                .sum();
            if total.fract() == 0.0 {
                Ok(json!(total as i64))
            } else {
                Ok(json!(total))
            }
        }
        other => Err(StoreError::InvalidQuery(format!(
            "unsupported reduce function {other}"
        ))),
    }
}
