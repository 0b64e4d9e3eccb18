use serde_json::Value;

use crate::{Result, StoreError};

/// Builder for view query options.
///
/// Mirrors the store's query surface: reduction, grouping, traversal
/// direction, key ranges with an inclusive/exclusive end, positional
/// skip, and a result limit. Range bounds apply in traversal order, so
/// with `descending` the start key is the upper end of the range.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    /// Run the view's reduce function instead of returning map rows.
    pub reduce: bool,

    /// Group reduce output by key rather than reducing to a single row.
    pub group: bool,

    /// Traverse rows in descending key order.
    pub descending: bool,

    /// Attach each row's document (or linked document) to the row.
    pub include_docs: bool,

    /// Whether a row whose key equals `end_key` is part of the range.
    pub inclusive_end: bool,

    /// First key of the traversal, if bounded.
    pub start_key: Option<Value>,

    /// Last key of the traversal, if bounded.
    pub end_key: Option<Value>,

    /// Maximum number of rows to return.
    pub limit: Option<u64>,

    /// Number of rows to skip positionally after ordering and range
    /// filtering.
    pub skip: Option<u64>,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            reduce: false,
            group: false,
            descending: false,
            include_docs: false,
            // the store's default: a row matching end_key is included
            inclusive_end: true,
            start_key: None,
            end_key: None,
            limit: None,
            skip: None,
        }
    }
}

impl ViewQuery {
    /// Creates a query with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the reduce function runs.
    pub fn reduce(mut self, reduce: bool) -> Self {
        self.reduce = reduce;
        self
    }

    /// Sets whether reduce output is grouped by key.
    pub fn group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }

    /// Traverses rows in descending key order.
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    /// Sets whether documents are attached to returned rows.
    pub fn include_docs(mut self, include_docs: bool) -> Self {
        self.include_docs = include_docs;
        self
    }

    /// Sets whether a row whose key equals `end_key` is returned.
    pub fn inclusive_end(mut self, inclusive_end: bool) -> Self {
        self.inclusive_end = inclusive_end;
        self
    }

    /// Bounds the traversal to keys from this one onward.
    pub fn start_key(mut self, key: Value) -> Self {
        self.start_key = Some(key);
        self
    }

    /// Bounds the traversal to keys up to this one.
    pub fn end_key(mut self, key: Value) -> Self {
        self.end_key = Some(key);
        self
    }

    /// Restricts the query to a single exact key.
    pub fn key(self, key: Value) -> Self {
        self.start_key(key.clone()).end_key(key).inclusive_end(true)
    }

    /// Limits the number of rows returned.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many rows before returning results.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Rejects option combinations the store does not accept.
    pub fn validate(&self) -> Result<()> {
        if self.group && !self.reduce {
            return Err(StoreError::InvalidQuery(
                "group requires reduce".to_string(),
            ));
        }
        if self.include_docs && self.reduce {
            return Err(StoreError::InvalidQuery(
                "include_docs cannot be combined with reduce".to_string(),
            ));
        }
        Ok(())
    }
}
