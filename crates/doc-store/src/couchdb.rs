use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::DocumentId;

use crate::{Result, StoreError, ViewDefinition, ViewQuery, ViewRow};

/// CouchDB-backed document store implementation.
///
/// One instance targets one database under one server. All operations
/// are blocking round trips over HTTP; failures map to [`StoreError`]
/// carrying the server's error/reason payload where one is returned.
#[derive(Clone)]
pub struct CouchDbStore {
    client: Client,
    base_url: String,
    database: String,
}

/// A design document's wire shape, restricted to the fields view sync
/// touches.
#[derive(Debug, Serialize, Deserialize)]
struct DesignDocument {
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    rev: Option<String>,

    #[serde(default = "default_language")]
    language: String,

    #[serde(default)]
    views: BTreeMap<String, ViewSpec>,
}

fn default_language() -> String {
    "javascript".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ViewSpec {
    map: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    reduce: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponseItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ViewResponse {
    rows: Vec<ViewRow>,
}

#[derive(Debug, Deserialize)]
struct CouchErrorBody {
    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    reason: Option<String>,
}

impl CouchDbStore {
    /// Creates a store for one database under the given server URL.
    pub fn new(base_url: impl Into<String>, database: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            database: database.into(),
        }
    }

    /// The database this store targets.
    pub fn database(&self) -> &str {
        &self.database
    }

    fn db_url(&self) -> String {
        format!("{}/{}", self.base_url, self.database)
    }

    fn design_url(&self, design_document: &str) -> String {
        format!("{}/_design/{}", self.db_url(), design_document)
    }

    async fn error_for(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let message = match response.json::<CouchErrorBody>().await {
            Ok(body) => {
                let error = body.error.unwrap_or_else(|| "error".to_string());
                match body.reason {
                    Some(reason) => format!("{error}: {reason}"),
                    None => error,
                }
            }
            Err(_) => "unreadable error body".to_string(),
        };
        StoreError::UnexpectedStatus { status, message }
    }
}

#[async_trait]
impl crate::DocumentStore for CouchDbStore {
    async fn delete_database(&self) -> Result<()> {
        let response = self.client.delete(self.db_url()).send().await?;
        // a database that is not there is already deleted
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(response).await)
    }

    async fn create_database(&self) -> Result<()> {
        let response = self.client.put(self.db_url()).send().await?;
        if response.status() == StatusCode::PRECONDITION_FAILED {
            return Err(StoreError::DatabaseExists);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(())
    }

    async fn save(&self, document: Value) -> Result<DocumentId> {
        let response = self.client.post(self.db_url()).json(&document).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::DatabaseMissing);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        let saved: SaveResponse = response.json().await?;
        Ok(DocumentId::new(saved.id))
    }

    async fn bulk_update(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>> {
        let url = format!("{}/_bulk_docs", self.db_url());
        let body = serde_json::json!({ "docs": documents });
        let response = self.client.post(url).json(&body).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::DatabaseMissing);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        // per-record outcomes are the store's concern; ids are reported
        // as assigned
        let items: Vec<BulkResponseItem> = response.json().await?;
        Ok(items.into_iter().map(|item| DocumentId::new(item.id)).collect())
    }

    async fn sync_view(&self, definition: &ViewDefinition) -> Result<()> {
        let url = self.design_url(definition.design_document());

        let response = self.client.get(&url).send().await?;
        let mut design = if response.status() == StatusCode::NOT_FOUND {
            DesignDocument {
                rev: None,
                language: default_language(),
                views: BTreeMap::new(),
            }
        } else if response.status().is_success() {
            response.json::<DesignDocument>().await?
        } else {
            return Err(Self::error_for(response).await);
        };

        let spec = ViewSpec {
            map: definition.map_source().to_string(),
            reduce: definition.reduce_source().map(str::to_string),
        };
        if design.views.get(definition.view_name()) == Some(&spec) {
            tracing::debug!(view = %definition.qualified_name(), "view already up to date");
            return Ok(());
        }
        design.views.insert(definition.view_name().to_string(), spec);

        let response = self.client.put(&url).json(&design).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
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

        let url = format!(
            "{}/_view/{}",
            self.design_url(design_document),
            view_name
        );

        let mut params: Vec<(&str, String)> = vec![("reduce", query.reduce.to_string())];
        if query.group {
            params.push(("group", "true".to_string()));
        }
        if query.descending {
            params.push(("descending", "true".to_string()));
        }
        if query.include_docs {
            params.push(("include_docs", "true".to_string()));
        }
        if !query.inclusive_end {
            params.push(("inclusive_end", "false".to_string()));
        }
        if let Some(start_key) = &query.start_key {
            params.push(("startkey", serde_json::to_string(start_key)?));
        }
        if let Some(end_key) = &query.end_key {
            params.push(("endkey", serde_json::to_string(end_key)?));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(skip) = query.skip {
            params.push(("skip", skip.to_string()));
        }

        let response = self.client.get(url).query(&params).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::ViewMissing {
                design_document: design_document.to_string(),
                view_name: view_name.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        let body: ViewResponse = response.json().await?;
        Ok(body.rows)
    }
}
