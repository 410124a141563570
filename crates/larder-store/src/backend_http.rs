// SPDX-License-Identifier: Apache-2.0

use crate::backend::{DocumentStore, ListQuery, StoreError, StoreErrorCode};
use crate::config::RemoteStoreConfig;
use crate::document::{CollectionId, Document, DocumentId, FieldMap};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;

const PROJECT_HEADER: &str = "x-larder-project";
const LIST_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct DocumentPage {
    total: u64,
    documents: Vec<Document>,
}

/// Blocking client for the remote document database REST surface:
/// `{endpoint}/databases/{db}/collections/{collection}/documents[/{id}]`.
///
/// Listing pages through the collection until exhausted so that a reset sees
/// every document, not just the first server page.
pub struct HttpDocumentStore {
    config: RemoteStoreConfig,
    client: Client,
}

impl HttpDocumentStore {
    #[must_use]
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn documents_url(&self, collection: &CollectionId) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database, collection
        )
    }

    fn document_url(&self, collection: &CollectionId, id: &DocumentId) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn query_params(query: &ListQuery, limit: usize, offset: usize) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for (field, value) in query.equal_filters() {
            params.push(("equal".to_string(), format!("{field}:{value}")));
        }
        if let Some((field, needle)) = query.search_filter() {
            params.push(("search".to_string(), format!("{field}:{needle}")));
        }
        params.push(("limit".to_string(), limit.to_string()));
        params.push(("offset".to_string(), offset.to_string()));
        params
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .header(PROJECT_HEADER, &self.config.project)
            .bearer_auth(&self.config.api_key)
            .send()
            .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(error_for_status(status))
    }
}

fn error_for_status(status: StatusCode) -> StoreError {
    let code = match status.as_u16() {
        404 => StoreErrorCode::NotFound,
        409 => StoreErrorCode::Conflict,
        400 | 401 | 403 | 422 => StoreErrorCode::Validation,
        500..=599 => StoreErrorCode::Internal,
        _ => StoreErrorCode::Network,
    };
    StoreError::new(code, format!("document api returned {status}"))
}

impl DocumentStore for HttpDocumentStore {
    fn list_documents(
        &self,
        collection: &CollectionId,
        query: &ListQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let url = self.documents_url(collection);
        let mut documents = Vec::new();
        loop {
            let page_size = match query.limit() {
                Some(limit) => LIST_PAGE_SIZE.min(limit.saturating_sub(documents.len())),
                None => LIST_PAGE_SIZE,
            };
            if page_size == 0 {
                break;
            }
            let params = Self::query_params(query, page_size, documents.len());
            let response = self.send(self.client.get(&url).query(&params))?;
            let page: DocumentPage = response
                .json()
                .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
            let fetched = page.documents.len();
            documents.extend(page.documents);
            tracing::debug!(
                collection = %collection,
                fetched,
                total = page.total,
                "listed document page"
            );
            if fetched < page_size {
                break;
            }
        }
        Ok(documents)
    }

    fn create_document(
        &self,
        collection: &CollectionId,
        fields: FieldMap,
    ) -> Result<Document, StoreError> {
        let response = self.send(
            self.client
                .post(self.documents_url(collection))
                .json(&serde_json::Value::Object(fields)),
        )?;
        let document: Document = response
            .json()
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        tracing::debug!(collection = %collection, id = %document.id, "created document");
        Ok(document)
    }

    fn delete_document(
        &self,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError> {
        self.send(self.client.delete(self.document_url(collection, id)))?;
        tracing::debug!(collection = %collection, id = %id, "deleted document");
        Ok(())
    }
}
