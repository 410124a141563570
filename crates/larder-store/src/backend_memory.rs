// SPDX-License-Identifier: Apache-2.0

use crate::backend::{DocumentStore, ListQuery, StoreError, StoreErrorCode};
use crate::document::{CollectionId, Document, DocumentId, FieldMap};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOpKind {
    List,
    Create,
    Delete,
}

/// One successfully applied store operation. The journal lets tests assert
/// ordering properties (every delete of a prior run precedes every create of
/// the current run) without instrumenting the pipeline itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOp {
    pub kind: StoreOpKind,
    pub collection: String,
    pub document: Option<DocumentId>,
}

/// Failure injection for tests. Indices are zero-based and count successful
/// operations of that kind within the named collection.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    pub fail_create: Option<(String, usize)>,
    pub fail_delete_in: Option<String>,
}

/// In-memory document store. Assigns monotonically increasing ids, preserves
/// insertion order when listing, and journals applied operations.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    journal: Mutex<Vec<StoreOp>>,
    next_id: AtomicU64,
    faults: FaultPlan,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fault_plan(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    #[must_use]
    pub fn journal(&self) -> Vec<StoreOp> {
        self.journal.lock().map(|j| j.clone()).unwrap_or_default()
    }

    fn record(&self, kind: StoreOpKind, collection: &CollectionId, document: Option<DocumentId>) {
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(StoreOp {
                kind,
                collection: collection.as_str().to_string(),
                document,
            });
        }
    }

    fn creates_so_far(&self, collection: &CollectionId) -> usize {
        self.journal
            .lock()
            .map(|journal| {
                journal
                    .iter()
                    .filter(|op| {
                        op.kind == StoreOpKind::Create && op.collection == collection.as_str()
                    })
                    .count()
            })
            .unwrap_or(0)
    }

    fn poisoned() -> StoreError {
        StoreError::new(StoreErrorCode::Internal, "memory store lock poisoned")
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list_documents(
        &self,
        collection: &CollectionId,
        query: &ListQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().map_err(|_| Self::poisoned())?;
        let mut documents: Vec<Document> = collections
            .get(collection.as_str())
            .map(|docs| {
                docs.iter()
                    .filter(|doc| query.matches(&doc.fields))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(limit) = query.limit() {
            documents.truncate(limit);
        }
        drop(collections);
        self.record(StoreOpKind::List, collection, None);
        Ok(documents)
    }

    fn create_document(
        &self,
        collection: &CollectionId,
        fields: FieldMap,
    ) -> Result<Document, StoreError> {
        if let Some((faulted, at)) = &self.faults.fail_create {
            if faulted == collection.as_str() && self.creates_so_far(collection) == *at {
                return Err(StoreError::new(
                    StoreErrorCode::Network,
                    format!("injected create failure in '{collection}'"),
                ));
            }
        }
        let sequence = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let document = Document {
            id: DocumentId::new(format!("{sequence:06x}")),
            fields,
        };
        let mut collections = self.collections.lock().map_err(|_| Self::poisoned())?;
        collections
            .entry(collection.as_str().to_string())
            .or_default()
            .push(document.clone());
        drop(collections);
        self.record(StoreOpKind::Create, collection, Some(document.id.clone()));
        Ok(document)
    }

    fn delete_document(
        &self,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError> {
        if let Some(faulted) = &self.faults.fail_delete_in {
            if faulted == collection.as_str() {
                return Err(StoreError::new(
                    StoreErrorCode::Network,
                    format!("injected delete failure in '{collection}'"),
                ));
            }
        }
        let mut collections = self.collections.lock().map_err(|_| Self::poisoned())?;
        let documents = collections.get_mut(collection.as_str()).ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::NotFound,
                format!("collection '{collection}' has no documents"),
            )
        })?;
        let position = documents.iter().position(|doc| doc.id == *id).ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::NotFound,
                format!("document '{id}' not found in '{collection}'"),
            )
        })?;
        documents.remove(position);
        drop(collections);
        self.record(StoreOpKind::Delete, collection, Some(id.clone()));
        Ok(())
    }
}
