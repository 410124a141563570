// SPDX-License-Identifier: Apache-2.0

use larder_store::{CollectionId, DocumentStore, ListQuery, StoreError, StoreErrorCode};
use std::thread;

/// Empty a collection: list every document, then issue all deletions as an
/// explicit fan-out joined all-or-nothing. The first failure aborts the
/// reset; there is no best-effort mode, because a load into a partially
/// reset collection would violate the full-replacement invariant.
///
/// Returns the number of documents deleted.
pub fn reset_collection(
    store: &dyn DocumentStore,
    collection: &CollectionId,
) -> Result<usize, StoreError> {
    let documents = store.list_documents(collection, &ListQuery::default())?;
    if documents.is_empty() {
        return Ok(0);
    }

    let results: Vec<Result<(), StoreError>> = thread::scope(|scope| {
        let workers: Vec<_> = documents
            .iter()
            .map(|doc| scope.spawn(move || store.delete_document(collection, &doc.id)))
            .collect();
        workers
            .into_iter()
            .map(|worker| {
                worker.join().unwrap_or_else(|_| {
                    Err(StoreError::new(
                        StoreErrorCode::Internal,
                        "delete worker panicked",
                    ))
                })
            })
            .collect()
    });

    let deleted = results.len();
    for result in results {
        result?;
    }
    tracing::debug!(collection = %collection, deleted, "collection reset");
    Ok(deleted)
}
