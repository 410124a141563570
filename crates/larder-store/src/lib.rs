#![forbid(unsafe_code)]
//! Document-store contract and backends.
//!
//! The synchronization pipeline only depends on the [`DocumentStore`] trait;
//! the HTTP backend talks to the remote document database, the in-memory
//! backend exists for tests and records an operation journal.

mod backend;
mod backend_http;
mod backend_memory;
mod config;
mod document;

pub use backend::{DocumentStore, ListQuery, StoreError, StoreErrorCode};
pub use backend_http::HttpDocumentStore;
pub use backend_memory::{FaultPlan, MemoryDocumentStore, StoreOp, StoreOpKind};
pub use config::{
    resolve_setting, RemoteStoreConfig, ENV_LARDER_API_KEY, ENV_LARDER_DATABASE,
    ENV_LARDER_ENDPOINT, ENV_LARDER_LOG_LEVEL, ENV_LARDER_PROJECT,
};
pub use document::{CollectionId, Document, DocumentId, FieldMap, COLLECTION_ID_MAX_LEN};

pub const CRATE_NAME: &str = "larder-store";
