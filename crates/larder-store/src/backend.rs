use crate::document::{CollectionId, Document, DocumentId, FieldMap};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Network,
    Unsupported,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Network => "network_error",
            Self::Unsupported => "unsupported",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Optional listing filters. An empty query lists the whole collection in
/// store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    equal: Vec<(String, String)>,
    search: Option<(String, String)>,
    limit: Option<usize>,
}

impl ListQuery {
    #[must_use]
    pub fn with_equal(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.equal.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_search(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.search = Some((field.into(), needle.into()));
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn equal_filters(&self) -> &[(String, String)] {
        &self.equal
    }

    #[must_use]
    pub fn search_filter(&self) -> Option<(&str, &str)> {
        self.search.as_ref().map(|(f, n)| (f.as_str(), n.as_str()))
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Filter predicate used by backends that evaluate queries locally.
    #[must_use]
    pub fn matches(&self, fields: &FieldMap) -> bool {
        for (field, expected) in &self.equal {
            let matched = fields
                .get(field)
                .map(|value| match value {
                    serde_json::Value::String(s) => s == expected,
                    other => other.to_string() == *expected,
                })
                .unwrap_or(false);
            if !matched {
                return false;
            }
        }
        if let Some((field, needle)) = &self.search {
            let matched = fields
                .get(field)
                .and_then(serde_json::Value::as_str)
                .map(|s| s.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
                .unwrap_or(false);
            if !matched {
                return false;
            }
        }
        true
    }
}

/// The data-access contract the pipeline requires from its document-store
/// collaborator. Implementations are blocking from the caller's perspective.
pub trait DocumentStore: Send + Sync {
    /// List documents in store order, each carrying its store-assigned id.
    fn list_documents(
        &self,
        collection: &CollectionId,
        query: &ListQuery,
    ) -> Result<Vec<Document>, StoreError>;

    /// Create a document from a field map; the returned document carries the
    /// assigned id.
    fn create_document(
        &self,
        collection: &CollectionId,
        fields: FieldMap,
    ) -> Result<Document, StoreError>;

    fn delete_document(
        &self,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError>;
}
