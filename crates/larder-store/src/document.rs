use crate::backend::{StoreError, StoreErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Schema-flexible document payload.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

pub const COLLECTION_ID_MAX_LEN: usize = 64;

/// Store-assigned unique identifier. Never derived from entity contents;
/// only valid for the store instance that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                "collection id must not be empty",
            ));
        }
        if trimmed.len() > COLLECTION_ID_MAX_LEN {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                format!("collection id exceeds max length {COLLECTION_ID_MAX_LEN}"),
            ));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                format!("collection id '{trimmed}' must match [A-Za-z0-9_-]+"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CollectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted document: the store-assigned id plus its field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Document {
    #[must_use]
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn field_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(serde_json::Value::as_f64)
    }
}
