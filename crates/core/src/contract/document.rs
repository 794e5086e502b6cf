//! The storage-layer document type
//!
//! A Document is an immutable value: identifier, optional serialized body
//! and version. A document with no body at `Version::EMPTY` means "does not
//! exist". State transitions always produce a new Document.

use super::Version;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// A document as seen by the storage engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: EntityId,
    /// Serialized body, or `None` if the document does not exist
    pub body: Option<String>,
    /// Version the body was read at (or is expected to be at)
    pub version: Version,
}

impl Document {
    /// Create a document
    pub fn new(id: EntityId, body: Option<String>, version: Version) -> Self {
        Self { id, body, version }
    }

    /// The placeholder for an id with no persisted state
    pub fn empty(id: EntityId) -> Self {
        Self {
            id,
            body: None,
            version: Version::EMPTY,
        }
    }

    /// Whether the document has a body
    pub fn exists(&self) -> bool {
        self.body.is_some()
    }

    /// Return a copy with the same id and version but a new body
    pub fn with_body(&self, body: Option<String>) -> Self {
        Self {
            id: self.id,
            body,
            version: self.version,
        }
    }
}
