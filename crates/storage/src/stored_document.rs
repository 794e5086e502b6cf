//! Storage-layer document record
//!
//! The contract type `Document` carries its id and is what callers see.
//! `StoredDocument` is what the engine keeps per id: the body, the version
//! minted by the commit that wrote it, and when that commit happened.

use chrono::{DateTime, Utc};
use docbatch_core::{Document, EntityId, Version};

/// A persisted document body with its commit metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    body: Option<String>,
    version: Version,
    committed_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Create a record written by the commit that minted `version`
    pub fn new(body: Option<String>, version: Version, committed_at: DateTime<Utc>) -> Self {
        StoredDocument {
            body,
            version,
            committed_at,
        }
    }

    /// Get the body (`None` for a deleted document)
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the commit time
    #[inline]
    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    /// Convert to the contract type
    pub fn to_document(&self, id: EntityId) -> Document {
        Document::new(id, self.body.clone(), self.version)
    }
}
