//! Core trait for storage engine abstraction
//!
//! This module defines the DocumentStore trait that batch construction and
//! the typed entity layer talk to. The storage engine itself (durability,
//! schema bootstrap, transaction execution) lives behind this trait.

use crate::contract::{CommitOutcome, Document};
use crate::error::{Error, Result};
use crate::types::EntityId;

/// Storage engine abstraction
///
/// Thread safety: All methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Coordination between writers
/// is optimistic: no lock is held while a batch is assembled, and the
/// engine serializes conflicting commits in `update_documents`.
pub trait DocumentStore: Send + Sync {
    /// Bootstrap connections and schema
    ///
    /// Must be idempotent. Called once before any other method.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be prepared.
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Read the current state of several documents
    ///
    /// Returns exactly one document per requested id, in request order.
    /// Ids with no persisted state yield `Document::empty(id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get_documents(&self, ids: &[EntityId]) -> Result<Vec<Document>>;

    /// Read the current state of a single document
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get_document(&self, id: EntityId) -> Result<Document> {
        self.get_documents(&[id])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::storage(format!("no document returned for id {}", id)))
    }

    /// Atomically validate and write a batch of documents
    ///
    /// For every document in `modified` and `checked`, the supplied version
    /// is compared with the persisted version (`Version::EMPTY` when absent).
    /// On the first mismatch nothing is written and
    /// `CommitOutcome::Conflict` names the offending id. Otherwise the bodies
    /// of `modified` are persisted under one newly minted version, shared by
    /// all of them, and `CommitOutcome::Committed` returns it. `checked`
    /// documents are validated only; their persisted content is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only for engine failures; a version mismatch is
    /// reported through `CommitOutcome::Conflict`.
    fn update_documents(&self, modified: &[Document], checked: &[Document]) -> Result<CommitOutcome>;
}
