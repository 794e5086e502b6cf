//! InMemoryDocumentStore: reference storage engine
//!
//! This module implements the DocumentStore trait using:
//! - `FxHashMap<EntityId, StoredDocument>` for O(1) point reads
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing commit versions
//!
//! # Design Notes
//!
//! - **Single write lock per commit**: validation and application happen
//!   under the same write lock, so of several commits touching the same id
//!   at the same version, exactly one succeeds.
//! - **One version per commit**: the counter is incremented once and every
//!   modified document receives the same version.
//! - **Tombstones**: modifying a document with no body persists a record with
//!   no body at the new version. The id keeps a version, so a concurrent
//!   re-creation from `Version::EMPTY` still conflicts.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use docbatch_core::{
    CommitOutcome, Document, DocumentStore, EntityId, EntityType, Error, Result, UpdateConflict, Version,
};

use crate::stored_document::StoredDocument;

/// Reference storage engine keeping every document in memory
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    /// Latest record per id
    data: RwLock<FxHashMap<EntityId, StoredDocument>>,
    /// Global version counter, incremented once per successful commit
    version: AtomicU64,
    /// Set by `initialize`
    initialized: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty store
    ///
    /// Initial version is 0 (no commit has occurred).
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the version minted by the most recent commit
    pub fn current_version(&self) -> Version {
        Version::new(self.version.load(Ordering::SeqCst))
    }

    /// Whether `initialize` has been called
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Number of ids with a persisted record (tombstones included)
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if nothing was ever written
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Get the stored record for an id, if any
    pub fn stored(&self, id: &EntityId) -> Option<StoredDocument> {
        self.data.read().get(id).cloned()
    }

    /// All live documents of one entity type, in id order
    ///
    /// The type is read from each id, so no secondary index is needed.
    pub fn documents_of_type(&self, entity_type: EntityType) -> Vec<Document> {
        let data = self.data.read();
        let mut results: Vec<Document> = data
            .iter()
            .filter(|(id, stored)| id.entity_type() == entity_type && stored.body().is_some())
            .map(|(id, stored)| stored.to_document(*id))
            .collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));
        results
    }

    /// Allocate the version for the next commit
    ///
    /// Called with the write lock held, so load and store cannot interleave
    /// with another allocation. The counter never wraps back to
    /// `Version::EMPTY`.
    fn allocate_version(&self) -> Result<Version> {
        let next = self
            .version
            .load(Ordering::SeqCst)
            .checked_add(1)
            .ok_or_else(|| Error::storage("version counter exhausted"))?;
        self.version.store(next, Ordering::SeqCst);
        Ok(Version::new(next))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn initialize(&self) -> Result<()> {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            debug!("in-memory document store initialized");
        }
        Ok(())
    }

    fn get_documents(&self, ids: &[EntityId]) -> Result<Vec<Document>> {
        let data = self.data.read();
        Ok(ids
            .iter()
            .map(|id| match data.get(id) {
                Some(stored) => stored.to_document(*id),
                None => Document::empty(*id),
            })
            .collect())
    }

    fn update_documents(&self, modified: &[Document], checked: &[Document]) -> Result<CommitOutcome> {
        let mut data = self.data.write();

        // Validate every participant before touching anything
        for document in modified.iter().chain(checked) {
            let actual = data
                .get(&document.id)
                .map(StoredDocument::version)
                .unwrap_or(Version::EMPTY);

            trace!(id = %document.id, expected = %document.version, actual = %actual, "validate");

            if actual != document.version {
                return Ok(CommitOutcome::Conflict(UpdateConflict {
                    id: document.id,
                    expected: document.version,
                    actual,
                }));
            }
        }

        let version = self.allocate_version()?;
        let committed_at = Utc::now();
        for document in modified {
            data.insert(
                document.id,
                StoredDocument::new(document.body.clone(), version, committed_at),
            );
        }

        debug!(
            version = %version,
            written = modified.len(),
            checked = checked.len(),
            "commit applied"
        );
        Ok(CommitOutcome::Committed(version))
    }
}
