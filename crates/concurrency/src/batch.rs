//! Batch construction and atomic commit
//!
//! A [`BatchBuilder`] models one logical transaction under construction. It
//! accumulates two kinds of intent per document id:
//!
//! - **check**: the document must still be at the given version at commit
//!   time, but is not written
//! - **modify**: the document must still be at the given version at commit
//!   time, and its body is written
//!
//! State per id moves `unstaged → checked → modified` or directly
//! `unstaged → modified`. Staging conflicts are detected immediately and
//! locally; version conflicts against persisted state are detected by the
//! storage engine in [`BatchBuilder::submit`].
//!
//! ## Retention on failure
//!
//! Staged intents are cleared only when a commit succeeds. After a conflict
//! or an engine error the staging maps are left exactly as they were, so the
//! caller can inspect them, or discard them with [`BatchBuilder::clear`]
//! before re-reading and rebuilding the batch. Nothing is retried.
//!
//! ## Concurrency
//!
//! A builder is not meant to be shared; every mutating method takes
//! `&mut self`. Independent builders coordinate only through the storage
//! engine at commit time.

use crate::validation::{plan_check, plan_modify, StagingMap};
use docbatch_core::{CommitOutcome, Document, DocumentStore, EntityId, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Summary of staged intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingIntents {
    /// Number of documents staged for validation only
    pub checked: usize,
    /// Number of documents staged for writing
    pub modified: usize,
}

impl PendingIntents {
    /// Total number of staged documents
    pub fn total(&self) -> usize {
        self.checked + self.modified
    }

    /// Check if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Accumulates check and modify intents and commits them atomically
pub struct BatchBuilder<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    checked: StagingMap,
    modified: StagingMap,
}

impl<S: DocumentStore + ?Sized> BatchBuilder<S> {
    /// Create an empty batch against a storage engine
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            checked: StagingMap::new(),
            modified: StagingMap::new(),
        }
    }

    /// Stage documents whose version must be unchanged at commit time
    ///
    /// Either every document is staged or, on the first staging conflict,
    /// none is.
    ///
    /// # Errors
    ///
    /// Returns `Error::StagingConflict` if a document is already staged with
    /// a different version.
    pub fn check<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        let plan = plan_check(&self.checked, &self.modified, documents).map_err(|e| {
            warn!(error = %e, "check rejected");
            e
        })?;

        debug!(staged = plan.add.len(), "staged checks");
        self.checked.extend(plan.add);
        Ok(())
    }

    /// Stage documents to be written at commit time
    ///
    /// A document already checked at the same version is promoted: the
    /// check is dropped since the modification verifies the same version.
    /// Either every document is staged or, on the first staging conflict,
    /// none is.
    ///
    /// # Errors
    ///
    /// Returns `Error::StagingConflict` if a document is already modified, or
    /// already checked with a different version.
    pub fn modify<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        let plan = plan_modify(&self.checked, &self.modified, documents).map_err(|e| {
            warn!(error = %e, "modify rejected");
            e
        })?;

        debug!(
            staged = plan.add.len(),
            promoted = plan.promote.len(),
            "staged modifications"
        );
        for id in &plan.promote {
            self.checked.remove(id);
        }
        self.modified.extend(plan.add);
        Ok(())
    }

    /// Commit every staged intent in one atomic operation
    ///
    /// On `CommitOutcome::Committed` the staging maps are cleared. On
    /// `CommitOutcome::Conflict` or an error they are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails. A version conflict is
    /// not an error; it is reported as `CommitOutcome::Conflict`.
    pub fn submit(&mut self) -> Result<CommitOutcome> {
        let modified: Vec<Document> = self.modified.values().cloned().collect();
        let checked: Vec<Document> = self.checked.values().cloned().collect();

        let outcome = self.store.update_documents(&modified, &checked)?;

        match &outcome {
            CommitOutcome::Committed(version) => {
                debug!(
                    version = %version,
                    modified = modified.len(),
                    checked = checked.len(),
                    "batch committed"
                );
                self.clear();
            }
            CommitOutcome::Conflict(conflict) => {
                debug!(
                    id = %conflict.id,
                    expected = %conflict.expected,
                    actual = %conflict.actual,
                    "batch rejected with update conflict"
                );
            }
        }

        Ok(outcome)
    }

    /// Discard every staged intent
    pub fn clear(&mut self) {
        self.checked.clear();
        self.modified.clear();
    }

    /// Documents staged for validation only, in id order
    pub fn checked(&self) -> impl Iterator<Item = &Document> {
        self.checked.values()
    }

    /// Documents staged for writing, in id order
    pub fn modified(&self) -> impl Iterator<Item = &Document> {
        self.modified.values()
    }

    /// Whether `id` is staged for validation only
    pub fn is_checked(&self, id: &EntityId) -> bool {
        self.checked.contains_key(id)
    }

    /// Whether `id` is staged for writing
    pub fn is_modified(&self, id: &EntityId) -> bool {
        self.modified.contains_key(id)
    }

    /// Summary of staged intents
    pub fn pending(&self) -> PendingIntents {
        PendingIntents {
            checked: self.checked.len(),
            modified: self.modified.len(),
        }
    }

    /// Number of staged documents
    pub fn len(&self) -> usize {
        self.checked.len() + self.modified.len()
    }

    /// Check if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.modified.is_empty()
    }

    /// The storage engine this batch commits to
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: DocumentStore + ?Sized> fmt::Debug for BatchBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchBuilder")
            .field("checked", &self.checked.keys().collect::<Vec<_>>())
            .field("modified", &self.modified.keys().collect::<Vec<_>>())
            .finish()
    }
}
