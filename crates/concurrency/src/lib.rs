//! Concurrency layer for docbatch
//!
//! This crate implements optimistic batch construction:
//! - BatchBuilder: Staged check/modify intents per document id
//! - Validate-then-apply staging (no half-staged calls)
//! - Single atomic commit through `DocumentStore::update_documents`
//!
//! No locks are held while a batch is assembled. Conflicting writers are
//! serialized by the storage engine at commit time; retry policy belongs to
//! the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
mod validation;

pub use batch::{BatchBuilder, PendingIntents};
