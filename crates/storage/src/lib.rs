//! Storage layer for docbatch
//!
//! This crate provides a reference storage engine:
//! - InMemoryDocumentStore: FxHashMap-based engine with RwLock
//! - Atomic validate-then-write commits under a single write lock
//! - One global version counter, one version per commit
//!
//! Persistent engines implement `docbatch_core::DocumentStore` the same
//! way; this one is used by tests and by embedders with no backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod stored_document;

pub use memory::InMemoryDocumentStore;
pub use stored_document::StoredDocument;
