//! docbatch - optimistic-concurrency document storage
//!
//! Documents are JSON bodies addressed by a type-tagged [`EntityId`] and
//! guarded by an opaque [`Version`]. Writers stage intents in a
//! [`BatchBuilder`] and commit them atomically; a commit either applies
//! every write under one new version or applies nothing.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use docbatch::{BatchBuilder, Document, DocumentStore, EntityId, EntityType, InMemoryDocumentStore, Version};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! store.initialize()?;
//!
//! let id = EntityId::new(EntityType::new(1));
//! let mut batch = BatchBuilder::new(Arc::clone(&store));
//! batch.modify([Document::new(id, Some("{\"n\":1}".to_string()), Version::EMPTY)])?;
//! let version = batch.submit()?.into_result()?;
//!
//! assert_eq!(store.get_document(id)?.version, version);
//! # Ok::<(), docbatch::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `docbatch-core`: ids, versions, documents, errors, the `DocumentStore` trait
//! - `docbatch-concurrency`: staging and commit through `BatchBuilder`
//! - `docbatch-storage`: the in-memory reference engine
//! - `docbatch-engine`: typed entities, serialization and configuration

pub use docbatch_concurrency::{BatchBuilder, PendingIntents};
pub use docbatch_core::*;
pub use docbatch_engine::{
    serde_helpers, DefaultJsonSerializer, DocStoreConfig, EntityBatch, EntityStore, JsonEntity, JsonSerializer,
    JsonSettings, CONFIG_FILE_NAME,
};
pub use docbatch_storage::{InMemoryDocumentStore, StoredDocument};
