//! EntityStore: typed access to a document store
//!
//! The store pairs a [`DocumentStore`] with a [`JsonSerializer`] so callers
//! read and write [`JsonEntity`] values instead of raw bodies. Batches are
//! built with [`EntityStore::create_batch_builder`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use docbatch_core::{EntityType, Version};
//! use docbatch_engine::{EntityStore, JsonEntity};
//! use docbatch_storage::InMemoryDocumentStore;
//!
//! let store = EntityStore::with_default_serializer(Arc::new(InMemoryDocumentStore::new()));
//! store.initialize().unwrap();
//!
//! let account = JsonEntity::create(100u64, EntityType::new(1));
//! let version = store.update_entities(&[account.clone()], &[]).unwrap().into_result().unwrap();
//!
//! let read: JsonEntity<u64> = store.get_entity(account.id()).unwrap();
//! assert_eq!(read.entity(), Some(&100));
//! assert_eq!(read.version(), version);
//! assert_ne!(read.version(), Version::EMPTY);
//! ```

use crate::config::DocStoreConfig;
use crate::entity::JsonEntity;
use crate::serializer::{DefaultJsonSerializer, JsonSerializer};
use docbatch_concurrency::{BatchBuilder, PendingIntents};
use docbatch_core::{CommitOutcome, Document, DocumentStore, EntityId, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Typed facade over a storage engine
pub struct EntityStore<S: DocumentStore + ?Sized, J: JsonSerializer = DefaultJsonSerializer> {
    store: Arc<S>,
    serializer: J,
}

impl<S: DocumentStore + ?Sized> EntityStore<S, DefaultJsonSerializer> {
    /// Create an entity store with compact JSON bodies
    pub fn with_default_serializer(store: Arc<S>) -> Self {
        Self::new(store, DefaultJsonSerializer::default())
    }

    /// Create an entity store with the serializer described by `config`
    pub fn from_config(store: Arc<S>, config: &DocStoreConfig) -> Self {
        Self::new(store, config.serializer())
    }
}

impl<S: DocumentStore + ?Sized, J: JsonSerializer> EntityStore<S, J> {
    /// Create an entity store
    pub fn new(store: Arc<S>, serializer: J) -> Self {
        Self { store, serializer }
    }

    /// Prepare the underlying engine. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        self.store.initialize()?;
        debug!("entity store initialized");
        Ok(())
    }

    /// Read one entity
    ///
    /// An id with no persisted state yields an entity with no payload at
    /// `Version::EMPTY`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the stored body does not decode as
    /// `T`, or the engine's error if the read fails.
    pub fn get_entity<T: DeserializeOwned>(&self, id: EntityId) -> Result<JsonEntity<T>> {
        let document = self.store.get_document(id)?;
        JsonEntity::from_document(document, &self.serializer)
    }

    /// Read several entities of one type, in request order
    pub fn get_entities<T: DeserializeOwned>(&self, ids: &[EntityId]) -> Result<Vec<JsonEntity<T>>> {
        self.store
            .get_documents(ids)?
            .into_iter()
            .map(|document| JsonEntity::from_document(document, &self.serializer))
            .collect()
    }

    /// Atomically write `updated` and validate `checked`
    ///
    /// For mixed payload types, serialize with [`JsonEntity::to_document`]
    /// and use [`EntityStore::update_documents`], or stage through a batch.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` before anything is sent if a payload
    /// cannot be serialized. A version conflict is reported through
    /// `CommitOutcome::Conflict`.
    pub fn update_entities<T: Serialize>(
        &self,
        updated: &[JsonEntity<T>],
        checked: &[JsonEntity<T>],
    ) -> Result<CommitOutcome> {
        let updated = self.to_documents(updated)?;
        let checked = self.to_documents(checked)?;
        self.update_documents(&updated, &checked)
    }

    /// Atomically write `updated` and validate `checked` documents
    pub fn update_documents(&self, updated: &[Document], checked: &[Document]) -> Result<CommitOutcome> {
        self.store.update_documents(updated, checked)
    }

    /// Start a new batch against this store
    pub fn create_batch_builder(&self) -> EntityBatch<'_, S, J> {
        EntityBatch {
            inner: BatchBuilder::new(Arc::clone(&self.store)),
            serializer: &self.serializer,
        }
    }

    /// The underlying storage engine
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The body serializer
    pub fn serializer(&self) -> &J {
        &self.serializer
    }

    fn to_documents<T: Serialize>(&self, entities: &[JsonEntity<T>]) -> Result<Vec<Document>> {
        entities
            .iter()
            .map(|entity| entity.to_document(&self.serializer))
            .collect()
    }
}

impl<S: DocumentStore + ?Sized, J: JsonSerializer> fmt::Debug for EntityStore<S, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore").finish_non_exhaustive()
    }
}

/// A [`BatchBuilder`] that also stages typed entities
///
/// Entities of different payload types can be staged in the same batch.
pub struct EntityBatch<'a, S: DocumentStore + ?Sized, J: JsonSerializer> {
    inner: BatchBuilder<S>,
    serializer: &'a J,
}

impl<'a, S: DocumentStore + ?Sized, J: JsonSerializer> EntityBatch<'a, S, J> {
    /// Stage documents for validation only
    pub fn check<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        self.inner.check(documents)
    }

    /// Stage documents to be written
    pub fn modify<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        self.inner.modify(documents)
    }

    /// Stage typed entities for validation only
    ///
    /// The payloads are serialized but never written.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if a payload cannot be serialized, or
    /// `Error::StagingConflict` under the same rules as
    /// [`BatchBuilder::check`]. Nothing is staged on error.
    pub fn check_entity<T: Serialize>(&mut self, entities: &[JsonEntity<T>]) -> Result<()> {
        let documents = self.to_documents(entities)?;
        self.inner.check(documents)
    }

    /// Stage typed entities to be written
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if a payload cannot be serialized, or
    /// `Error::StagingConflict` under the same rules as
    /// [`BatchBuilder::modify`]. Nothing is staged on error.
    pub fn modify_entity<T: Serialize>(&mut self, entities: &[JsonEntity<T>]) -> Result<()> {
        let documents = self.to_documents(entities)?;
        self.inner.modify(documents)
    }

    /// Commit every staged intent atomically
    pub fn submit(&mut self) -> Result<CommitOutcome> {
        self.inner.submit()
    }

    /// Discard every staged intent
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Summary of staged intents
    pub fn pending(&self) -> PendingIntents {
        self.inner.pending()
    }

    /// The wrapped document-level builder
    pub fn inner(&self) -> &BatchBuilder<S> {
        &self.inner
    }

    /// Unwrap into the document-level builder
    pub fn into_inner(self) -> BatchBuilder<S> {
        self.inner
    }

    fn to_documents<T: Serialize>(&self, entities: &[JsonEntity<T>]) -> Result<Vec<Document>> {
        entities
            .iter()
            .map(|entity| entity.to_document(self.serializer))
            .collect()
    }
}

impl<'a, S: DocumentStore + ?Sized, J: JsonSerializer> fmt::Debug for EntityBatch<'a, S, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityBatch").field(&self.inner).finish()
    }
}
