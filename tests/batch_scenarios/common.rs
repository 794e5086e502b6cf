//! Shared helpers for the batch scenario suite.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub use docbatch::{
    BatchBuilder, CommitOutcome, Document, DocumentStore, EntityId, EntityType, Error, InMemoryDocumentStore,
    StagingConflictKind, UpdateConflict, Version,
};

/// Fresh, initialized engine.
pub fn new_store() -> Arc<InMemoryDocumentStore> {
    let store = Arc::new(InMemoryDocumentStore::new());
    store.initialize().unwrap();
    store
}

/// `n` fresh ids of type 1.
pub fn new_ids(n: usize) -> Vec<EntityId> {
    (0..n).map(|_| EntityId::new(EntityType::new(1))).collect()
}

/// `n` ids of type 1 drawn from a seeded generator.
///
/// The same seed always yields the same ids.
pub fn seeded_ids(seed: u64, n: usize) -> Vec<EntityId> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| EntityId::generate(EntityType::new(1), &mut rng))
        .collect()
}

/// Document with a small JSON body.
pub fn doc(id: EntityId, body: &str, version: Version) -> Document {
    Document::new(id, Some(format!("{{\"value\":\"{}\"}}", body)), version)
}

/// Write documents directly, bypassing any builder, and return the version.
pub fn seed(store: &InMemoryDocumentStore, documents: &[Document]) -> Version {
    store.update_documents(documents, &[]).unwrap().into_result().unwrap()
}
