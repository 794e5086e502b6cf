//! Typed entity layer for docbatch
//!
//! This crate sits on top of the document-level primitives:
//! - JsonEntity: a decoded payload with its id and version
//! - EntityStore: typed reads, writes and batches over any `DocumentStore`
//! - JsonSerializer: the body serialization collaborator
//! - DocStoreConfig: `docbatch.toml` loading
//!
//! Version checks and staging rules are unchanged from
//! `docbatch_concurrency::BatchBuilder`; this layer only converts payloads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod entity;
pub mod entity_store;
pub mod serde_helpers;
pub mod serializer;

pub use config::{DocStoreConfig, CONFIG_FILE_NAME};
pub use entity::JsonEntity;
pub use entity_store::{EntityBatch, EntityStore};
pub use serializer::{DefaultJsonSerializer, JsonSerializer, JsonSettings};
