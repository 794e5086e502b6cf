//! Core types and traits for docbatch
//!
//! This crate defines the foundational types used throughout the system:
//! - EntityType: Integer tag identifying a payload shape
//! - EntityId: 128-bit document identifier with an embedded EntityType
//! - EntityTypeRegistry: Explicit payload type to tag table
//! - Version: Opaque, equality-only version token
//! - Document: Storage-layer unit (id, optional body, version)
//! - CommitOutcome: Committed version or the first conflicting document
//! - DocumentStore: Storage engine abstraction
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod contract;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use contract::{CommitOutcome, Document, UpdateConflict, Version};
pub use error::{Error, Result, StagingConflictKind};
pub use registry::EntityTypeRegistry;
pub use traits::DocumentStore;
pub use types::{EntityId, EntityType};
