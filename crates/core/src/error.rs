//! Error types for docbatch
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two kinds of conflict are kept apart on purpose:
//! - `StagingConflict` is raised locally while a batch is being assembled and
//!   indicates misuse (two different expectations for the same document).
//! - `UpdateConflict` is raised by the storage engine at commit time and is a
//!   normal outcome under contention: read fresh state and rebuild the batch.

use crate::contract::Version;
use crate::types::EntityId;
use std::io;
use thiserror::Error;

/// Result type alias for docbatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// The prior intent a staged document collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagingConflictKind {
    /// The document is already checked with another version
    CheckedWithDifferentVersion,
    /// The document is already modified with another version
    ModifiedWithDifferentVersion,
    /// The document is already modified; an id may be modified once per batch
    AlreadyModified,
}

/// Error types for docbatch
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Incompatible intents staged for the same document in one batch
    #[error("{}", staging_message(*id, *kind))]
    StagingConflict {
        /// Document the conflicting intent targets
        id: EntityId,
        /// Which prior intent it collides with
        kind: StagingConflictKind,
    },

    /// A staged version no longer matches the persisted version
    #[error("Update conflict on document {id}: expected version {expected}, found {actual}")]
    UpdateConflict {
        /// Document whose version changed
        id: EntityId,
        /// Version supplied with the batch
        expected: Version,
        /// Version currently persisted
        actual: Version,
    },

    /// No entity type tag is registered for a payload type
    #[error("The type {type_name} does not have a registered entity type")]
    EntityTypeNotRegistered {
        /// Rust type name of the payload
        type_name: &'static str,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage engine failure other than a version conflict
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage(message.into())
    }

    /// Whether this error is a commit-time version conflict
    pub fn is_update_conflict(&self) -> bool {
        matches!(self, Error::UpdateConflict { .. })
    }

    /// Whether this error is a local staging conflict
    pub fn is_staging_conflict(&self) -> bool {
        matches!(self, Error::StagingConflict { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

fn staging_message(id: EntityId, kind: StagingConflictKind) -> String {
    match kind {
        StagingConflictKind::CheckedWithDifferentVersion => format!(
            "A different version of document {} is already being checked.",
            id
        ),
        StagingConflictKind::ModifiedWithDifferentVersion => format!(
            "A different version of document {} is already being modified.",
            id
        ),
        StagingConflictKind::AlreadyModified => format!("Document {} is already being modified.", id),
    }
}
