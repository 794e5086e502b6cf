//! Version token type
//!
//! Every successful commit assigns a version to the documents it writes.
//! A version is valid only against the exact persisted content it was
//! issued for, and the only meaningful operation on two versions is
//! equality. There is deliberately no ordering: callers must not infer
//! recency or causality from a version.
//!
//! ## Representation
//!
//! A version is a `u64` minted by the storage engine. All documents written
//! by the same commit share the same value. `Version::EMPTY` (0) is reserved
//! for documents that do not exist and is never minted by a commit.

use serde::{Deserialize, Serialize};

/// Opaque token identifying one persisted content state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The reserved version of a document that does not exist
    pub const EMPTY: Version = Version(0);

    /// Create a version from its raw value
    ///
    /// Intended for storage engines that persist versions.
    pub const fn new(value: u64) -> Self {
        Version(value)
    }

    /// Get the raw value
    ///
    /// Useful for storage and display, but NOT for ordering.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if this is the empty version
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Version(v)
    }
}

// ============================================================================
// Tests
// ============================================================================
