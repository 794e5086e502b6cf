//! Identifier types for docbatch
//!
//! This module defines the foundational identifier types:
//! - EntityType: Integer tag identifying the shape of a document payload
//! - EntityId: 128-bit document identifier with an embedded EntityType
//!
//! ## Layout
//!
//! An EntityId is a UUID whose first four bytes hold the entity type,
//! big-endian. The textual form of an id of type `0x1234abcd` therefore
//! always starts with `1234abcd-`. The remaining 96 bits are random (or
//! derived from a seed) and are never touched by re-tagging.

use crate::error::{Error, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Byte range of the UUID that holds the entity type
const TYPE_BYTES: std::ops::Range<usize> = 0..4;

/// Tag identifying the logical shape of a document payload
///
/// Stable for a given payload type. The tag is stored inside every
/// [`EntityId`] so that the type is recoverable from the id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityType(i32);

impl EntityType {
    /// Create an EntityType from its integer value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the integer value of this tag
    pub const fn value(&self) -> i32 {
        self.0
    }

    const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<i32> for EntityType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Unique identifier for a document
///
/// An EntityId is a wrapper around a UUID whose leading 32 bits encode an
/// [`EntityType`]. Equality, hashing and ordering use the full 128-bit value.
/// Ids are created client-side when a document is created and never change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a new random EntityId of the given type
    ///
    /// Draws from the operating system's random source.
    pub fn new(entity_type: EntityType) -> Self {
        Self::generate(entity_type, &mut rand::rngs::OsRng)
    }

    /// Create a new random EntityId of the given type from an explicit random source
    ///
    /// Use a seeded generator to make id generation deterministic in tests.
    pub fn generate<R: RngCore + ?Sized>(entity_type: EntityType, rng: &mut R) -> Self {
        let mut data = [0u8; 16];
        rng.fill_bytes(&mut data);
        Self(Uuid::from_bytes(data)).with_type(entity_type)
    }

    /// Derive an EntityId deterministically from a string value
    ///
    /// The id is the first 16 bytes of the SHA-256 digest of the UTF-8
    /// text, re-tagged with `entity_type`. The same `(type, value)` pair always
    /// yields the same id, which makes this suitable for well-known singleton
    /// documents.
    pub fn from_seed(entity_type: EntityType, value: &str) -> Self {
        let digest = Sha256::digest(value.as_bytes());
        let mut data = [0u8; 16];
        data.copy_from_slice(&digest[..16]);
        Self(Uuid::from_bytes(data)).with_type(entity_type)
    }

    /// Wrap an existing UUID
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Create an EntityId from raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse an EntityId from its UUID string representation
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the string is not a valid UUID.
    pub fn parse(input: &str) -> Result<Self> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| Error::invalid_argument(format!("invalid entity id '{}': {}", input, e)))
    }

    /// Return a copy of this id with a different entity type
    ///
    /// All bits outside the type range are preserved.
    pub fn with_type(&self, entity_type: EntityType) -> Self {
        let mut data = *self.0.as_bytes();
        data[TYPE_BYTES].copy_from_slice(&entity_type.to_bytes());
        Self(Uuid::from_bytes(data))
    }

    /// Get the entity type encoded in this id
    pub fn entity_type(&self) -> EntityType {
        let bytes = self.0.as_bytes();
        EntityType(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Get the raw bytes of this EntityId
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0.hyphenated())
    }
}
