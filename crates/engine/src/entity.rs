//! Typed entity wrapper
//!
//! A [`JsonEntity`] couples a decoded payload with the id and version of the
//! document it came from (or will become). It is the boundary between
//! application types and the storage-layer [`Document`].
//!
//! ```
//! use docbatch_core::{EntityType, Version};
//! use docbatch_engine::JsonEntity;
//!
//! let order = JsonEntity::create("pending".to_string(), EntityType::new(3));
//! assert_eq!(order.version(), Version::EMPTY);
//!
//! let shipped = order.modify("shipped".to_string());
//! assert_eq!(shipped.id(), order.id());
//!
//! let (_id, payload, _version) = shipped.into_parts();
//! assert_eq!(payload.as_deref(), Some("shipped"));
//! ```

use crate::serializer::JsonSerializer;
use docbatch_core::{Document, EntityId, EntityType, EntityTypeRegistry, Error, Result, Version};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A document whose body is decoded into `T`
#[derive(Debug, Clone, PartialEq)]
pub struct JsonEntity<T> {
    id: EntityId,
    entity: Option<T>,
    version: Version,
}

impl<T> JsonEntity<T> {
    /// Create an entity from its parts
    pub fn new(id: EntityId, entity: Option<T>, version: Version) -> Self {
        Self { id, entity, version }
    }

    /// Create a new entity with a random id and the empty version
    pub fn create(value: T, entity_type: EntityType) -> Self {
        Self::new(EntityId::new(entity_type), Some(value), Version::EMPTY)
    }

    /// Create a new entity drawing its id from an explicit random source
    pub fn create_with_rng<R: RngCore + ?Sized>(value: T, entity_type: EntityType, rng: &mut R) -> Self {
        Self::new(EntityId::generate(entity_type, rng), Some(value), Version::EMPTY)
    }

    /// Create a new entity tagged with the type registered for `T`
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityTypeNotRegistered` if `T` has no tag.
    pub fn create_registered(value: T, registry: &EntityTypeRegistry) -> Result<Self>
    where
        T: 'static,
    {
        Ok(Self::create(value, registry.resolve::<T>()?))
    }

    /// Get the document id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the payload, or `None` if the document does not exist
    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    /// Get the version the payload was read at
    pub fn version(&self) -> Version {
        self.version
    }

    /// Return an entity with the same id and version and a new payload
    pub fn modify(&self, new_value: T) -> Self {
        Self::new(self.id, Some(new_value), self.version)
    }

    /// Return an entity with the same id and version and no payload
    ///
    /// Committing it as a modification deletes the document.
    pub fn delete(&self) -> Self {
        Self::new(self.id, None, self.version)
    }

    /// Split into id, payload and version
    pub fn into_parts(self) -> (EntityId, Option<T>, Version) {
        (self.id, self.entity, self.version)
    }
}

impl<T: Serialize> JsonEntity<T> {
    /// Serialize into a storage-layer document
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the payload cannot be serialized.
    pub fn to_document<J: JsonSerializer>(&self, serializer: &J) -> Result<Document> {
        let body = match &self.entity {
            Some(entity) => Some(serializer.serialize(entity)?),
            None => None,
        };
        Ok(Document::new(self.id, body, self.version))
    }
}

impl<T: DeserializeOwned> JsonEntity<T> {
    /// Decode a storage-layer document
    ///
    /// A document with no body yields an entity with no payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the body is malformed.
    pub fn from_document<J: JsonSerializer>(document: Document, serializer: &J) -> Result<Self> {
        let entity = match &document.body {
            Some(body) => Some(serializer.deserialize(body)?),
            None => None,
        };
        Ok(Self::new(document.id, entity, document.version))
    }

    /// Decode a storage-layer document that must exist
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the document has no body, or
    /// `Error::Serialization` if the body is malformed.
    pub fn from_existing_document<J: JsonSerializer>(document: Document, serializer: &J) -> Result<Self> {
        match &document.body {
            Some(body) => {
                let entity = serializer.deserialize(body)?;
                Ok(Self::new(document.id, Some(entity), document.version))
            }
            None => Err(Error::invalid_argument(format!(
                "the body of document {} must not be empty",
                document.id
            ))),
        }
    }
}
