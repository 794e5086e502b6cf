//! Entity type registration
//!
//! Maps Rust payload types to their [`EntityType`] tag. The table is built
//! explicitly at startup instead of being discovered at runtime, so the
//! mapping can be inspected and tested on its own.
//!
//! ```
//! use docbatch_core::{EntityType, EntityTypeRegistry};
//!
//! struct Order;
//!
//! let registry = EntityTypeRegistry::new();
//! registry.register::<Order>(EntityType::new(12)).unwrap();
//! assert_eq!(registry.resolve::<Order>().unwrap(), EntityType::new(12));
//! ```

use crate::error::{Error, Result};
use crate::types::{EntityId, EntityType};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{type_name, TypeId};

/// Thread-safe table of payload type to entity type tag
#[derive(Debug, Default)]
pub struct EntityTypeRegistry {
    types: DashMap<TypeId, EntityType>,
}

impl EntityTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the tag for payload type `T`
    ///
    /// Registering the same tag again is a no-op.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `T` is already registered with a
    /// different tag.
    pub fn register<T: 'static>(&self, entity_type: EntityType) -> Result<()> {
        match self.types.entry(TypeId::of::<T>()) {
            Entry::Occupied(existing) if *existing.get() != entity_type => {
                Err(Error::invalid_argument(format!(
                    "the type {} is already registered with entity type {}",
                    type_name::<T>(),
                    existing.get()
                )))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(entity_type);
                Ok(())
            }
        }
    }

    /// Builder-style registration
    pub fn with<T: 'static>(self, entity_type: EntityType) -> Result<Self> {
        self.register::<T>(entity_type)?;
        Ok(self)
    }

    /// Resolve the tag registered for payload type `T`
    ///
    /// # Errors
    /// Returns `Error::EntityTypeNotRegistered` if no tag was registered.
    pub fn resolve<T: 'static>(&self) -> Result<EntityType> {
        self.types
            .get(&TypeId::of::<T>())
            .map(|entry| *entry.value())
            .ok_or(Error::EntityTypeNotRegistered {
                type_name: type_name::<T>(),
            })
    }

    /// Whether a tag is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Generate a random id tagged with the type registered for `T`
    pub fn new_id<T: 'static>(&self) -> Result<EntityId> {
        Ok(EntityId::new(self.resolve::<T>()?))
    }
}

impl EntityId {
    /// Return a copy of this id re-tagged with the type registered for `T`
    pub fn with_registered_type<T: 'static>(&self, registry: &EntityTypeRegistry) -> Result<Self> {
        Ok(self.with_type(registry.resolve::<T>()?))
    }
}
