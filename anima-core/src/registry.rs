//! Host-side collection of entities keyed by id.

use std::collections::BTreeMap;

use tracing::debug;

use crate::entity::{Entity, EntityBuilder};
use crate::error::{AnimaError, Result};
use crate::types::EntityId;

/// Owns every live entity in a host.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entity and register it.
    pub fn create(&mut self, builder: EntityBuilder) -> EntityId {
        self.insert(builder.build())
    }

    /// Register an existing entity, replacing any entity with the same id.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        debug!(%id, entity = %entity.identity().name, "Registered entity");
        self.entities.insert(id, entity);
        id
    }

    /// Look up an entity.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::EntityNotFound`] for unknown ids.
    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or(AnimaError::EntityNotFound(id))
    }

    /// Look up an entity mutably.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::EntityNotFound`] for unknown ids.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities.get_mut(&id).ok_or(AnimaError::EntityNotFound(id))
    }

    /// Remove and return an entity.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::EntityNotFound`] for unknown ids.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity> {
        self.entities.remove(&id).ok_or(AnimaError::EntityNotFound(id))
    }

    /// Every registered id, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_get_remove() {
        let mut registry = EntityRegistry::new();
        let id = registry.create(Entity::builder("Ada", "librarian").seed(1));
        assert_eq!(registry.ids(), vec![id]);
        assert_eq!(
            registry.get(id).map(|e| e.identity().name.clone()).ok(),
            Some("Ada".to_string())
        );

        registry
            .get_mut(id)
            .map(|e| e.respond("hello", "p1", "Sam"))
            .expect("registered");
        assert_eq!(registry.get(id).map(|e| e.memory().len()).ok(), Some(2));

        let removed = registry.remove(id).expect("registered");
        assert_eq!(removed.id(), id);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut registry = EntityRegistry::new();
        let ghost = EntityId::new();
        assert!(matches!(registry.get(ghost), Err(AnimaError::EntityNotFound(id)) if id == ghost));
        assert!(matches!(registry.get_mut(ghost), Err(AnimaError::EntityNotFound(_))));
        assert!(matches!(registry.remove(ghost), Err(AnimaError::EntityNotFound(_))));
    }
}
