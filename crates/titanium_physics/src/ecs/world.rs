//! ECS World implementation
//!
//! The component store: owns every entity id and one table per component type.

use std::collections::HashMap;

use super::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use super::query::ComponentSet;
use super::storage::ComponentTable;
use super::{Component, ComponentKinds, Entity};

/// ECS World containing all entities and components
#[derive(Debug, Clone)]
pub struct World {
    next_entity_id: u32,
    /// Live entities and the component kinds each one owns
    signatures: HashMap<Entity, ComponentKinds>,
    pub(super) transforms: ComponentTable<TransformComponent>,
    pub(super) physics: ComponentTable<PhysicsComponent>,
    pub(super) colliders: ComponentTable<BoxColliderComponent>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 1,
            signatures: HashMap::new(),
            transforms: ComponentTable::new(),
            physics: ComponentTable::new(),
            colliders: ComponentTable::new(),
        }
    }

    /// Create a new entity
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` entities have been created; ids are never reused.
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity id space exhausted"));
        self.signatures.insert(entity, ComponentKinds::empty());
        entity
    }

    /// Destroy an entity and every component it owns
    ///
    /// Returns `false` if the entity is unknown.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.signatures.remove(&entity).is_none() {
            return false;
        }
        self.transforms.remove(entity);
        self.physics.remove(entity);
        self.colliders.remove(entity);
        true
    }

    /// Whether the entity is live in this world
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.signatures.contains_key(&entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.signatures.len()
    }

    /// Every live entity, ordered by id
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.signatures.keys().copied().collect();
        entities.sort_unstable();
        entities
    }

    /// Component kinds owned by an entity
    pub fn signature(&self, entity: Entity) -> Option<ComponentKinds> {
        self.signatures.get(&entity).copied()
    }

    /// Add a component to an entity
    ///
    /// Returns `false` if the entity is unknown or already has a component of
    /// this type. Existing components are never overwritten.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        let Some(signature) = self.signatures.get(&entity).copied() else {
            return false;
        };
        if signature.contains(T::KIND) || !T::table_mut(self).insert(entity, component) {
            return false;
        }
        self.signatures.insert(entity, signature | T::KIND);
        true
    }

    /// Remove and return a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let removed = T::table_mut(self).remove(entity)?;
        if let Some(signature) = self.signatures.get_mut(&entity) {
            signature.remove(T::KIND);
        }
        Some(removed)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::table(self).get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::table_mut(self).get_mut(entity)
    }

    /// Whether an entity has a component of this type
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        T::table(self).contains(entity)
    }

    /// Every entity owning all component types in `Q`, ordered by id
    ///
    /// Walks only the smallest of the relevant tables.
    pub fn query_all<Q: ComponentSet>(&self) -> Vec<Entity> {
        let kinds = Q::kinds();
        if kinds.is_empty() {
            return self.entities();
        }

        let tables: [(ComponentKinds, usize); 3] = [
            (ComponentKinds::TRANSFORM, self.transforms.len()),
            (ComponentKinds::PHYSICS, self.physics.len()),
            (ComponentKinds::BOX_COLLIDER, self.colliders.len()),
        ];
        let smallest = tables
            .iter()
            .filter(|(kind, _)| kinds.contains(*kind))
            .min_by_key(|(_, len)| *len)
            .map_or(ComponentKinds::TRANSFORM, |(kind, _)| *kind);

        let candidates: Box<dyn Iterator<Item = Entity> + '_> = if smallest == ComponentKinds::PHYSICS {
            Box::new(self.physics.entities())
        } else if smallest == ComponentKinds::BOX_COLLIDER {
            Box::new(self.colliders.entities())
        } else {
            Box::new(self.transforms.entities())
        };

        let mut matches: Vec<Entity> = candidates
            .filter(|entity| {
                self.signatures
                    .get(entity)
                    .is_some_and(|signature| signature.contains(kinds))
            })
            .collect();
        matches.sort_unstable();
        matches
    }

    /// Remove every entity and component
    ///
    /// Id assignment continues from where it was; ids are not reused.
    pub fn clear(&mut self) {
        self.signatures.clear();
        self.transforms.clear();
        self.physics.clear();
        self.colliders.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
