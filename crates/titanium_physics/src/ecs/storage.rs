//! Component storage
//!
//! Each component type lives in its own table: a generational slot map holding
//! the values plus an index from entity to slot key. Slot keys carry a
//! generation, so a key left over from a removed component can never alias a
//! component inserted later into the same slot.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::Entity;

new_key_type! {
    /// Generation-based handle to a component slot
    pub struct ComponentSlot;
}

/// Storage for every component of one type
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    slots: SlotMap<ComponentSlot, T>,
    index: HashMap<Entity, ComponentSlot>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            slots: SlotMap::with_key(),
            index: HashMap::new(),
        }
    }
}

impl<T> ComponentTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component for an entity
    ///
    /// Returns `false` and leaves the table untouched if the entity already
    /// has a component in this table.
    pub fn insert(&mut self, entity: Entity, component: T) -> bool {
        if self.index.contains_key(&entity) {
            return false;
        }
        let slot = self.slots.insert(component);
        self.index.insert(entity, slot);
        true
    }

    /// Remove and return an entity's component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        self.slots.remove(slot)
    }

    /// Get an entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).and_then(|&slot| self.slots.get(slot))
    }

    /// Get an entity's component mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.index.get(&entity)?;
        self.slots.get_mut(slot)
    }

    /// Whether an entity has a component in this table
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Entities that own a component in this table, in no particular order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.index.keys().copied()
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove every component
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = ComponentTable::new();
        let entity = Entity::new(1);

        assert!(table.insert(entity, 10_u32));
        assert!(!table.insert(entity, 20));
        assert_eq!(table.get(entity), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_stale_slot_does_not_alias() {
        let mut table = ComponentTable::new();
        let first = Entity::new(1);
        let second = Entity::new(2);

        table.insert(first, 1_u32);
        let stale = table.index[&first];
        assert_eq!(table.remove(first), Some(1));

        table.insert(second, 2);
        assert_eq!(table.slots.get(stale), None);
        assert_eq!(table.get(second), Some(&2));
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut table = ComponentTable::new();
        let entity = Entity::new(7);
        table.insert(entity, 1.0_f32);

        *table.get_mut(entity).unwrap() += 1.5;
        assert_eq!(table.get(entity), Some(&2.5));

        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains(entity));
    }
}
