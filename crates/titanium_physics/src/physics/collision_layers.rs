//! Collision layer registry for filtering collision detection
//!
//! Every collider sits on one named layer. A symmetric 64×64 interaction
//! matrix, stored as one `u64` row per layer, decides which layer pairs are
//! allowed to produce contacts. Layer 0 is always `"Default"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::logging::{debug, targets};

/// Numeric layer identifier
pub type LayerId = u32;

/// Bitmask with one bit per layer id
pub type LayerMask = u64;

/// The layer every collider starts on
pub const DEFAULT_LAYER: LayerId = 0;

/// Name of [`DEFAULT_LAYER`]
pub const DEFAULT_LAYER_NAME: &str = "Default";

/// Maximum number of layers, the default layer included
pub const MAX_LAYERS: usize = 64;

/// How newly created layers interact with the layers that already exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayerPolicy {
    /// Every pair of layers interacts until explicitly revoked
    #[default]
    Permissive,
    /// A new layer interacts only with itself and with the default layer
    SelfAndDefault,
}

/// Layer creation errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// All layer ids are in use
    #[error("maximum number of layers ({MAX_LAYERS}) reached, cannot create {0:?}")]
    Overflow(String),

    /// Layer names must not be empty
    #[error("layer name cannot be empty")]
    EmptyName,
}

/// Named collision layers and their interaction matrix
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    policy: LayerPolicy,
    names: Vec<String>,
    ids_by_name: HashMap<String, LayerId>,
    interactions: [LayerMask; MAX_LAYERS],
}

impl LayerRegistry {
    /// Create a registry holding only the default layer, using [`LayerPolicy::Permissive`]
    pub fn new() -> Self {
        Self::with_policy(LayerPolicy::default())
    }

    /// Create a registry holding only the default layer
    pub fn with_policy(policy: LayerPolicy) -> Self {
        let mut registry = Self {
            policy,
            names: Vec::with_capacity(MAX_LAYERS),
            ids_by_name: HashMap::new(),
            interactions: [0; MAX_LAYERS],
        };
        registry.insert_default_layer();
        registry
    }

    fn insert_default_layer(&mut self) {
        self.names.push(DEFAULT_LAYER_NAME.to_string());
        self.ids_by_name.insert(DEFAULT_LAYER_NAME.to_string(), DEFAULT_LAYER);
        self.interactions[DEFAULT_LAYER as usize] = bit(DEFAULT_LAYER);
    }

    /// The policy applied to new layers
    pub fn policy(&self) -> LayerPolicy {
        self.policy
    }

    /// Create a layer, or return the id of the existing layer with this name
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or all [`MAX_LAYERS`] ids are in use. Running
    /// out of layers is a configuration error the simulation cannot recover
    /// from; use [`Self::try_create_layer`] to handle it instead.
    pub fn create_layer(&mut self, name: &str) -> LayerId {
        match self.try_create_layer(name) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a layer, or return the id of the existing layer with this name
    pub fn try_create_layer(&mut self, name: &str) -> Result<LayerId, LayerError> {
        if name.is_empty() {
            return Err(LayerError::EmptyName);
        }
        if let Some(&id) = self.ids_by_name.get(name) {
            return Ok(id);
        }
        if self.names.len() >= MAX_LAYERS {
            return Err(LayerError::Overflow(name.to_string()));
        }

        #[allow(clippy::cast_possible_truncation)]
        let id = self.names.len() as LayerId;
        self.names.push(name.to_string());
        self.ids_by_name.insert(name.to_string(), id);

        match self.policy {
            LayerPolicy::Permissive => {
                for other in 0..=id {
                    self.link(id, other, true);
                }
            }
            LayerPolicy::SelfAndDefault => {
                self.link(id, id, true);
                self.link(id, DEFAULT_LAYER, true);
            }
        }

        debug!(target: targets::LAYERS, "Created layer {name:?} with id {id}");
        Ok(id)
    }

    /// Allow or forbid contacts between two layers, in both directions
    ///
    /// Returns `false` and changes nothing if either layer is unknown.
    pub fn set_interaction(&mut self, a: LayerId, b: LayerId, allowed: bool) -> bool {
        if !self.is_valid_layer(a) || !self.is_valid_layer(b) {
            return false;
        }
        self.link(a, b, allowed);
        true
    }

    fn link(&mut self, a: LayerId, b: LayerId, allowed: bool) {
        if allowed {
            self.interactions[a as usize] |= bit(b);
            self.interactions[b as usize] |= bit(a);
        } else {
            self.interactions[a as usize] &= !bit(b);
            self.interactions[b as usize] &= !bit(a);
        }
    }

    /// Whether bodies on these layers may collide; `false` for unknown layers
    pub fn can_interact(&self, a: LayerId, b: LayerId) -> bool {
        self.is_valid_layer(a)
            && self.is_valid_layer(b)
            && self.interactions[a as usize] & bit(b) != 0
    }

    /// Id of the layer with this name
    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.ids_by_name.get(name).copied()
    }

    /// Name of a layer
    pub fn layer_name(&self, id: LayerId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Whether the id names an existing layer
    pub fn is_valid_layer(&self, id: LayerId) -> bool {
        (id as usize) < self.names.len()
    }

    /// Number of layers, the default layer included
    pub fn layer_count(&self) -> usize {
        self.names.len()
    }

    /// Single-bit mask for a layer; `0` for unknown layers
    pub fn layer_mask(&self, id: LayerId) -> LayerMask {
        if self.is_valid_layer(id) {
            bit(id)
        } else {
            0
        }
    }

    /// Union of two masks
    pub const fn combine_masks(a: LayerMask, b: LayerMask) -> LayerMask {
        a | b
    }

    /// Whether a mask contains a layer; `false` for unknown layers
    pub fn test_mask(&self, mask: LayerMask, id: LayerId) -> bool {
        self.is_valid_layer(id) && mask & bit(id) != 0
    }

    /// Drop every layer except the default one and restore its interactions
    pub fn reset(&mut self) {
        self.names.clear();
        self.ids_by_name.clear();
        self.interactions = [0; MAX_LAYERS];
        self.insert_default_layer();
        debug!(target: targets::LAYERS, "Layer registry reset");
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const fn bit(id: LayerId) -> LayerMask {
    1 << id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer_exists() {
        let registry = LayerRegistry::new();
        assert_eq!(registry.layer_count(), 1);
        assert_eq!(registry.layer_by_name("Default"), Some(DEFAULT_LAYER));
        assert_eq!(registry.layer_name(DEFAULT_LAYER), Some("Default"));
        assert!(registry.can_interact(DEFAULT_LAYER, DEFAULT_LAYER));
    }

    #[test]
    fn test_create_layer_is_idempotent_by_name() {
        let mut registry = LayerRegistry::new();
        let player = registry.create_layer("Player");
        assert_eq!(registry.create_layer("Player"), player);
        assert_eq!(registry.create_layer("Default"), DEFAULT_LAYER);
        assert_eq!(registry.layer_count(), 2);
    }

    #[test]
    fn test_new_layer_interacts_with_self_and_default() {
        for policy in [LayerPolicy::Permissive, LayerPolicy::SelfAndDefault] {
            let mut registry = LayerRegistry::with_policy(policy);
            let a = registry.create_layer("A");
            assert!(registry.can_interact(a, a));
            assert!(registry.can_interact(a, DEFAULT_LAYER));
            assert!(registry.can_interact(DEFAULT_LAYER, a));
        }
    }

    #[test]
    fn test_policies_differ_between_custom_layers() {
        let mut permissive = LayerRegistry::with_policy(LayerPolicy::Permissive);
        let a = permissive.create_layer("A");
        let b = permissive.create_layer("B");
        assert!(permissive.can_interact(a, b));

        let mut strict = LayerRegistry::with_policy(LayerPolicy::SelfAndDefault);
        let a = strict.create_layer("A");
        let b = strict.create_layer("B");
        assert!(!strict.can_interact(a, b));
    }

    #[test]
    fn test_set_interaction_is_symmetric() {
        let mut registry = LayerRegistry::new();
        let a = registry.create_layer("A");
        let b = registry.create_layer("B");

        assert!(registry.set_interaction(a, b, false));
        assert!(!registry.can_interact(a, b));
        assert!(!registry.can_interact(b, a));

        assert!(registry.set_interaction(b, a, true));
        assert!(registry.can_interact(a, b));
    }

    #[test]
    fn test_unknown_layers() {
        let mut registry = LayerRegistry::new();
        assert!(!registry.set_interaction(DEFAULT_LAYER, 7, true));
        assert!(!registry.can_interact(DEFAULT_LAYER, 7));
        assert!(!registry.can_interact(7, 7));
        assert_eq!(registry.layer_mask(7), 0);
        assert!(!registry.test_mask(LayerMask::MAX, 7));
        assert_eq!(registry.layer_name(7), None);
    }

    #[test]
    fn test_masks() {
        let mut registry = LayerRegistry::new();
        let a = registry.create_layer("A");
        let b = registry.create_layer("B");
        let mask = LayerRegistry::combine_masks(registry.layer_mask(a), registry.layer_mask(b));
        assert_eq!(mask, 0b110);
        assert!(registry.test_mask(mask, a));
        assert!(registry.test_mask(mask, b));
        assert!(!registry.test_mask(mask, DEFAULT_LAYER));
    }

    #[test]
    fn test_fills_to_capacity() {
        let mut registry = LayerRegistry::new();
        for i in 1..MAX_LAYERS {
            registry.create_layer(&format!("layer{i}"));
        }
        assert_eq!(registry.layer_count(), MAX_LAYERS);
        assert!(registry.can_interact(63, 63));
        assert!(registry.can_interact(63, DEFAULT_LAYER));
        assert_eq!(
            registry.try_create_layer("one_too_many"),
            Err(LayerError::Overflow("one_too_many".to_string()))
        );
        // Existing names still resolve when full
        assert_eq!(registry.try_create_layer("layer5"), Ok(5));
    }

    #[test]
    #[should_panic(expected = "maximum number of layers")]
    fn test_overflow_panics() {
        let mut registry = LayerRegistry::new();
        for i in 0..MAX_LAYERS {
            registry.create_layer(&format!("layer{i}"));
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = LayerRegistry::new();
        assert_eq!(registry.try_create_layer(""), Err(LayerError::EmptyName));
    }

    #[test]
    fn test_reset() {
        let mut registry = LayerRegistry::new();
        let a = registry.create_layer("A");
        registry.set_interaction(DEFAULT_LAYER, DEFAULT_LAYER, false);
        registry.reset();

        assert_eq!(registry.layer_count(), 1);
        assert!(!registry.is_valid_layer(a));
        assert_eq!(registry.layer_by_name("A"), None);
        assert!(registry.can_interact(DEFAULT_LAYER, DEFAULT_LAYER));
        assert_eq!(registry.create_layer("B"), 1);
    }
}
