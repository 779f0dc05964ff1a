//! Box collider component
//!
//! The only collision shape of the simulation. The box is always treated as
//! axis-aligned; the transform's rotation is not applied to it.

use crate::ecs::validation::InvariantViolation;
use crate::foundation::math::{is_positive_vec, Vec3};
use crate::physics::collision_layers::{LayerId, DEFAULT_LAYER};

/// Axis-aligned box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxColliderComponent {
    /// Full size along X
    pub width: f32,

    /// Full size along Y
    pub height: f32,

    /// Full size along Z
    pub depth: f32,

    /// Disabled colliders are skipped by the narrow phase
    pub enabled: bool,

    /// Collision layer used for filtering
    pub layer: LayerId,
}

impl Default for BoxColliderComponent {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl BoxColliderComponent {
    /// Create an enabled collider on the default layer
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            enabled: true,
            layer: DEFAULT_LAYER,
        }
    }

    /// Builder pattern: Set layer
    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer = layer;
        self
    }

    /// Full size as a vector
    pub fn dimensions(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Half of the full size, before scaling
    pub fn half_extents(&self) -> Vec3 {
        self.dimensions() * 0.5
    }

    /// Check the collider invariants
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let dimensions = self.dimensions();
        if is_positive_vec(&dimensions) {
            Ok(())
        } else {
            Err(InvariantViolation::NonPositiveDimensions(dimensions))
        }
    }
}
