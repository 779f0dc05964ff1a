//! Engine configuration

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::ecs::components::{DEFAULT_FRICTION, DEFAULT_RESTITUTION};
use crate::foundation::math::{is_finite_vec, Vec3};
use crate::physics::broad_phase::BroadPhaseKind;
use crate::physics::collision_layers::LayerPolicy;
use crate::physics::collision_system::DEFAULT_GRAVITY;

/// Settings for a [`crate::engine::PhysicsEngine`]
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gravity acceleration
    pub gravity: Vec3,
    /// Restitution given to new bodies
    pub default_restitution: f32,
    /// Friction given to new bodies
    pub default_friction: f32,
    /// How new layers interact with existing ones
    pub layer_policy: LayerPolicy,
    /// Run collision detection
    pub detection_enabled: bool,
    /// Resolve detected contacts
    pub response_enabled: bool,
    /// Broad-phase strategy
    pub broad_phase: BroadPhaseKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            default_restitution: DEFAULT_RESTITUTION,
            default_friction: DEFAULT_FRICTION,
            layer_policy: LayerPolicy::default(),
            detection_enabled: true,
            response_enabled: true,
            broad_phase: BroadPhaseKind::default(),
        }
    }
}

impl Config for EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !is_finite_vec(&self.gravity) {
            return Err(ConfigError::Invalid(format!("gravity {:?} is not finite", self.gravity)));
        }
        if !(0.0..=1.0).contains(&self.default_restitution) {
            return Err(ConfigError::Invalid(format!(
                "default_restitution {} is outside [0, 1]",
                self.default_restitution
            )));
        }
        if !self.default_friction.is_finite() || self.default_friction < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_friction {} must be finite and non-negative",
                self.default_friction
            )));
        }
        if let BroadPhaseKind::SpatialHash { cell_size } = self.broad_phase {
            if !cell_size.is_finite() || cell_size <= 0.0 {
                return Err(ConfigError::Invalid(format!("spatial hash cell_size {cell_size} must be positive")));
            }
        }
        Ok(())
    }
}
