//! Transform component
//!
//! Pure data: where a body is, how it is oriented and how it is scaled.
//! Orientation is carried for external readers only; collision volumes stay
//! axis-aligned.

use crate::ecs::validation::InvariantViolation;
use crate::foundation::math::{is_finite_vec, is_positive_vec, Quat, Vec3};

/// Accepted range for the squared norm of the rotation quaternion
pub const ROTATION_NORM_SQUARED_RANGE: (f32, f32) = (0.9, 1.1);

/// ECS Transform component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion (w-x-y-z)
    pub rotation: Quat,

    /// Scale factors, applied to the collider's extents
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Check the transform invariants
    ///
    /// Not run during a tick; intended for tests and sanity passes.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if !is_finite_vec(&self.position) {
            return Err(InvariantViolation::NonFinitePosition(self.position));
        }
        if !is_positive_vec(&self.scale) {
            return Err(InvariantViolation::NonPositiveScale(self.scale));
        }
        let norm_squared = self.rotation.quaternion().norm_squared();
        let (low, high) = ROTATION_NORM_SQUARED_RANGE;
        if !(low..=high).contains(&norm_squared) {
            return Err(InvariantViolation::NonUnitRotation(norm_squared));
        }
        Ok(())
    }
}
