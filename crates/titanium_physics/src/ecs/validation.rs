//! Invariant validation for stored components
//!
//! These checks are never run inside a tick. Tests and sanity passes call
//! [`World::validate`] explicitly and inspect the reported violations.

use thiserror::Error;

use super::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use super::{Component, Entity, World};
use crate::foundation::math::Vec3;

/// A broken component invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Position contains NaN or infinity
    #[error("position is not finite: {0:?}")]
    NonFinitePosition(Vec3),

    /// Some scale component is zero, negative or not finite
    #[error("scale must be positive on every axis: {0:?}")]
    NonPositiveScale(Vec3),

    /// Rotation quaternion is too far from unit length
    #[error("rotation is not approximately unit (squared norm {0})")]
    NonUnitRotation(f32),

    /// Linear or angular velocity contains NaN or infinity
    #[error("velocity is not finite")]
    NonFiniteVelocity,

    /// Mass is negative or not finite
    #[error("mass must be finite and non-negative, got {0}")]
    InvalidMass(f32),

    /// Inverse mass disagrees with mass or the static flag
    #[error("inverse mass {inv_mass} does not match mass {mass} (static: {is_static})")]
    InverseMassMismatch {
        /// Stored mass
        mass: f32,
        /// Stored inverse mass
        inv_mass: f32,
        /// Stored static flag
        is_static: bool,
    },

    /// Restitution outside [0, 1]
    #[error("restitution {0} outside [0, 1]")]
    RestitutionOutOfRange(f32),

    /// Friction below zero
    #[error("friction {0} is negative")]
    NegativeFriction(f32),

    /// Collider size is zero, negative or not finite on some axis
    #[error("collider dimensions must be positive: {0:?}")]
    NonPositiveDimensions(Vec3),
}

/// An invariant violation attributed to an entity
#[derive(Error, Debug, Clone, PartialEq)]
#[error("entity {entity}: {violation}")]
pub struct ValidationError {
    /// Offending entity
    pub entity: Entity,
    /// What is wrong with it
    pub violation: InvariantViolation,
}

impl World {
    /// Check every stored component and report each violation found
    ///
    /// At most one violation per component is reported. The result is
    /// ordered by entity id.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for entity in self.entities() {
            let checks = [
                self.check(entity, TransformComponent::validate),
                self.check(entity, PhysicsComponent::validate),
                self.check(entity, BoxColliderComponent::validate),
            ];
            errors.extend(
                checks
                    .into_iter()
                    .flatten()
                    .map(|violation| ValidationError { entity, violation }),
            );
        }
        errors
    }

    fn check<T: Component>(
        &self,
        entity: Entity,
        rule: impl Fn(&T) -> Result<(), InvariantViolation>,
    ) -> Option<InvariantViolation> {
        self.get_component::<T>(entity).and_then(|c| rule(c).err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_each_violation() {
        let mut world = World::new();
        let good = world.create_entity();
        world.add_component(good, TransformComponent::identity());
        world.add_component(good, PhysicsComponent::dynamic(1.0));
        world.add_component(good, BoxColliderComponent::default());

        let bad = world.create_entity();
        world.add_component(bad, TransformComponent::from_position(Vec3::new(f32::NAN, 0.0, 0.0)));
        world.add_component(bad, PhysicsComponent::dynamic(1.0).with_material(2.0, 0.3));

        let errors = world.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.entity == bad));
        assert!(matches!(errors[0].violation, InvariantViolation::NonFinitePosition(_)));
        assert!(matches!(errors[1].violation, InvariantViolation::RestitutionOutOfRange(_)));
        assert!(errors[1].to_string().starts_with(&format!("entity {bad}")));
    }
}
