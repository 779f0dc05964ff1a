//! Physics component: linear/angular motion and material of a body

use crate::ecs::validation::InvariantViolation;
use crate::foundation::math::{is_finite_vec, Vec3};

/// Restitution given to new bodies unless configured otherwise
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Friction given to new bodies unless configured otherwise
pub const DEFAULT_FRICTION: f32 = 0.3;

/// Relative tolerance used when checking `inv_mass == 1 / mass`
const INV_MASS_TOLERANCE: f32 = 1e-5;

/// Component for bodies that take part in the simulation
///
/// `is_static` bodies never move and have `inv_mass == 0`. Angular velocity is
/// stored and damped but never integrated into orientation, and `friction` is
/// carried for callers but not consumed by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Angular velocity in radians per second
    pub angular_velocity: Vec3,

    /// Mass (0 for static bodies)
    pub mass: f32,

    /// 1 / mass, or 0 for static bodies
    pub inv_mass: f32,

    /// Elasticity in [0, 1]
    pub restitution: f32,

    /// Friction coefficient (>= 0)
    pub friction: f32,

    /// Immovable body
    pub is_static: bool,

    /// Whether gravity accelerates this body
    pub use_gravity: bool,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self::dynamic(1.0)
    }
}

impl PhysicsComponent {
    /// Physics for a body of the given mass
    ///
    /// A mass of zero or less yields a static body.
    pub fn from_mass(mass: f32) -> Self {
        if mass > 0.0 {
            Self::dynamic(mass)
        } else {
            Self::fixed()
        }
    }

    /// A dynamic body affected by gravity
    pub fn dynamic(mass: f32) -> Self {
        Self {
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            mass,
            inv_mass: 1.0 / mass,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            is_static: false,
            use_gravity: true,
        }
    }

    /// An immovable body
    pub fn fixed() -> Self {
        Self {
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            mass: 0.0,
            inv_mass: 0.0,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            is_static: true,
            use_gravity: false,
        }
    }

    /// Builder pattern: Set material
    pub fn with_material(mut self, restitution: f32, friction: f32) -> Self {
        self.restitution = restitution;
        self.friction = friction;
        self
    }

    /// Builder pattern: Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Check the physics invariants
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if !is_finite_vec(&self.velocity) || !is_finite_vec(&self.angular_velocity) {
            return Err(InvariantViolation::NonFiniteVelocity);
        }
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(InvariantViolation::InvalidMass(self.mass));
        }
        let consistent = if self.is_static {
            self.inv_mass == 0.0
        } else if self.mass > 0.0 {
            let expected = 1.0 / self.mass;
            (self.inv_mass - expected).abs() <= INV_MASS_TOLERANCE * expected.max(1.0)
        } else {
            true
        };
        if !consistent {
            return Err(InvariantViolation::InverseMassMismatch {
                mass: self.mass,
                inv_mass: self.inv_mass,
                is_static: self.is_static,
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(InvariantViolation::RestitutionOutOfRange(self.restitution));
        }
        if self.friction.is_nan() || self.friction < 0.0 {
            return Err(InvariantViolation::NegativeFriction(self.friction));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mass() {
        let dynamic = PhysicsComponent::from_mass(2.0);
        assert!(!dynamic.is_static);
        assert!(dynamic.use_gravity);
        assert_eq!(dynamic.inv_mass, 0.5);

        let fixed = PhysicsComponent::from_mass(0.0);
        assert!(fixed.is_static);
        assert!(!fixed.use_gravity);
        assert_eq!(fixed.inv_mass, 0.0);
    }

    #[test]
    fn test_validate_catches_mismatched_inverse_mass() {
        let mut physics = PhysicsComponent::dynamic(4.0);
        physics.inv_mass = 1.0;
        assert!(matches!(
            physics.validate(),
            Err(InvariantViolation::InverseMassMismatch { .. })
        ));

        let mut fixed = PhysicsComponent::fixed();
        fixed.inv_mass = 0.1;
        assert!(fixed.validate().is_err());
    }

    #[test]
    fn test_validate_material_ranges() {
        let physics = PhysicsComponent::dynamic(1.0).with_material(-0.1, 0.3);
        assert!(matches!(
            physics.validate(),
            Err(InvariantViolation::RestitutionOutOfRange(_))
        ));

        let physics = PhysicsComponent::dynamic(1.0).with_material(0.5, -1.0);
        assert!(matches!(
            physics.validate(),
            Err(InvariantViolation::NegativeFriction(_))
        ));

        assert!(PhysicsComponent::dynamic(1.0).validate().is_ok());
    }
}
