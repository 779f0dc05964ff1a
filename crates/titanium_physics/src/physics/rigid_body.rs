//! Rigid-body factory
//!
//! A rigid body is an entity carrying a transform, a physics component and a
//! box collider, all created together. The factory validates its input before
//! touching the world, so a rejected request leaves no partial entity behind.

use crate::ecs::components::{
    BoxColliderComponent, PhysicsComponent, TransformComponent, DEFAULT_FRICTION, DEFAULT_RESTITUTION,
};
use crate::ecs::{Entity, World};
use crate::foundation::logging::{debug, targets, warn};
use crate::foundation::math::{is_finite_vec, is_positive_vec, Vec3};
use crate::physics::collision_layers::LayerId;

/// Reasons a rigid body cannot be created
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RigidBodyError {
    /// Position has a NaN or infinite component
    #[error("position {0:?} is not finite")]
    NonFinitePosition(Vec3),

    /// Box dimensions must be finite and strictly positive
    #[error("dimensions {0:?} must be finite and positive")]
    InvalidDimensions(Vec3),

    /// Mass must be finite and non-negative
    #[error("mass {0} must be finite and non-negative")]
    InvalidMass(f32),

    /// Mass is so small that its inverse is not representable
    #[error("mass {0} is too small to invert")]
    UninvertibleMass(f32),

    /// The world refused one of the components
    #[error("failed to attach components to {0}")]
    ComponentInsertion(Entity),
}

/// Creates and destroys rigid bodies with a shared default material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyFactory {
    default_restitution: f32,
    default_friction: f32,
}

impl RigidBodyFactory {
    /// Factory using restitution 0.5 and friction 0.3
    pub const fn new() -> Self {
        Self {
            default_restitution: DEFAULT_RESTITUTION,
            default_friction: DEFAULT_FRICTION,
        }
    }

    /// Material applied to bodies created from now on
    pub fn set_default_material(&mut self, restitution: f32, friction: f32) {
        self.default_restitution = restitution;
        self.default_friction = friction;
    }

    /// Current default `(restitution, friction)`
    pub const fn default_material(&self) -> (f32, f32) {
        (self.default_restitution, self.default_friction)
    }

    /// Create a rigid body, returning [`Entity::INVALID`] on invalid input
    ///
    /// A mass of zero or less makes the body static. The rejection reason is
    /// logged at `warn`.
    pub fn create_rigid_body(
        &self,
        world: &mut World,
        position: Vec3,
        dimensions: Vec3,
        mass: f32,
        layer: LayerId,
    ) -> Entity {
        match self.try_create_rigid_body(world, position, dimensions, mass, layer) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(target: targets::RIGIDBODY, "Rejected rigid body: {err}");
                Entity::INVALID
            }
        }
    }

    /// Create a rigid body, reporting why it was rejected
    pub fn try_create_rigid_body(
        &self,
        world: &mut World,
        position: Vec3,
        dimensions: Vec3,
        mass: f32,
        layer: LayerId,
    ) -> Result<Entity, RigidBodyError> {
        if !is_finite_vec(&position) {
            return Err(RigidBodyError::NonFinitePosition(position));
        }
        if !is_finite_vec(&dimensions) || !is_positive_vec(&dimensions) {
            return Err(RigidBodyError::InvalidDimensions(dimensions));
        }
        if !mass.is_finite() || mass < 0.0 {
            return Err(RigidBodyError::InvalidMass(mass));
        }
        if mass > 0.0 && !mass.recip().is_finite() {
            return Err(RigidBodyError::UninvertibleMass(mass));
        }

        let transform = TransformComponent::from_position(position);
        let physics = PhysicsComponent::from_mass(mass)
            .with_material(self.default_restitution, self.default_friction);
        let collider = BoxColliderComponent::new(dimensions.x, dimensions.y, dimensions.z).on_layer(layer);

        let entity = world.create_entity();
        let attached = world.add_component(entity, transform)
            && world.add_component(entity, physics)
            && world.add_component(entity, collider);
        if !attached {
            world.destroy_entity(entity);
            return Err(RigidBodyError::ComponentInsertion(entity));
        }

        debug!(
            target: targets::RIGIDBODY,
            "Created {} body {entity} at ({:.2}, {:.2}, {:.2}) on layer {layer}",
            if physics.is_static { "static" } else { "dynamic" },
            position.x,
            position.y,
            position.z
        );
        Ok(entity)
    }

    /// Destroy a rigid body and all of its components
    ///
    /// Returns `false` if the entity is unknown.
    pub fn destroy_rigid_body(&self, world: &mut World, entity: Entity) -> bool {
        let destroyed = world.destroy_entity(entity);
        if destroyed {
            debug!(target: targets::RIGIDBODY, "Destroyed body {entity}");
        }
        destroyed
    }
}

impl Default for RigidBodyFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::query::RigidBodyQuery;
    use crate::physics::collision_layers::DEFAULT_LAYER;
    use approx::assert_relative_eq;

    fn create(world: &mut World, position: Vec3, dimensions: Vec3, mass: f32) -> Entity {
        RigidBodyFactory::new().create_rigid_body(world, position, dimensions, mass, DEFAULT_LAYER)
    }

    #[test]
    fn test_dynamic_body() {
        let mut world = World::new();
        let entity = create(&mut world, Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 1.0, 1.0), 4.0);
        assert!(entity.is_valid());

        let physics = world.get_component::<PhysicsComponent>(entity).unwrap();
        assert!(!physics.is_static);
        assert!(physics.use_gravity);
        assert_relative_eq!(physics.inv_mass, 0.25);
        assert_relative_eq!(physics.restitution, 0.5);
        assert_relative_eq!(physics.friction, 0.3);

        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(world.query_all::<RigidBodyQuery>(), vec![entity]);
    }

    #[test]
    fn test_zero_mass_is_static() {
        let mut world = World::new();
        let entity = create(&mut world, Vec3::zeros(), Vec3::new(20.0, 0.4, 20.0), 0.0);

        let physics = world.get_component::<PhysicsComponent>(entity).unwrap();
        assert!(physics.is_static);
        assert!(!physics.use_gravity);
        assert_eq!(physics.inv_mass, 0.0);
    }

    #[test]
    fn test_invalid_input_leaves_world_untouched() {
        let mut world = World::new();
        let unit = Vec3::new(1.0, 1.0, 1.0);

        assert_eq!(create(&mut world, Vec3::new(f32::NAN, 0.0, 0.0), unit, 1.0), Entity::INVALID);
        assert_eq!(create(&mut world, Vec3::zeros(), Vec3::new(1.0, 0.0, 1.0), 1.0), Entity::INVALID);
        assert_eq!(create(&mut world, Vec3::zeros(), Vec3::new(1.0, f32::INFINITY, 1.0), 1.0), Entity::INVALID);
        assert_eq!(create(&mut world, Vec3::zeros(), unit, -1.0), Entity::INVALID);
        assert_eq!(create(&mut world, Vec3::zeros(), unit, f32::NAN), Entity::INVALID);

        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_subnormal_mass_is_rejected() {
        let mut world = World::new();
        let factory = RigidBodyFactory::new();
        let err = factory
            .try_create_rigid_body(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1e-39, DEFAULT_LAYER)
            .unwrap_err();
        assert_eq!(err, RigidBodyError::UninvertibleMass(1e-39));
        assert_eq!(create(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), f32::MIN_POSITIVE / 8.0), Entity::INVALID);
        assert_eq!(world.entity_count(), 0);

        // Tiny but invertible masses are still accepted
        let light = create(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1e-30);
        assert!(light.is_valid());
        assert!(world.validate().is_empty());
    }

    #[test]
    fn test_try_create_reports_reason() {
        let mut world = World::new();
        let err = RigidBodyFactory::new()
            .try_create_rigid_body(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), -2.0, DEFAULT_LAYER)
            .unwrap_err();
        assert_eq!(err, RigidBodyError::InvalidMass(-2.0));
    }

    #[test]
    fn test_default_material_and_layer() {
        let mut world = World::new();
        let mut factory = RigidBodyFactory::new();
        factory.set_default_material(0.9, 0.1);
        let entity = factory.create_rigid_body(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1.0, 3);

        let physics = world.get_component::<PhysicsComponent>(entity).unwrap();
        assert_relative_eq!(physics.restitution, 0.9);
        assert_relative_eq!(physics.friction, 0.1);
        assert_eq!(world.get_component::<BoxColliderComponent>(entity).unwrap().layer, 3);
    }

    #[test]
    fn test_destroy_rigid_body() {
        let mut world = World::new();
        let factory = RigidBodyFactory::new();
        let entity = factory.create_rigid_body(&mut world, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1.0, DEFAULT_LAYER);

        assert!(factory.destroy_rigid_body(&mut world, entity));
        assert!(!factory.destroy_rigid_body(&mut world, entity));
        assert!(world.query_all::<RigidBodyQuery>().is_empty());
    }
}
