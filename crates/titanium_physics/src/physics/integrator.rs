//! Semi-implicit Euler integration of dynamic bodies

use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::Vec3;

/// Fraction of linear and angular velocity kept per tick
pub const DAMPING: f32 = 0.99;

/// Advance every non-static body with physics and a transform by `dt` seconds
///
/// Order per body: gravity (if enabled) into velocity, damping of linear and
/// angular velocity, then velocity into position. Orientation is not
/// integrated. Returns the number of bodies moved.
pub fn integrate(world: &mut World, gravity: Vec3, dt: f32) -> usize {
    let bodies = world.query_all::<(TransformComponent, PhysicsComponent)>();
    let mut moved = 0;

    for entity in bodies {
        let Some(physics) = world.get_component_mut::<PhysicsComponent>(entity) else {
            continue;
        };
        if physics.is_static {
            continue;
        }
        if physics.use_gravity {
            physics.velocity += gravity * dt;
        }
        physics.velocity *= DAMPING;
        physics.angular_velocity *= DAMPING;
        let displacement = physics.velocity * dt;

        if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
            transform.position += displacement;
            moved += 1;
        }
    }

    moved
}
