//! Contact resolution: positional correction followed by a normal impulse
//!
//! Both steps are split by inverse mass, so static bodies (`inv_mass == 0`)
//! never move. Only linear velocity is affected; friction is not applied.

use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::narrow_phase::Contact;

/// Share of the penetration removed by positional correction each tick
pub const CORRECTION_FACTOR: f32 = 0.5;

/// The parts of a body the resolver reads and writes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// World position
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// 1 / mass, 0 for static bodies
    pub inv_mass: f32,
    /// Elasticity in [0, 1]
    pub restitution: f32,
}

impl BodyState {
    fn load(world: &World, entity: Entity) -> Option<Self> {
        let transform = world.get_component::<TransformComponent>(entity)?;
        let physics = world.get_component::<PhysicsComponent>(entity)?;
        Some(Self {
            position: transform.position,
            velocity: physics.velocity,
            inv_mass: physics.inv_mass,
            restitution: physics.restitution,
        })
    }

    fn store(&self, world: &mut World, entity: Entity) {
        if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
            transform.position = self.position;
        }
        if let Some(physics) = world.get_component_mut::<PhysicsComponent>(entity) {
            physics.velocity = self.velocity;
        }
    }
}

/// Push two overlapping bodies apart along the contact normal
///
/// Returns `false` when both bodies are immovable.
pub fn correct_positions(a: &mut BodyState, b: &mut BodyState, normal: Vec3, penetration: f32) -> bool {
    let total = a.inv_mass + b.inv_mass;
    if total <= 0.0 {
        return false;
    }
    let correction = normal * (penetration * CORRECTION_FACTOR);
    a.position += correction * (a.inv_mass / total);
    b.position -= correction * (b.inv_mass / total);
    true
}

/// Apply a restitution impulse along `normal` (pointing from B toward A)
///
/// Returns the impulse magnitude, or `None` if the bodies are already
/// separating or both immovable.
pub fn apply_impulse(a: &mut BodyState, b: &mut BodyState, normal: Vec3) -> Option<f32> {
    let total = a.inv_mass + b.inv_mass;
    if total <= 0.0 {
        return None;
    }
    let separating_velocity = (a.velocity - b.velocity).dot(&normal);
    if separating_velocity >= 0.0 {
        return None;
    }
    let restitution = a.restitution.min(b.restitution);
    let impulse = -(1.0 + restitution) * separating_velocity / total;
    a.velocity += normal * (impulse * a.inv_mass);
    b.velocity -= normal * (impulse * b.inv_mass);
    Some(impulse)
}

/// Resolve one contact against the components stored in the world
///
/// Returns `false` if either body is missing its transform or physics, or if
/// neither body can move.
pub fn resolve_contact(world: &mut World, contact: &Contact) -> bool {
    let (Some(mut a), Some(mut b)) = (
        BodyState::load(world, contact.entity_a),
        BodyState::load(world, contact.entity_b),
    ) else {
        return false;
    };

    if !correct_positions(&mut a, &mut b, contact.normal, contact.penetration) {
        return false;
    }
    apply_impulse(&mut a, &mut b, contact.normal);

    a.store(world, contact.entity_a);
    b.store(world, contact.entity_b);
    true
}

/// Resolve contacts in order; returns how many were applied
pub fn resolve_contacts(world: &mut World, contacts: &[Contact]) -> usize {
    contacts.iter().filter(|contact| resolve_contact(world, contact)).count()
}
