//! Narrow-phase box vs box contact generation
//!
//! Colliders are treated as axis-aligned boxes. The separating axis is the
//! axis of least penetration, the first axis (x, then y, then z) winning ties.

use crate::ecs::components::{BoxColliderComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::{signed_axis, Vec3, AXES};
use crate::physics::broad_phase::CollisionPair;

/// A detected overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First body
    pub entity_a: Entity,
    /// Second body
    pub entity_b: Entity,
    /// Overlap depth along `normal`, always > 0
    pub penetration: f32,
    /// Unit axis pointing from B toward A
    pub normal: Vec3,
    /// Midpoint of the two centers
    pub point: Vec3,
}

impl Contact {
    /// Whether the contact involves `entity`
    pub fn involves(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }

    /// The other body of the contact, if `entity` is one of them
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

/// World-space box: center plus scaled half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// Box center
    pub center: Vec3,
    /// Half size along each axis
    pub half_extents: Vec3,
}

impl BoxShape {
    /// Box occupied by a collider at a transform
    pub fn from_components(transform: &TransformComponent, collider: &BoxColliderComponent) -> Self {
        Self {
            center: transform.position,
            half_extents: collider.half_extents().component_mul(&transform.scale),
        }
    }
}

/// Contact between two boxes, or `None` if they do not overlap on every axis
///
/// Exactly touching boxes (zero penetration) produce no contact.
pub fn box_box(entity_a: Entity, a: &BoxShape, entity_b: Entity, b: &BoxShape) -> Option<Contact> {
    let delta = a.center - b.center;
    let mut best_axis = 0;
    let mut best_penetration = f32::INFINITY;

    for axis in 0..AXES {
        let penetration = (a.half_extents[axis] + b.half_extents[axis]) - delta[axis].abs();
        if penetration.is_nan() || penetration <= 0.0 {
            return None;
        }
        if penetration < best_penetration {
            best_penetration = penetration;
            best_axis = axis;
        }
    }

    let sign = if a.center[best_axis] > b.center[best_axis] { 1.0 } else { -1.0 };
    Some(Contact {
        entity_a,
        entity_b,
        penetration: best_penetration,
        normal: signed_axis(best_axis, sign),
        point: (a.center + b.center) * 0.5,
    })
}

/// Run the box test on a broad-phase pair
///
/// Returns `None` if either body lacks a transform or collider, or if either
/// collider is disabled.
pub fn detect(world: &World, pair: CollisionPair) -> Option<Contact> {
    let shape = |entity| {
        let collider = world.get_component::<BoxColliderComponent>(entity)?;
        if !collider.enabled {
            return None;
        }
        let transform = world.get_component::<TransformComponent>(entity)?;
        Some(BoxShape::from_components(transform, collider))
    };

    let a = shape(pair.entity_a)?;
    let b = shape(pair.entity_b)?;
    box_box(pair.entity_a, &a, pair.entity_b, &b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shape(center: Vec3, size: Vec3) -> BoxShape {
        BoxShape {
            center,
            half_extents: size * 0.5,
        }
    }

    fn ids() -> (Entity, Entity) {
        let mut world = World::new();
        (world.create_entity(), world.create_entity())
    }

    #[test]
    fn test_side_overlap_on_x() {
        let (ea, eb) = ids();
        let a = shape(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let b = shape(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));

        let contact = box_box(ea, &a, eb, &b).unwrap();
        assert_relative_eq!(contact.penetration, 0.5);
        assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(contact.point, Vec3::new(0.75, 0.0, 0.0));
    }

    #[test]
    fn test_normal_points_from_b_to_a() {
        let (ea, eb) = ids();
        let ground = shape(Vec3::new(0.0, -1.0, 0.0), Vec3::new(10.0, 1.0, 10.0));
        let falling = shape(Vec3::new(0.0, -0.2, 0.0), Vec3::new(1.0, 1.0, 1.0));

        let contact = box_box(ea, &falling, eb, &ground).unwrap();
        assert_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(contact.penetration, 0.2, epsilon = 1e-6);

        let flipped = box_box(eb, &ground, ea, &falling).unwrap();
        assert_eq!(flipped.normal, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_touching_and_separated_boxes() {
        let (ea, eb) = ids();
        let a = shape(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let touching = shape(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let apart = shape(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(box_box(ea, &a, eb, &touching).is_none());
        assert!(box_box(ea, &a, eb, &apart).is_none());
    }

    #[test]
    fn test_first_axis_wins_ties() {
        let (ea, eb) = ids();
        let a = shape(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = shape(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 1.0, 1.0));

        let contact = box_box(ea, &a, eb, &b).unwrap();
        assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));

        // Coincident centers: x axis, negative sign
        let same = box_box(ea, &a, eb, &a).unwrap();
        assert_eq!(same.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(same.penetration, 1.0);
    }

    #[test]
    fn test_disabled_collider_is_ignored() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        for entity in [a, b] {
            world.add_component(entity, TransformComponent::identity());
            world.add_component(entity, BoxColliderComponent::new(1.0, 1.0, 1.0));
        }
        let pair = CollisionPair::new(a, b);
        assert!(detect(&world, pair).is_some());

        world.get_component_mut::<BoxColliderComponent>(b).unwrap().enabled = false;
        assert!(detect(&world, pair).is_none());
    }

    #[test]
    fn test_contact_helpers() {
        let (ea, eb) = ids();
        let a = shape(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let contact = box_box(ea, &a, eb, &a).unwrap();
        assert!(contact.involves(ea));
        assert_eq!(contact.other(ea), Some(eb));
        assert_eq!(contact.other(Entity::INVALID), None);
    }
}
