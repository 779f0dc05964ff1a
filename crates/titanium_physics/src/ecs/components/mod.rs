//! ECS Components module
//!
//! A rigid body is exactly one of each: transform, physics and box collider.

pub mod transform;
pub mod physics;
pub mod collider;

pub use transform::TransformComponent;
pub use physics::{PhysicsComponent, DEFAULT_FRICTION, DEFAULT_RESTITUTION};
pub use collider::BoxColliderComponent;
