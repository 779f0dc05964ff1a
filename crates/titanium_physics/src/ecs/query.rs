//! Query system for component access
//!
//! `World::query_all::<(TransformComponent, PhysicsComponent)>()` returns every
//! entity owning all listed component types.

use super::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use super::{Component, ComponentKinds};

/// A set of component types that can be queried together
pub trait ComponentSet {
    /// Every kind an entity must have to match
    fn kinds() -> ComponentKinds;
}

macro_rules! single_component_set {
    ($($component:ty),*) => {
        $(
            impl ComponentSet for $component {
                fn kinds() -> ComponentKinds {
                    <$component as Component>::KIND
                }
            }
        )*
    };
}

single_component_set!(TransformComponent, PhysicsComponent, BoxColliderComponent);

impl<A: Component> ComponentSet for (A,) {
    fn kinds() -> ComponentKinds {
        A::KIND
    }
}

impl<A: Component, B: Component> ComponentSet for (A, B) {
    fn kinds() -> ComponentKinds {
        A::KIND | B::KIND
    }
}

impl<A: Component, B: Component, C: Component> ComponentSet for (A, B, C) {
    fn kinds() -> ComponentKinds {
        A::KIND | B::KIND | C::KIND
    }
}

/// The full component triple of a rigid body
pub type RigidBodyQuery = (TransformComponent, PhysicsComponent, BoxColliderComponent);
