//! Component trait and the closed set of component kinds
//!
//! The simulation only ever stores three component types, so instead of
//! run-time type ids each type names its own table on the [`World`] and its
//! bit in [`ComponentKinds`]. Dispatch is fully static.

use bitflags::bitflags;

use super::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use super::storage::ComponentTable;
use super::World;

bitflags! {
    /// Set of component types, used for entity signatures and queries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentKinds: u8 {
        /// [`TransformComponent`]
        const TRANSFORM = 1 << 0;
        /// [`PhysicsComponent`]
        const PHYSICS = 1 << 1;
        /// [`BoxColliderComponent`]
        const BOX_COLLIDER = 1 << 2;
        /// Everything a rigid body carries
        const RIGID_BODY = Self::TRANSFORM.bits() | Self::PHYSICS.bits() | Self::BOX_COLLIDER.bits();
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::TransformComponent {}
    impl Sealed for super::PhysicsComponent {}
    impl Sealed for super::BoxColliderComponent {}
}

/// Marker trait for components stored in a [`World`]
///
/// Sealed: the component set is fixed.
pub trait Component: sealed::Sealed + Copy + 'static {
    /// The bit identifying this component type
    const KIND: ComponentKinds;

    /// The table holding every component of this type
    fn table(world: &World) -> &ComponentTable<Self>;

    /// Mutable access to the table holding every component of this type
    fn table_mut(world: &mut World) -> &mut ComponentTable<Self>;
}

impl Component for TransformComponent {
    const KIND: ComponentKinds = ComponentKinds::TRANSFORM;

    fn table(world: &World) -> &ComponentTable<Self> {
        &world.transforms
    }

    fn table_mut(world: &mut World) -> &mut ComponentTable<Self> {
        &mut world.transforms
    }
}

impl Component for PhysicsComponent {
    const KIND: ComponentKinds = ComponentKinds::PHYSICS;

    fn table(world: &World) -> &ComponentTable<Self> {
        &world.physics
    }

    fn table_mut(world: &mut World) -> &mut ComponentTable<Self> {
        &mut world.physics
    }
}

impl Component for BoxColliderComponent {
    const KIND: ComponentKinds = ComponentKinds::BOX_COLLIDER;

    fn table(world: &World) -> &ComponentTable<Self> {
        &world.colliders
    }

    fn table_mut(world: &mut World) -> &mut ComponentTable<Self> {
        &mut world.colliders
    }
}
