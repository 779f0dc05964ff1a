//! Rigid-body physics: layers, bodies, integration and collision handling
//!
//! The pipeline stages live in their own modules and are driven, once per
//! tick, by [`CollisionSystem`].

pub mod collision_layers;
pub mod rigid_body;
pub mod integrator;
pub mod broad_phase;
pub mod narrow_phase;
pub mod resolver;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use collision_layers::{LayerError, LayerId, LayerMask, LayerPolicy, LayerRegistry, DEFAULT_LAYER, MAX_LAYERS};
pub use rigid_body::{RigidBodyError, RigidBodyFactory};
pub use broad_phase::{
    Aabb, BroadPhase, BroadPhaseKind, BroadPhaseProxy, BruteForceBroadPhase, CollisionPair, SpatialHashBroadPhase,
};
pub use narrow_phase::{BoxShape, Contact};
pub use collision_system::{CollisionStats, CollisionSystem, DEFAULT_GRAVITY};
