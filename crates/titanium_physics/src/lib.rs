//! # Titanium Physics
//!
//! A real-time rigid-body simulation core for box-shaped bodies.
//!
//! ## Features
//!
//! - **ECS Storage**: Generational component tables and multi-component queries
//! - **Collision Layers**: Up to 64 named layers with a symmetric interaction matrix
//! - **Broad Phase**: Brute-force reference or a uniform spatial hash
//! - **Narrow Phase**: Axis-aligned box contacts along the axis of least penetration
//! - **Resolution**: Positional correction plus restitution impulses
//! - **Configuration**: TOML/RON engine settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use titanium_physics::prelude::*;
//!
//! let mut engine = PhysicsEngine::new(EngineConfig::default());
//! let _ground = engine.create_rigid_body(
//!     Vec3::new(0.0, -1.0, 0.0),
//!     Vec3::new(20.0, 0.4, 20.0),
//!     0.0,
//!     DEFAULT_LAYER,
//! );
//! let body = engine.create_rigid_body(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0, DEFAULT_LAYER);
//!
//! for _ in 0..60 {
//!     engine.tick(1.0 / 60.0);
//! }
//! println!("{:?}", engine.get_transform(body).map(|t| t.position));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;

mod engine;

pub use engine::{EngineError, PhysicsEngine, RigidBodyView};
pub use config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        EngineConfig, EngineError, PhysicsEngine, RigidBodyView,
        config::{Config, ConfigError},
        foundation::math::{Quat, Vec3},
        ecs::{
            World, Entity, Component, ValidationError,
            components::{BoxColliderComponent, PhysicsComponent, TransformComponent},
        },
        physics::{
            BroadPhaseKind, CollisionStats, Contact, LayerId, LayerPolicy, LayerRegistry, DEFAULT_LAYER,
        },
    };
}
