//! Physics engine: the single simulation context
//!
//! Owns the world, the layer registry, the rigid-body factory and the
//! collision system. Nothing is global, so any number of engines can run side
//! by side.

use std::path::Path;

use thiserror::Error;

use crate::config::{Config, ConfigError, EngineConfig};
use crate::ecs::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use crate::ecs::query::RigidBodyQuery;
use crate::ecs::{Entity, ValidationError, World};
use crate::foundation::logging::{info, targets};
use crate::foundation::math::Vec3;
use crate::physics::collision_layers::{LayerId, LayerRegistry};
use crate::physics::collision_system::CollisionSystem;
use crate::physics::rigid_body::RigidBodyFactory;

/// Snapshot of every component of one rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyView {
    /// The body
    pub entity: Entity,
    /// Position, rotation and scale
    pub transform: TransformComponent,
    /// Motion and material
    pub physics: PhysicsComponent,
    /// Collision box and layer
    pub collider: BoxColliderComponent,
}

/// Rigid-body simulation
#[derive(Debug)]
pub struct PhysicsEngine {
    world: World,
    layers: LayerRegistry,
    factory: RigidBodyFactory,
    collision: CollisionSystem,
    config: EngineConfig,
}

impl PhysicsEngine {
    /// Create an engine from configuration
    pub fn new(config: EngineConfig) -> Self {
        let mut factory = RigidBodyFactory::new();
        factory.set_default_material(config.default_restitution, config.default_friction);

        let mut collision = CollisionSystem::with_broad_phase(config.broad_phase.build());
        collision.set_gravity(config.gravity);
        collision.set_detection_enabled(config.detection_enabled);
        collision.set_response_enabled(config.response_enabled);

        info!(
            target: targets::PHYSICS,
            "Physics engine created: gravity {:?}, {} broad phase, {:?} layers",
            config.gravity.as_slice(),
            collision.broad_phase().name(),
            config.layer_policy
        );

        Self {
            world: World::new(),
            layers: LayerRegistry::with_policy(config.layer_policy),
            factory,
            collision,
            config,
        }
    }

    /// Create an engine from a `.toml` or `.ron` configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let config = EngineConfig::load_from_file(path)?;
        info!(target: targets::PHYSICS, "Loaded engine configuration from {}", path.display());
        Ok(Self::new(config))
    }

    /// Configuration the engine was created with
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a box-shaped rigid body; returns [`Entity::INVALID`] on invalid input
    ///
    /// A mass of zero makes the body static.
    pub fn create_rigid_body(&mut self, position: Vec3, dimensions: Vec3, mass: f32, layer: LayerId) -> Entity {
        self.factory
            .create_rigid_body(&mut self.world, position, dimensions, mass, layer)
    }

    /// Destroy a rigid body; `false` if it does not exist
    pub fn destroy_rigid_body(&mut self, entity: Entity) -> bool {
        self.factory.destroy_rigid_body(&mut self.world, entity)
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.collision.tick(&mut self.world, &self.layers, dt);
    }

    /// Set the gravity acceleration
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.collision.set_gravity(Vec3::new(x, y, z));
    }

    /// Current gravity acceleration
    pub const fn gravity(&self) -> Vec3 {
        self.collision.gravity()
    }

    /// Create a collision layer, or look up an existing one by name
    ///
    /// # Panics
    ///
    /// Panics if the name is empty or the layer limit is reached.
    pub fn create_layer(&mut self, name: &str) -> LayerId {
        self.layers.create_layer(name)
    }

    /// Allow or forbid contacts between two layers
    pub fn set_layer_interaction(&mut self, a: LayerId, b: LayerId, allowed: bool) -> bool {
        self.layers.set_interaction(a, b, allowed)
    }

    /// Whether bodies on the two layers may collide
    pub fn can_layers_interact(&self, a: LayerId, b: LayerId) -> bool {
        self.layers.can_interact(a, b)
    }

    /// Transform of a body
    pub fn get_transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.world.get_component(entity)
    }

    /// Physics state of a body
    pub fn get_physics(&self, entity: Entity) -> Option<&PhysicsComponent> {
        self.world.get_component(entity)
    }

    /// Collider of a body
    pub fn get_collider(&self, entity: Entity) -> Option<&BoxColliderComponent> {
        self.world.get_component(entity)
    }

    /// Mutable transform of a body
    ///
    /// Changes are not checked; call [`Self::validate`] to find broken invariants.
    pub fn get_transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.world.get_component_mut(entity)
    }

    /// Mutable physics state of a body
    ///
    /// Keep `mass`, `inv_mass` and `is_static` consistent when editing them.
    pub fn get_physics_mut(&mut self, entity: Entity) -> Option<&mut PhysicsComponent> {
        self.world.get_component_mut(entity)
    }

    /// Mutable collider of a body
    pub fn get_collider_mut(&mut self, entity: Entity) -> Option<&mut BoxColliderComponent> {
        self.world.get_component_mut(entity)
    }

    /// Set a body's linear velocity; `false` if it has no physics
    pub fn set_velocity(&mut self, entity: Entity, velocity: Vec3) -> bool {
        self.get_physics_mut(entity)
            .map(|physics| physics.velocity = velocity)
            .is_some()
    }

    /// Set a body's restitution and friction; `false` if it has no physics
    pub fn set_material(&mut self, entity: Entity, restitution: f32, friction: f32) -> bool {
        self.get_physics_mut(entity)
            .map(|physics| {
                physics.restitution = restitution;
                physics.friction = friction;
            })
            .is_some()
    }

    /// Copy of every component of a rigid body
    pub fn rigid_body(&self, entity: Entity) -> Option<RigidBodyView> {
        Some(RigidBodyView {
            entity,
            transform: *self.get_transform(entity)?,
            physics: *self.get_physics(entity)?,
            collider: *self.get_collider(entity)?,
        })
    }

    /// Every rigid body, ordered by id
    pub fn rigid_bodies(&self) -> Vec<Entity> {
        self.world.query_all::<RigidBodyQuery>()
    }

    /// Number of rigid bodies
    pub fn rigid_body_count(&self) -> usize {
        self.rigid_bodies().len()
    }

    /// Check every component invariant
    pub fn validate(&self) -> Vec<ValidationError> {
        self.world.validate()
    }

    /// The entity/component store
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The layer registry
    pub const fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// The collision pipeline, including last-tick contacts and statistics
    pub const fn collision_system(&self) -> &CollisionSystem {
        &self.collision
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
