//! Entity-Component-System implementation
//!
//! Entity ids, per-type component tables and multi-component queries.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod query;
pub mod storage;
pub mod validation;

pub use world::World;
pub use entity::Entity;
pub use component::{Component, ComponentKinds};
pub use query::{ComponentSet, RigidBodyQuery};
pub use validation::{InvariantViolation, ValidationError};
