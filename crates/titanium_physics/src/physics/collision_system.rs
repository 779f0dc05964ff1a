//! Per-tick simulation pipeline
//!
//! One [`CollisionSystem::tick`] runs, in order:
//! integrate → broad phase → layer filter → narrow phase → resolve.
//!
//! The only state carried between ticks besides the world itself is the
//! contact list and statistics of the most recent tick, kept for queries.

use std::time::{Duration, Instant};

use crate::ecs::components::BoxColliderComponent;
use crate::ecs::{Entity, World};
use crate::foundation::logging::{debug, targets, trace};
use crate::foundation::math::Vec3;
use crate::physics::broad_phase::{collect_proxies, BroadPhase, BroadPhaseKind, CollisionPair};
use crate::physics::collision_layers::LayerRegistry;
use crate::physics::narrow_phase::{self, Contact};
use crate::physics::{integrator, resolver};

/// Gravity applied when none is configured
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Counters describing the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Rigid bodies seen by the broad phase
    pub body_count: usize,
    /// Pairs reported by the broad phase
    pub candidate_pairs: usize,
    /// Candidate pairs whose layers may interact
    pub filtered_pairs: usize,
    /// Contacts produced by the narrow phase
    pub contact_count: usize,
    /// Contacts the resolver acted on
    pub resolved_contacts: usize,
    /// Wall-clock time spent in the tick
    pub update_time: Duration,
}

/// Integrates bodies and detects and resolves their collisions
#[derive(Debug)]
pub struct CollisionSystem {
    gravity: Vec3,
    broad_phase: Box<dyn BroadPhase>,
    detection_enabled: bool,
    response_enabled: bool,
    contacts: Vec<Contact>,
    stats: CollisionStats,
}

impl CollisionSystem {
    /// Brute-force broad phase and Earth gravity
    pub fn new() -> Self {
        Self::with_broad_phase(BroadPhaseKind::BruteForce.build())
    }

    /// Use a specific broad-phase strategy
    pub fn with_broad_phase(broad_phase: Box<dyn BroadPhase>) -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            broad_phase,
            detection_enabled: true,
            response_enabled: true,
            contacts: Vec::new(),
            stats: CollisionStats::default(),
        }
    }

    /// Replace the broad-phase strategy
    pub fn set_broad_phase(&mut self, broad_phase: Box<dyn BroadPhase>) {
        debug!(target: targets::COLLISION, "Broad phase set to {}", broad_phase.name());
        self.broad_phase = broad_phase;
    }

    /// The active broad-phase strategy
    pub fn broad_phase(&self) -> &dyn BroadPhase {
        self.broad_phase.as_ref()
    }

    /// Set the gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Current gravity acceleration
    pub const fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Turn collision detection on or off; when off only integration runs
    pub fn set_detection_enabled(&mut self, enabled: bool) {
        self.detection_enabled = enabled;
    }

    /// Whether collision detection runs
    pub const fn detection_enabled(&self) -> bool {
        self.detection_enabled
    }

    /// Turn contact resolution on or off; when off contacts are still detected
    pub fn set_response_enabled(&mut self, enabled: bool) {
        self.response_enabled = enabled;
    }

    /// Whether contacts are resolved
    pub const fn response_enabled(&self) -> bool {
        self.response_enabled
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, world: &mut World, layers: &LayerRegistry, dt: f32) {
        let start = Instant::now();
        let mut stats = CollisionStats::default();

        integrator::integrate(world, self.gravity, dt);
        self.contacts.clear();

        if self.detection_enabled {
            let proxies = collect_proxies(world);
            stats.body_count = proxies.len();

            let candidates = self.broad_phase.find_pairs(&proxies);
            stats.candidate_pairs = candidates.len();

            let allowed: Vec<CollisionPair> = candidates
                .into_iter()
                .filter(|pair| Self::layers_allow(world, layers, *pair))
                .collect();
            stats.filtered_pairs = allowed.len();

            self.contacts.extend(allowed.into_iter().filter_map(|pair| narrow_phase::detect(world, pair)));
            stats.contact_count = self.contacts.len();

            if self.response_enabled {
                stats.resolved_contacts = resolver::resolve_contacts(world, &self.contacts);
            }
        }

        stats.update_time = start.elapsed();
        self.stats = stats;

        trace!(
            target: targets::COLLISION,
            "Tick dt={dt}: {} bodies, {} candidates, {} after layer filter, {} contacts",
            stats.body_count,
            stats.candidate_pairs,
            stats.filtered_pairs,
            stats.contact_count
        );
        trace!(target: targets::PERFORMANCE, "Tick took {:?}", stats.update_time);
    }

    fn layers_allow(world: &World, layers: &LayerRegistry, pair: CollisionPair) -> bool {
        let layer_of = |entity| world.get_component::<BoxColliderComponent>(entity).map(|c| c.layer);
        match (layer_of(pair.entity_a), layer_of(pair.entity_b)) {
            (Some(a), Some(b)) => layers.can_interact(a, b),
            _ => false,
        }
    }

    /// Contacts produced by the most recent tick
    pub fn last_contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Entities in contact with `entity` during the most recent tick, sorted
    pub fn colliding_entities(&self, entity: Entity) -> Vec<Entity> {
        let mut others: Vec<Entity> = self.contacts.iter().filter_map(|c| c.other(entity)).collect();
        others.sort_unstable();
        others.dedup();
        others
    }

    /// Whether the two entities were in contact during the most recent tick
    pub fn are_colliding(&self, a: Entity, b: Entity) -> bool {
        let pair = CollisionPair::new(a, b);
        self.contacts
            .iter()
            .any(|c| CollisionPair::new(c.entity_a, c.entity_b) == pair)
    }

    /// Statistics of the most recent tick
    pub const fn stats(&self) -> &CollisionStats {
        &self.stats
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}
