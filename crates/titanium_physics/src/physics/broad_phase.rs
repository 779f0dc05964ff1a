//! Broad-phase collision detection
//!
//! Cheaply finds every pair of rigid bodies whose world-space AABBs overlap.
//! Pairs where both bodies are static are never reported. The result is always
//! ordered `(lower id, higher id)` and sorted, whichever strategy produced it.
//!
//! Strategies sit behind the [`BroadPhase`] trait so the collision system can
//! swap them without changing anything downstream.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ecs::components::{BoxColliderComponent, PhysicsComponent, TransformComponent};
use crate::ecs::query::RigidBodyQuery;
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` reaching `half_extents` along each axis
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// World-space bounds of a box collider; rotation is ignored
    pub fn from_collider(transform: &TransformComponent, collider: &BoxColliderComponent) -> Self {
        Self::from_center(
            transform.position,
            collider.half_extents().component_mul(&transform.scale),
        )
    }

    /// Inclusive overlap test: touching faces count as overlapping
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Pair of entities, always stored lower id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Entity with the lower id
    pub entity_a: Entity,
    /// Entity with the higher id
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a pair in canonical order
    pub fn new(a: Entity, b: Entity) -> Self {
        if a <= b {
            Self { entity_a: a, entity_b: b }
        } else {
            Self { entity_a: b, entity_b: a }
        }
    }
}

/// What the broad phase needs to know about one rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadPhaseProxy {
    /// The body
    pub entity: Entity,
    /// World-space bounds
    pub aabb: Aabb,
    /// Static bodies never pair with each other
    pub is_static: bool,
}

impl BroadPhaseProxy {
    /// Whether this proxy may pair with another one
    pub fn can_pair(&self, other: &Self) -> bool {
        !(self.is_static && other.is_static) && self.aabb.overlaps(&other.aabb)
    }
}

/// Build one proxy per rigid body in the world, ordered by entity id
pub fn collect_proxies(world: &World) -> Vec<BroadPhaseProxy> {
    world
        .query_all::<RigidBodyQuery>()
        .into_iter()
        .filter_map(|entity| {
            let transform = world.get_component::<TransformComponent>(entity)?;
            let physics = world.get_component::<PhysicsComponent>(entity)?;
            let collider = world.get_component::<BoxColliderComponent>(entity)?;
            Some(BroadPhaseProxy {
                entity,
                aabb: Aabb::from_collider(transform, collider),
                is_static: physics.is_static,
            })
        })
        .collect()
}

/// A broad-phase strategy
pub trait BroadPhase: std::fmt::Debug {
    /// Short human-readable strategy name
    fn name(&self) -> &'static str;

    /// Every overlapping, not-both-static pair, canonical and sorted
    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<CollisionPair>;
}

/// Tests every pair of bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceBroadPhase;

impl BroadPhase for BruteForceBroadPhase {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();
        for (i, a) in proxies.iter().enumerate() {
            for b in &proxies[i + 1..] {
                if a.can_pair(b) {
                    pairs.push(CollisionPair::new(a.entity, b.entity));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }
}

/// Bodies covering more cells than this skip the grid
const MAX_CELLS_PER_PROXY: i64 = 64;

type Cell = (i32, i32, i32);

/// Uniform grid broad phase
///
/// Bodies are binned into every cell their AABB touches; only bodies sharing a
/// cell become candidates, and each candidate is confirmed with the exact AABB
/// test. Bodies spanning more than a handful of cells (ground planes, walls)
/// go to an oversized list and are tested against every other body.
#[derive(Debug, Clone)]
pub struct SpatialHashBroadPhase {
    cell_size: f32,
    cells: HashMap<Cell, Vec<usize>>,
    oversized: Vec<usize>,
}

impl SpatialHashBroadPhase {
    /// Create a grid with the given cell edge length
    ///
    /// Non-positive or non-finite sizes fall back to 1.0.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            cells: HashMap::new(),
            oversized: Vec::new(),
        }
    }

    /// Cell edge length
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, point: Vec3) -> Cell {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
            (point.z / self.cell_size).floor() as i32,
        )
    }

    fn insert(&mut self, index: usize, aabb: &Aabb) {
        let lo = self.cell_of(aabb.min);
        let hi = self.cell_of(aabb.max);
        let span = |a: i32, b: i32| i64::from(b) - i64::from(a) + 1;
        let spans = [span(lo.0, hi.0), span(lo.1, hi.1), span(lo.2, hi.2)];
        let cell_count = spans.iter().try_fold(1_i64, |acc, &s| acc.checked_mul(s.max(0)));

        match cell_count {
            Some(count) if count <= MAX_CELLS_PER_PROXY => {
                for x in lo.0..=hi.0 {
                    for y in lo.1..=hi.1 {
                        for z in lo.2..=hi.2 {
                            self.cells.entry((x, y, z)).or_default().push(index);
                        }
                    }
                }
            }
            _ => self.oversized.push(index),
        }
    }
}

impl Default for SpatialHashBroadPhase {
    fn default() -> Self {
        Self::new(BroadPhaseKind::DEFAULT_CELL_SIZE)
    }
}

impl BroadPhase for SpatialHashBroadPhase {
    fn name(&self) -> &'static str {
        "spatial-hash"
    }

    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<CollisionPair> {
        self.cells.clear();
        self.oversized.clear();
        for (index, proxy) in proxies.iter().enumerate() {
            self.insert(index, &proxy.aabb);
        }

        let mut found = HashSet::new();
        let mut consider = |i: usize, j: usize| {
            let (a, b) = (&proxies[i], &proxies[j]);
            if i != j && a.can_pair(b) {
                found.insert(CollisionPair::new(a.entity, b.entity));
            }
        };

        for members in self.cells.values() {
            for (k, &i) in members.iter().enumerate() {
                for &j in &members[k + 1..] {
                    consider(i, j);
                }
            }
        }
        for &i in &self.oversized {
            for j in 0..proxies.len() {
                consider(i, j);
            }
        }

        let mut pairs: Vec<CollisionPair> = found.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Broad-phase selection, as stored in configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BroadPhaseKind {
    /// [`BruteForceBroadPhase`]
    #[default]
    BruteForce,
    /// [`SpatialHashBroadPhase`] with the given cell edge length
    SpatialHash {
        /// Cell edge length in world units
        cell_size: f32,
    },
}

impl BroadPhaseKind {
    /// Cell size used when none is configured
    pub const DEFAULT_CELL_SIZE: f32 = 2.0;

    /// Instantiate the selected strategy
    pub fn build(self) -> Box<dyn BroadPhase> {
        match self {
            Self::BruteForce => Box::new(BruteForceBroadPhase),
            Self::SpatialHash { cell_size } => Box::new(SpatialHashBroadPhase::new(cell_size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision_layers::DEFAULT_LAYER;
    use crate::physics::rigid_body::RigidBodyFactory;

    fn unit() -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }

    fn proxy(world: &mut World, position: Vec3, dimensions: Vec3, mass: f32) -> Entity {
        RigidBodyFactory::new().create_rigid_body(world, position, dimensions, mass, DEFAULT_LAYER)
    }

    #[test]
    fn test_aabb_overlap_is_inclusive() {
        let a = Aabb::from_center(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5));
        let touching = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        let apart = Aabb::from_center(Vec3::new(1.01, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_aabb_uses_scale() {
        let transform = TransformComponent::identity().with_scale(Vec3::new(2.0, 1.0, 1.0));
        let collider = BoxColliderComponent::new(1.0, 1.0, 1.0);
        let aabb = Aabb::from_collider(&transform, &collider);
        assert_eq!(aabb.min, Vec3::new(-1.0, -0.5, -0.5));
        assert_eq!(aabb.max, Vec3::new(1.0, 0.5, 0.5));
    }

    #[test]
    fn test_pair_is_canonical() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        assert_eq!(CollisionPair::new(b, a), CollisionPair::new(a, b));
        assert_eq!(CollisionPair::new(b, a).entity_a, a);
    }

    #[test]
    fn test_brute_force_skips_static_pairs() {
        let mut world = World::new();
        let ground = proxy(&mut world, Vec3::zeros(), Vec3::new(10.0, 1.0, 10.0), 0.0);
        let _wall = proxy(&mut world, Vec3::new(0.0, 1.0, 0.0), unit(), 0.0);
        let crate_box = proxy(&mut world, Vec3::new(3.0, 0.5, 0.0), unit(), 1.0);
        let _far = proxy(&mut world, Vec3::new(50.0, 0.0, 0.0), unit(), 1.0);

        let pairs = BruteForceBroadPhase.find_pairs(&collect_proxies(&world));
        assert_eq!(pairs, vec![CollisionPair::new(ground, crate_box)]);
    }

    #[test]
    fn test_spatial_hash_matches_brute_force() {
        let mut world = World::new();
        proxy(&mut world, Vec3::new(0.0, -1.0, 0.0), Vec3::new(20.0, 0.4, 20.0), 0.0);
        proxy(&mut world, Vec3::new(-10.0, 0.0, 0.0), Vec3::new(0.4, 10.0, 20.0), 0.0);
        // Deterministic scatter including exact contacts on cell boundaries
        for i in 0..40_u8 {
            let f = f32::from(i);
            let position = Vec3::new((f * 1.7) % 9.0 - 4.5, (f * 0.9) % 6.0 - 1.0, (f * 2.3) % 8.0 - 4.0);
            proxy(&mut world, position, Vec3::new(1.0 + (f % 3.0) * 0.5, 1.0, 1.0), 1.0);
        }
        proxy(&mut world, Vec3::new(1.0, 20.0, 0.0), unit(), 1.0);
        proxy(&mut world, Vec3::new(2.0, 20.0, 0.0), unit(), 1.0);

        let proxies = collect_proxies(&world);
        let expected = BruteForceBroadPhase.find_pairs(&proxies);
        assert!(!expected.is_empty());
        for cell_size in [0.5, 1.0, 2.0, 7.5] {
            let mut grid = SpatialHashBroadPhase::new(cell_size);
            assert_eq!(grid.find_pairs(&proxies), expected, "cell size {cell_size}");
        }
    }

    #[test]
    fn test_spatial_hash_reuse_between_calls() {
        let mut world = World::new();
        let a = proxy(&mut world, Vec3::zeros(), unit(), 1.0);
        let b = proxy(&mut world, Vec3::new(0.5, 0.0, 0.0), unit(), 1.0);

        let mut grid = SpatialHashBroadPhase::new(1.0);
        assert_eq!(grid.find_pairs(&collect_proxies(&world)), vec![CollisionPair::new(a, b)]);

        world.get_component_mut::<TransformComponent>(b).unwrap().position.x = 10.0;
        assert!(grid.find_pairs(&collect_proxies(&world)).is_empty());
    }

    #[test]
    fn test_kind_builds_strategy() {
        assert_eq!(BroadPhaseKind::BruteForce.build().name(), "brute-force");
        assert_eq!(BroadPhaseKind::SpatialHash { cell_size: 4.0 }.build().name(), "spatial-hash");
        assert_eq!(SpatialHashBroadPhase::new(-1.0).cell_size(), 1.0);
    }
}
