//! Falling boxes demo
//!
//! Builds a ground slab between two walls, drops a handful of randomly placed
//! boxes onto it and reports their state once per simulated second.
//!
//! Usage: `titanium_demo [engine.toml|engine.ron]`

use rand::Rng;
use thiserror::Error;
use titanium_physics::foundation::logging;
use titanium_physics::prelude::*;

const TICK: f32 = 1.0 / 60.0;
const FRAMES: u32 = 300;
const REPORT_EVERY: u32 = 60;
const BOX_COUNT: usize = 15;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("scene setup failed: {0}")]
    Scene(String),

    #[error("{0} invariant violation(s) after simulation")]
    Invariants(usize),
}

struct Scene {
    ground: Entity,
    boxes: Vec<Entity>,
}

fn build_scene(engine: &mut PhysicsEngine) -> Result<Scene, DemoError> {
    let static_body = |engine: &mut PhysicsEngine, position: Vec3, dimensions: Vec3| {
        let entity = engine.create_rigid_body(position, dimensions, 0.0, DEFAULT_LAYER);
        if entity.is_valid() {
            Ok(entity)
        } else {
            Err(DemoError::Scene(format!("static body at {position:?} rejected")))
        }
    };

    let ground = static_body(engine, Vec3::new(0.0, -1.0, 0.0), Vec3::new(20.0, 0.4, 20.0))?;
    static_body(engine, Vec3::new(-10.0, 0.0, 0.0), Vec3::new(0.4, 10.0, 20.0))?;
    static_body(engine, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.4, 10.0, 20.0))?;

    let mut rng = rand::thread_rng();
    let mut boxes = Vec::with_capacity(BOX_COUNT);
    for _ in 0..BOX_COUNT {
        let position = Vec3::new(rng.gen_range(-8.0..8.0), rng.gen_range(2.0..10.0), rng.gen_range(-8.0..8.0));
        let size = rng.gen_range(0.5..1.5);
        let mass = rng.gen_range(0.5..5.0);
        let entity = engine.create_rigid_body(position, Vec3::new(size, size, size), mass, DEFAULT_LAYER);
        if !entity.is_valid() {
            return Err(DemoError::Scene(format!("box at {position:?} rejected")));
        }
        boxes.push(entity);
    }

    log::info!("Scene ready: {} rigid bodies", engine.rigid_body_count());
    Ok(Scene { ground, boxes })
}

fn report(engine: &PhysicsEngine, scene: &Scene, frame: u32) {
    let stats = engine.collision_system().stats();
    log::info!(
        "t={:.1}s: {} contacts, {} candidate pairs, tick {:?}",
        f64::from(frame) * f64::from(TICK),
        stats.contact_count,
        stats.candidate_pairs,
        stats.update_time
    );
    for &entity in &scene.boxes {
        if let Some(body) = engine.rigid_body(entity) {
            let p = body.transform.position;
            let v = body.physics.velocity;
            log::info!(
                "  box {entity}: pos ({:6.2}, {:6.2}, {:6.2}) vel ({:6.2}, {:6.2}, {:6.2}){}",
                p.x,
                p.y,
                p.z,
                v.x,
                v.y,
                v.z,
                if engine.collision_system().are_colliding(entity, scene.ground) { " [on ground]" } else { "" }
            );
        }
    }
}

fn run() -> Result<(), DemoError> {
    let mut engine = match std::env::args().nth(1) {
        Some(path) => PhysicsEngine::from_config_file(path)?,
        None => PhysicsEngine::new(EngineConfig::default()),
    };

    let scene = build_scene(&mut engine)?;
    for frame in 1..=FRAMES {
        engine.tick(TICK);
        if frame % REPORT_EVERY == 0 {
            report(&engine, &scene, frame);
        }
    }

    let violations = engine.validate();
    for violation in &violations {
        log::error!("{violation}");
    }
    if violations.is_empty() {
        log::info!("Simulation finished, all invariants hold");
        Ok(())
    } else {
        Err(DemoError::Invariants(violations.len()))
    }
}

fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        logging::init();
    } else {
        logging::init_with_filter("info");
    }

    log::info!("Starting Titanium falling boxes demo");
    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}
