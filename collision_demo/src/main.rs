//! Collision boundary demo
//!
//! A spinning boundary sits at the origin while a handful of bodies drift
//! into it. Each tick the boundary pushes whatever overlaps it; pushes are
//! logged at debug level and a summary is printed at the end.
//!
//! Usage: `collision_demo [config.toml|config.ron] [ticks]`
//!
//! Set `RUST_LOG=debug` to see every collision.

use collision_engine::foundation::logging;
use collision_engine::prelude::*;
use slotmap::SlotMap;

const DEFAULT_TICKS: u32 = 120;

/// Yaw added to the boundary every tick, in degrees
const SPIN_PER_TICK: f64 = 3.0;

/// Host-side world: owns the bodies and integrates them
///
/// Implements [`BroadPhase`] itself so it can keep concrete body types and
/// step them after the collision pass.
struct DemoWorld {
    bodies: SlotMap<BodyHandle, SimpleBody>,
}

impl DemoWorld {
    fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
        }
    }

    fn spawn(&mut self, body: SimpleBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    fn step(&mut self) {
        for body in self.bodies.values_mut() {
            body.step();
        }
    }
}

impl BroadPhase for DemoWorld {
    fn query_candidates(&self, region: &Aabb, filter: &CandidateFilter) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|(handle, body)| !filter.excludes(*handle, *body) && region.intersects(&body.aabb()))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn body(&self, handle: BodyHandle) -> Option<&dyn CollidableBody> {
        self.bodies.get(handle).map(|body| body as &dyn CollidableBody)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn CollidableBody> {
        self.bodies.get_mut(handle).map(|body| body as &mut dyn CollidableBody)
    }
}

/// Logs every event and keeps running totals
#[derive(Default)]
struct DemoObserver {
    log: LogObserver,
    counters: CollisionCounters,
}

impl CollisionObserver for DemoObserver {
    fn on_event(&mut self, event: &CollisionEvent) {
        self.log.on_event(event);
        self.counters.on_event(event);
    }
}

fn load_config(path: Option<&str>) -> Result<CollisionConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading collision config from {path}");
            CollisionConfig::load_from_file(path)
        }
        None => Ok(CollisionConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().as_deref())?;
    let ticks = match args.next() {
        Some(ticks) => ticks.parse()?,
        None => DEFAULT_TICKS,
    };
    log::info!(
        "push factor {}, margin {}, correction {:?}",
        config.push_factor,
        config.broad_phase_margin,
        config.correction_mode()
    );

    let mut world = DemoWorld::new();

    // The boundary is a quarter of its owner's size on every axis
    let owner_body = SimpleBody::new(Vec3::zeros(), Vec3::new(4.0, 2.0, 4.0))?
        .with_layers(CollisionLayers::BOUNDARY);
    let shape = LocalShape::from_aabb(&owner_body.aabb(), 0.25)?;
    let owner = world.spawn(owner_body);

    let boundary = CollisionBoundary::new(shape, CollisionLayers::BOUNDARY, config)?.with_owner(owner);

    let starts = [
        (Vec3::new(3.0, 0.0, 0.2), Vec3::new(-0.05, 0.0, 0.0)),
        (Vec3::new(-2.5, 0.0, -0.4), Vec3::new(0.04, 0.0, 0.0)),
        (Vec3::new(0.3, 0.0, 2.8), Vec3::new(0.0, 0.0, -0.06)),
        (Vec3::new(-0.2, 0.0, -3.5), Vec3::new(0.0, 0.0, 0.05)),
    ];
    for (position, velocity) in starts {
        let mut body = SimpleBody::new(position, Vec3::repeat(0.25))?
            .with_layers(CollisionLayers::MOB)
            .with_damping(0.98);
        body.velocity = velocity;
        world.spawn(body);
    }

    // Another boundary's body is never pushed
    world.spawn(
        SimpleBody::new(Vec3::new(0.5, 0.0, 0.0), Vec3::repeat(0.25))?.with_layers(CollisionLayers::BOUNDARY),
    );

    let mut observer = DemoObserver::default();
    let mut totals = TickReport::default();

    for tick in 0..ticks {
        if let Some(owner_body) = world.bodies.get_mut(owner) {
            owner_body.yaw = (owner_body.yaw + SPIN_PER_TICK) % 360.0;
        }

        if let Some(report) = boundary.tick_owner(&mut world, &mut observer)? {
            if report.collisions > 0 {
                log::debug!("tick {tick}: {report:?}");
            }
            totals.merge(report);
        }

        world.step();
    }

    log::info!(
        "{ticks} ticks: {} candidates, {} collisions, {} pushes",
        totals.candidates,
        totals.collisions,
        totals.pushes
    );
    for (handle, body) in &world.bodies {
        if handle != owner {
            log::info!(
                "{handle:?} ended at ({:.2}, {:.2}, {:.2})",
                body.position.x,
                body.position.y,
                body.position.z
            );
        }
    }
    println!(
        "detected {} collisions, applied {} pushes",
        observer.counters.detected, observer.counters.pushes
    );

    Ok(())
}
