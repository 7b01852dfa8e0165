//! # Collision Engine
//!
//! Narrow-band collision between an oriented bounding box and axis-aligned
//! bounding boxes, with a simple push-apart response.
//!
//! ## Features
//!
//! - **SAT Test**: exact OBB/AABB intersection over 15 candidate axes
//! - **Yaw-Only Boundaries**: world-space boxes rebuilt from a local shape every tick
//! - **Push Response**: horizontal minimum-overlap push applied as a velocity impulse
//! - **Pluggable Broad Phase**: hosts supply their own spatial index
//! - **File Configuration**: validated tunables loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collision_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = LinearBroadPhase::new();
//!     let owner = world.insert(
//!         SimpleBody::new(Vec3::zeros(), Vec3::new(2.0, 1.0, 2.0))?
//!             .with_layers(CollisionLayers::BOUNDARY),
//!     );
//!     world.insert(SimpleBody::new(Vec3::new(0.8, 0.0, 0.0), Vec3::repeat(0.5))?);
//!
//!     let shape = LocalShape::new(Vec3::new(0.5, 0.25, 0.5))?;
//!     let boundary = CollisionBoundary::new(shape, CollisionLayers::BOUNDARY, CollisionConfig::default())?
//!         .with_owner(owner);
//!
//!     let mut counters = CollisionCounters::default();
//!     boundary.tick_owner(&mut world, &mut counters)?;
//!     println!("{} collisions", counters.detected);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core modules
pub mod core;

pub mod config;
pub mod events;
pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for collision engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        core::config::{CollisionConfig, CorrectionMode},
        events::{
            CollisionCounters, CollisionEvent, CollisionObserver, EventType, LogObserver,
            NoopObserver, ObserverRegistry, RecordingObserver,
        },
        foundation::math::{GeometryError, Vec3, VectorExt},
        physics::{
            intersects, resolve, Aabb, BodyHandle, CandidateFilter, CollidableBody,
            CollisionBoundary, CollisionLayers, LocalShape, Obb, OwnerPose, PushAxis, PushVector,
            Resolver, SimpleBody, TickReport,
        },
        spatial::{BroadPhase, LinearBroadPhase},
    };
}
