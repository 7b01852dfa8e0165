//! Narrow-phase geometry
//!
//! Boxes, the OBB/AABB separating axis test, and the world-space builder.
//!
//! # Architecture
//!
//! - **Model Space Storage**: a boundary's box lives in local coordinates ([`LocalShape`])
//! - **On-Demand Transformation**: a fresh world-space [`Obb`] is built each tick
//! - **Immutable Values**: boxes have no setters and are never shared mutably
//!
//! # Module Organization
//!
//! - [`primitives`] - [`Aabb`] and [`Obb`] with validated construction
//! - [`sat`] - 15-axis intersection test
//! - [`shape`] - Local shape and the yaw-only world-space builder

pub mod primitives;
pub mod sat;
pub mod shape;

pub use primitives::{Aabb, Obb};
pub use sat::{find_separating_axis, intersects, intersects_with_threshold, AxisFamily, SeparatingAxis};
pub use shape::{build_world_obb, LocalShape};
