//! Physics module for collision detection and response
//!
//! Detects overlaps between a boundary's oriented box and nearby bodies'
//! axis-aligned boxes, and pushes overlapping bodies out along the horizontal
//! axis of least penetration.

pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use body::{BodyHandle, CollidableBody, SimpleBody};
pub use collision::{
    build_world_obb, find_separating_axis, intersects, intersects_with_threshold, Aabb, AxisFamily,
    LocalShape, Obb, SeparatingAxis,
};
pub use collision_layers::{CandidateFilter, CollisionLayers};
pub use collision_system::{CollisionBoundary, OwnerPose, TickReport};
pub use resolver::{resolve, AppliedPush, PushAxis, PushVector, Resolver};
