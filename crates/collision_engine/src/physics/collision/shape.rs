//! Model-space collision shape and the world-space OBB builder
//!
//! The shape of a collision boundary is stored once, in local coordinates,
//! and transformed to world space on demand each tick. Only yaw is applied:
//! boundary bodies stay upright.

use super::primitives::{Aabb, Obb};
use crate::foundation::math::{utils, GeometryError, Vec3, VectorExt};

/// Fixed model-space box for one collision-boundary kind
///
/// Centered on the local origin. Built once and shared by reference; there is
/// no interior mutability, so one value can serve any number of boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalShape {
    obb: Obb,
}

impl LocalShape {
    /// Box with the given half-extents along the local X, Y and Z axes
    pub fn new(half_extents: Vec3) -> Result<Self, GeometryError> {
        Ok(Self {
            obb: Obb::axis_aligned(Vec3::zeros(), half_extents)?,
        })
    }

    /// Box with custom local axes (re-normalized and checked by [`Obb::new`])
    pub fn with_axes(axes: [Vec3; 3], half_extents: Vec3) -> Result<Self, GeometryError> {
        Ok(Self {
            obb: Obb::new(Vec3::zeros(), axes, half_extents)?,
        })
    }

    /// Box sized from a host body's AABB, each half-extent multiplied by `scale`
    ///
    /// `from_aabb(aabb, 0.25)` gives a box a quarter of the body's size per axis.
    pub fn from_aabb(aabb: &Aabb, scale: f64) -> Result<Self, GeometryError> {
        if !scale.is_finite() {
            return Err(GeometryError::NonFinite("shape scale"));
        }
        Self::new(aabb.half_extents() * scale)
    }

    /// Box with a square footprint of `width` and the given `height`
    pub fn from_dimensions(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(Vec3::new(width * 0.5, height * 0.5, width * 0.5))
    }

    /// Half-extents along the local axes
    pub fn half_extents(&self) -> Vec3 {
        self.obb.half_extents()
    }

    /// Local axes
    pub fn axes(&self) -> &[Vec3; 3] {
        self.obb.axes()
    }

    /// Largest half-extent, used to size the broad-phase search region
    pub fn max_half_extent(&self) -> f64 {
        utils::max_component(&self.half_extents())
    }

    /// Build the world-space OBB for this tick
    ///
    /// Rotates every local axis about world +Y by `yaw_degrees` and centers
    /// the box at `position`. Half-extents are carried over unchanged.
    pub fn to_world_space(&self, position: Vec3, yaw_degrees: f64) -> Result<Obb, GeometryError> {
        build_world_obb(self, position, yaw_degrees)
    }
}

/// Produce the world-space OBB for a body from its local shape and pose
pub fn build_world_obb(
    local_shape: &LocalShape,
    position: Vec3,
    yaw_degrees: f64,
) -> Result<Obb, GeometryError> {
    if !position.all_finite() {
        return Err(GeometryError::NonFinite("body position"));
    }
    if !yaw_degrees.is_finite() {
        return Err(GeometryError::NonFinite("body yaw"));
    }

    let local_axes = local_shape.axes();
    let axes = [
        local_axes[0].rotate_yaw(yaw_degrees),
        local_axes[1].rotate_yaw(yaw_degrees),
        local_axes[2].rotate_yaw(yaw_degrees),
    ];

    Obb::new(position, axes, local_shape.half_extents())
}

impl Default for LocalShape {
    fn default() -> Self {
        Self { obb: Obb::unit() }
    }
}

impl From<Obb> for LocalShape {
    /// Keep an existing box's axes and half-extents, moved to the local origin
    fn from(obb: Obb) -> Self {
        Self {
            obb: obb.recentered(Vec3::zeros()),
        }
    }
}
