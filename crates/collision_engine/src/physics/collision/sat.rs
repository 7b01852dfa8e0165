//! Separating Axis Theorem test between an oriented box and an axis-aligned box
//!
//! Two convex boxes are disjoint iff some axis separates their projections.
//! For an OBB against an AABB there are 15 candidates: the 3 OBB axes, the 3
//! world axes and the 9 cross products of one from each set.
//!
//! The comparison is strict (`d > R_obb + R_aabb` separates), so boxes that
//! exactly touch are reported as intersecting on every axis family.

use super::primitives::{aabb_projected_radius, Aabb, Obb};
use crate::foundation::math::{constants::MIN_AXIS_LENGTH_SQUARED, Vec3, WORLD_AXES};

/// Which group of candidate axes an axis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFamily {
    /// One of the OBB's own axes (index 0..3)
    ObbAxis(usize),
    /// One of the world axes (index 0..3)
    WorldAxis(usize),
    /// Cross product of OBB axis `.0` with world axis `.1`
    Cross(usize, usize),
}

/// A separating axis found by the SAT test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatingAxis {
    /// Where the axis came from
    pub family: AxisFamily,
    /// The unit axis
    pub axis: Vec3,
    /// Gap between the projections (always positive)
    pub gap: f64,
}

/// Check for intersection between an OBB and an AABB
///
/// Returns `true` when no separating axis exists among the 15 candidates.
pub fn intersects(obb: &Obb, aabb: &Aabb) -> bool {
    find_separating_axis(obb, aabb, MIN_AXIS_LENGTH_SQUARED).is_none()
}

/// Like [`intersects`] with a configurable degeneracy threshold
pub fn intersects_with_threshold(obb: &Obb, aabb: &Aabb, degenerate_axis_threshold: f64) -> bool {
    find_separating_axis(obb, aabb, degenerate_axis_threshold).is_none()
}

/// Find the first separating axis, testing OBB axes, then world axes, then
/// cross products
///
/// Axes whose squared length is below `degenerate_axis_threshold` (typically
/// cross products of nearly parallel axes) are skipped; a skipped axis never
/// separates.
pub fn find_separating_axis(
    obb: &Obb,
    aabb: &Aabb,
    degenerate_axis_threshold: f64,
) -> Option<SeparatingAxis> {
    let center_offset = aabb.center() - obb.center();

    let test = |family: AxisFamily, axis: Vec3| -> Option<SeparatingAxis> {
        let axis = unit_axis(axis, degenerate_axis_threshold)?;

        let radius_sum = obb.projected_radius(&axis) + aabb_projected_radius(aabb, &axis);
        let distance = center_offset.dot(&axis).abs();

        if distance > radius_sum {
            log::trace!("Separating axis {family:?}: gap {}", distance - radius_sum);
            Some(SeparatingAxis {
                family,
                axis,
                gap: distance - radius_sum,
            })
        } else {
            None
        }
    };

    let obb_axes = obb.axes();

    // Test 1: the OBB's own axes
    for (i, axis) in obb_axes.iter().enumerate() {
        if let Some(found) = test(AxisFamily::ObbAxis(i), *axis) {
            return Some(found);
        }
    }

    // Test 2: world axes (the AABB's implicit axes)
    for (j, axis) in WORLD_AXES.iter().enumerate() {
        if let Some(found) = test(AxisFamily::WorldAxis(j), *axis) {
            return Some(found);
        }
    }

    // Test 3: the 9 cross products
    for (i, obb_axis) in obb_axes.iter().enumerate() {
        for (j, world_axis) in WORLD_AXES.iter().enumerate() {
            if let Some(found) = test(AxisFamily::Cross(i, j), obb_axis.cross(world_axis)) {
                return Some(found);
            }
        }
    }

    None
}

/// Normalize a candidate axis, or `None` when it is shorter than the threshold
///
/// The threshold is the only cutoff; a zero vector is always skipped.
fn unit_axis(axis: Vec3, degenerate_axis_threshold: f64) -> Option<Vec3> {
    let length_squared = axis.norm_squared();
    if length_squared < degenerate_axis_threshold || length_squared == 0.0 {
        return None;
    }
    Some(axis / length_squared.sqrt())
}
