//! Cross-module tests for the collision pass
//!
//! - [`scenarios`] - fixed input/expected-output cases
//! - [`properties`] - invariants checked over sweeps of poses and offsets

mod scenarios;

use crate::foundation::math::{Vec3, VectorExt, WORLD_AXES};
use crate::physics::collision::Obb;

/// Separating-axis test between two oriented boxes
///
/// Independent of the OBB/AABB test so the two can be compared.
pub(super) fn obb_obb_intersects(a: &Obb, b: &Obb) -> bool {
    let offset = b.center() - a.center();
    let mut axes: Vec<Vec3> = Vec::with_capacity(15);
    axes.extend_from_slice(a.axes());
    axes.extend_from_slice(b.axes());
    for axis_a in a.axes() {
        for axis_b in b.axes() {
            axes.push(axis_a.cross(axis_b));
        }
    }

    !axes.iter().any(|axis| {
        if axis.norm_squared() < 1e-6 {
            return false;
        }
        let axis = axis.normalize();
        offset.dot(&axis).abs() > a.projected_radius(&axis) + b.projected_radius(&axis)
    })
}

/// Rotate a box about world +Y through `pivot`
pub(super) fn rotate_about(obb: &Obb, pivot: Vec3, yaw_degrees: f64) -> Obb {
    let center = pivot + (obb.center() - pivot).rotate_yaw(yaw_degrees);
    let axes = obb.axes().map(|axis| axis.rotate_yaw(yaw_degrees));
    Obb::new(center, axes, obb.half_extents()).unwrap()
}

#[test]
fn test_obb_obb_helper_matches_world_axes() {
    let a = Obb::new(Vec3::zeros(), WORLD_AXES, Vec3::repeat(1.0)).unwrap();
    let touching = Obb::axis_aligned(Vec3::new(2.0, 0.0, 0.0), Vec3::repeat(1.0)).unwrap();
    let apart = Obb::axis_aligned(Vec3::new(2.5, 0.0, 0.0), Vec3::repeat(1.0)).unwrap();
    assert!(obb_obb_intersects(&a, &touching));
    assert!(!obb_obb_intersects(&a, &apart));
}
