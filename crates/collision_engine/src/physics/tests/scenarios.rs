//! Fixed collision scenarios with known answers

use approx::assert_relative_eq;

use crate::core::config::CollisionConfig;
use crate::foundation::math::{constants::MIN_AXIS_LENGTH_SQUARED, Vec3, WORLD_AXES};
use crate::physics::body::{CollidableBody, SimpleBody};
use crate::physics::collision::primitives::aabb_projected_radius;
use crate::physics::collision::{find_separating_axis, intersects, Aabb, AxisFamily, LocalShape, Obb};
use crate::physics::resolver::{PushAxis, Resolver};

fn unit_obb() -> Obb {
    Obb::axis_aligned(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap()
}

#[test]
fn test_corner_overlap_intersects() {
    let aabb = Aabb::new(Vec3::new(0.5, 0.0, 0.5), Vec3::new(2.5, 2.0, 2.5)).unwrap();
    assert!(intersects(&unit_obb(), &aabb));
}

#[test]
fn test_diagonal_gap_separates_on_x() {
    let aabb = Aabb::new(Vec3::new(3.0, 0.0, 3.0), Vec3::new(5.0, 2.0, 5.0)).unwrap();
    assert!(!intersects(&unit_obb(), &aabb));

    let found = find_separating_axis(&unit_obb(), &aabb, MIN_AXIS_LENGTH_SQUARED).unwrap();
    assert_relative_eq!(found.axis.x.abs(), 1.0);
    // OBB face at x = 1, AABB face at x = 3
    assert_relative_eq!(found.gap, 2.0, epsilon = 1e-12);
}

#[test]
fn test_rotated_thin_box_reaches_cube() {
    let shape = LocalShape::new(Vec3::new(1.0, 0.1, 1.0)).unwrap();
    let obb = shape.to_world_space(Vec3::zeros(), 45.0).unwrap();
    let aabb = Aabb::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::repeat(0.5)).unwrap();

    // The diamond's tip reaches x = sqrt(2), past the cube's near face at x = 1
    assert!(intersects(&obb, &aabb));
    assert!(find_separating_axis(&obb, &aabb, MIN_AXIS_LENGTH_SQUARED).is_none());

    // None of the 9 cross-product axes may reject the pair on its own
    let offset = aabb.center() - obb.center();
    for (i, obb_axis) in obb.axes().iter().enumerate() {
        for (j, world_axis) in WORLD_AXES.iter().enumerate() {
            let axis = obb_axis.cross(world_axis);
            if axis.norm_squared() < MIN_AXIS_LENGTH_SQUARED {
                continue;
            }
            let axis = axis.normalize();
            let radius_sum = obb.projected_radius(&axis) + aabb_projected_radius(&aabb, &axis);
            assert!(
                offset.dot(&axis).abs() <= radius_sum,
                "{:?} separated",
                AxisFamily::Cross(i, j)
            );
        }
    }
}

#[test]
fn test_rotated_thin_box_misses_cube_further_out() {
    let shape = LocalShape::new(Vec3::new(1.0, 0.1, 1.0)).unwrap();
    let obb = shape.to_world_space(Vec3::zeros(), 45.0).unwrap();
    let aabb = Aabb::from_center_half_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::repeat(0.5)).unwrap();
    assert!(!intersects(&obb, &aabb));
}

#[test]
fn test_push_scenario() {
    let obb = unit_obb();
    let center_to_center = Vec3::new(1.2, 0.0, 0.3);
    let mut body = SimpleBody::new(center_to_center, Vec3::repeat(0.5)).unwrap();
    let aabb = body.aabb();
    assert!(intersects(&obb, &aabb));

    let resolver = Resolver::new(&CollisionConfig::new().with_push_factor(0.5).unwrap());
    let push = resolver.resolve(&obb, &aabb, center_to_center);
    assert_eq!(push.axis, PushAxis::X);
    assert_relative_eq!(push.overlap, 0.3, epsilon = 1e-12);
    assert_relative_eq!(push.magnitude(), 0.301, epsilon = 1e-12);

    let applied = resolver.apply(&mut body, &push, center_to_center).unwrap();
    assert!(applied.velocity_delta.x > 0.0);
    assert_relative_eq!(applied.velocity_delta, Vec3::new(0.1505, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_push_scenario_mirrored() {
    let obb = unit_obb();
    let center_to_center = Vec3::new(-1.2, 0.0, 0.3);
    let mut body = SimpleBody::new(center_to_center, Vec3::repeat(0.5)).unwrap();

    let resolver = Resolver::default();
    let push = resolver.resolve(&obb, &body.aabb(), center_to_center);
    let applied = resolver.apply(&mut body, &push, center_to_center).unwrap();
    assert_eq!(push.axis, PushAxis::X);
    assert_relative_eq!(applied.velocity_delta, Vec3::new(-0.1505, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_quarter_size_boundary_from_host_box() {
    // A host body 4 wide and 2 tall gets a 1 x 0.5 x 1 boundary
    let host_box = Aabb::from_center_half_extents(Vec3::new(10.0, 1.0, 10.0), Vec3::new(2.0, 1.0, 2.0)).unwrap();
    let shape = LocalShape::from_aabb(&host_box, 0.25).unwrap();
    let obb = shape.to_world_space(host_box.center(), 0.0).unwrap();

    let inside = Aabb::from_center_half_extents(Vec3::new(10.55, 1.0, 10.0), Vec3::repeat(0.1)).unwrap();
    let outside = Aabb::from_center_half_extents(Vec3::new(10.8, 1.0, 10.0), Vec3::repeat(0.1)).unwrap();
    assert!(intersects(&obb, &inside));
    assert!(!intersects(&obb, &outside));
}
