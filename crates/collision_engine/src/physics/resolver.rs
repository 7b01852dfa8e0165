//! Collision response: push a body out of a collision boundary
//!
//! The response is a heuristic minimum translation vector restricted to the
//! horizontal plane. Of the X and Z overlaps between the boundary's box and
//! the body's box, the smaller one is chosen and the body is nudged along that
//! world axis, away from the boundary. Each push is scaled down by the push
//! factor, so separation happens over a few ticks rather than in one jump.

use crate::core::config::{CollisionConfig, CorrectionMode, DEFAULT_SEPARATION_EPSILON};
use crate::foundation::math::Vec3;
use crate::physics::body::CollidableBody;
use crate::physics::collision::{Aabb, Obb};

/// World axis a push acts along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushAxis {
    /// World X
    X,
    /// World Z
    Z,
}

/// Unscaled separation push for one confirmed collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushVector {
    /// Axis the push acts along
    pub axis: PushAxis,
    /// Overlap along that axis before clamping (negative when the boxes only
    /// overlap through the other axes)
    pub overlap: f64,
    /// The push itself; only the chosen axis component is non-zero
    pub vector: Vec3,
}

impl PushVector {
    /// Length of the push
    pub fn magnitude(&self) -> f64 {
        self.vector.x.abs() + self.vector.z.abs()
    }
}

/// What [`Resolver::apply`] did to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedPush {
    /// Velocity added to the body
    pub velocity_delta: Vec3,
    /// New position, if the body was also teleported
    pub teleported_to: Option<Vec3>,
}

/// Compute the push for a body whose box overlaps the boundary's box
///
/// `center_to_center` is the body's position minus the boundary owner's
/// position. Uses the default separation epsilon.
pub fn resolve(obb: &Obb, aabb: &Aabb, center_to_center: Vec3) -> PushVector {
    push_along_smaller_overlap(obb, aabb, center_to_center, DEFAULT_SEPARATION_EPSILON)
}

fn push_along_smaller_overlap(
    obb: &Obb,
    aabb: &Aabb,
    center_to_center: Vec3,
    epsilon: f64,
) -> PushVector {
    let obb_half = obb.half_extents();
    let aabb_half = aabb.half_extents();

    let overlap_x = (obb_half.x + aabb_half.x) - center_to_center.x.abs();
    let overlap_z = (obb_half.z + aabb_half.z) - center_to_center.z.abs();

    // Ties go to Z
    let (axis, overlap, component) = if overlap_x < overlap_z {
        (PushAxis::X, overlap_x, center_to_center.x)
    } else {
        (PushAxis::Z, overlap_z, center_to_center.z)
    };

    let magnitude = overlap.max(0.0) + epsilon;
    // A body exactly on the boundary's plane is pushed toward negative
    let signed = if component > 0.0 { magnitude } else { -magnitude };

    let vector = match axis {
        PushAxis::X => Vec3::new(signed, 0.0, 0.0),
        PushAxis::Z => Vec3::new(0.0, 0.0, signed),
    };

    PushVector {
        axis,
        overlap,
        vector,
    }
}

/// Computes and applies pushes with one boundary's settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    push_factor: f64,
    separation_epsilon: f64,
    correction: CorrectionMode,
}

impl Resolver {
    /// Build a resolver from an already validated configuration
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            push_factor: config.push_factor,
            separation_epsilon: config.separation_epsilon,
            correction: config.correction_mode(),
        }
    }

    /// Push factor in use
    pub fn push_factor(&self) -> f64 {
        self.push_factor
    }

    /// Correction strategy in use
    pub fn correction(&self) -> CorrectionMode {
        self.correction
    }

    /// True when [`Resolver::apply`] never mutates anything
    pub fn is_detection_only(&self) -> bool {
        self.push_factor == 0.0
    }

    /// Compute the push using the configured separation epsilon
    pub fn resolve(&self, obb: &Obb, aabb: &Aabb, center_to_center: Vec3) -> PushVector {
        push_along_smaller_overlap(obb, aabb, center_to_center, self.separation_epsilon)
    }

    /// Apply a push to `body`
    ///
    /// Adds `push * push_factor` to the body's velocity. With a teleport
    /// correction configured, also moves the body by
    /// `center_to_center * push_factor`, clamped to the configured length.
    /// Returns `None` and leaves the body untouched in detection-only mode.
    pub fn apply(
        &self,
        body: &mut dyn CollidableBody,
        push: &PushVector,
        center_to_center: Vec3,
    ) -> Option<AppliedPush> {
        if self.is_detection_only() {
            return None;
        }

        let velocity_delta = push.vector * self.push_factor;
        body.add_velocity(velocity_delta);

        let teleported_to = match self.correction {
            CorrectionMode::VelocityOnly => None,
            CorrectionMode::VelocityAndTeleport { max_distance } => {
                let mut offset = center_to_center * self.push_factor;
                let length = offset.norm();
                if length > max_distance {
                    offset *= max_distance / length;
                }
                if offset.norm_squared() > 0.0 {
                    let target = body.position() + offset;
                    body.teleport_to(target);
                    Some(target)
                } else {
                    None
                }
            }
        };

        Some(AppliedPush {
            velocity_delta,
            teleported_to,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&CollisionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::SimpleBody;
    use approx::assert_relative_eq;

    fn unit_obb() -> Obb {
        Obb::axis_aligned(Vec3::zeros(), Vec3::repeat(1.0)).unwrap()
    }

    fn unit_cube_at(center: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, Vec3::repeat(0.5)).unwrap()
    }

    #[test]
    fn test_picks_smaller_overlap() {
        let c2c = Vec3::new(1.2, 0.0, 0.3);
        let push = resolve(&unit_obb(), &unit_cube_at(c2c), c2c);
        assert_eq!(push.axis, PushAxis::X);
        assert_relative_eq!(push.overlap, 0.3, epsilon = 1e-12);
        assert_relative_eq!(push.vector, Vec3::new(0.301, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_tie_goes_to_z() {
        let c2c = Vec3::new(0.5, 0.0, 0.5);
        let push = resolve(&unit_obb(), &unit_cube_at(c2c), c2c);
        assert_eq!(push.axis, PushAxis::Z);
        assert_relative_eq!(push.vector, Vec3::new(0.0, 0.0, 1.001), epsilon = 1e-12);
    }

    #[test]
    fn test_sign_follows_center_offset() {
        let c2c = Vec3::new(-1.2, 0.0, 0.0);
        let push = resolve(&unit_obb(), &unit_cube_at(c2c), c2c);
        assert_eq!(push.axis, PushAxis::X);
        assert!(push.vector.x < 0.0);

        // Exactly centered pushes negative
        let push = resolve(&unit_obb(), &unit_cube_at(Vec3::zeros()), Vec3::zeros());
        assert_eq!(push.axis, PushAxis::Z);
        assert_relative_eq!(push.vector.z, -1.501, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_overlap_clamped_to_epsilon() {
        // Overlapping only through a rotated OBB corner: the horizontal overlap
        // estimate can be negative, but the push never shrinks below epsilon
        let c2c = Vec3::new(0.0, 0.0, 3.0);
        let push = resolve(&unit_obb(), &unit_cube_at(c2c), c2c);
        assert!(push.overlap < 0.0);
        assert_relative_eq!(push.magnitude(), DEFAULT_SEPARATION_EPSILON, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_adds_scaled_velocity() {
        let resolver = Resolver::default();
        let c2c = Vec3::new(1.2, 0.0, 0.3);
        let mut body = SimpleBody::new(c2c, Vec3::repeat(0.5)).unwrap();
        let push = resolver.resolve(&unit_obb(), &body.aabb(), c2c);

        let applied = resolver.apply(&mut body, &push, c2c).unwrap();
        assert_relative_eq!(applied.velocity_delta, Vec3::new(0.1505, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(body.velocity, Vec3::new(0.1505, 0.0, 0.0), epsilon = 1e-12);
        assert!(applied.teleported_to.is_none());
        assert_eq!(body.position, c2c);
    }

    #[test]
    fn test_detection_only_is_noop() {
        let resolver = Resolver::new(&CollisionConfig::detection_only());
        let c2c = Vec3::new(0.5, 0.0, 0.0);
        let mut body = SimpleBody::new(c2c, Vec3::repeat(0.5)).unwrap();
        let before = body.clone();
        let push = resolver.resolve(&unit_obb(), &body.aabb(), c2c);

        assert!(resolver.apply(&mut body, &push, c2c).is_none());
        assert_eq!(body, before);
    }

    #[test]
    fn test_teleport_correction_is_clamped() {
        let config = CollisionConfig::new().with_teleport_correction(0.1).unwrap();
        let resolver = Resolver::new(&config);
        let c2c = Vec3::new(1.0, 0.0, 0.0);
        let mut body = SimpleBody::new(c2c, Vec3::repeat(0.5)).unwrap();
        let push = resolver.resolve(&unit_obb(), &body.aabb(), c2c);

        let applied = resolver.apply(&mut body, &push, c2c).unwrap();
        // c2c * 0.5 = 0.5, clamped to 0.1
        assert_relative_eq!(applied.teleported_to.unwrap(), Vec3::new(1.1, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(body.position, Vec3::new(1.1, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_teleport_within_bound_is_unclamped() {
        let config = CollisionConfig::new().with_teleport_correction(10.0).unwrap();
        let resolver = Resolver::new(&config);
        let c2c = Vec3::new(0.0, 0.0, -0.4);
        let mut body = SimpleBody::new(c2c, Vec3::repeat(0.5)).unwrap();
        let push = resolver.resolve(&unit_obb(), &body.aabb(), c2c);

        let applied = resolver.apply(&mut body, &push, c2c).unwrap();
        assert_relative_eq!(applied.teleported_to.unwrap(), Vec3::new(0.0, 0.0, -0.6), epsilon = 1e-12);
    }
}
