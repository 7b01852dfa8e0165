//! Collidable body capability
//!
//! The core never sees a host's entity types. Everything it needs from a body
//! is this trait: read its box and pose, push it, or move it.

use crate::foundation::math::{GeometryError, Vec3, VectorExt};
use crate::physics::collision::Aabb;
use crate::physics::collision_layers::CollisionLayers;

slotmap::new_key_type! {
    /// Handle to a body registered with a broad phase
    pub struct BodyHandle;
}

/// What a host body must expose to take part in collision response
pub trait CollidableBody {
    /// Current world-space bounding box
    fn aabb(&self) -> Aabb;

    /// Current world position
    fn position(&self) -> Vec3;

    /// Rotation about the vertical axis, in degrees
    fn yaw(&self) -> f64;

    /// Add to the body's velocity
    fn add_velocity(&mut self, delta: Vec3);

    /// Move the body directly
    ///
    /// Hosts supply whatever is right for the body kind (e.g. a network-synced
    /// move for player-controlled bodies); the core calls it uniformly.
    fn teleport_to(&mut self, position: Vec3);

    /// Dead bodies are never collision candidates
    fn is_alive(&self) -> bool {
        true
    }

    /// Layers this body belongs to
    fn layers(&self) -> CollisionLayers {
        CollisionLayers::empty()
    }
}

/// Minimal box-shaped body with explicit velocity integration
///
/// Used by the demo and tests; real hosts implement [`CollidableBody`] on
/// their own entity types. `position` is the box center.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBody {
    /// Box center
    pub position: Vec3,
    /// Current velocity (world units per tick)
    pub velocity: Vec3,
    /// Yaw in degrees
    pub yaw: f64,
    /// Half-size of the body's box
    pub half_extents: Vec3,
    /// Whether the body is alive
    pub alive: bool,
    /// Collision layers
    pub layers: CollisionLayers,
    /// Fraction of velocity kept after each [`SimpleBody::step`]
    pub damping: f64,
}

impl SimpleBody {
    /// A resting body at `position`
    pub fn new(position: Vec3, half_extents: Vec3) -> Result<Self, GeometryError> {
        // Validate once up front so `aabb()` cannot fail later
        Aabb::from_center_half_extents(position, half_extents)?;
        Ok(Self {
            position,
            velocity: Vec3::zeros(),
            yaw: 0.0,
            half_extents,
            alive: true,
            layers: CollisionLayers::empty(),
            damping: 0.0,
        })
    }

    /// Set layers (builder pattern)
    #[must_use]
    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Set yaw (builder pattern)
    #[must_use]
    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Set damping (builder pattern)
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Advance one tick: move by the current velocity, then apply damping
    pub fn step(&mut self) {
        self.position += self.velocity;
        self.velocity *= self.damping;
    }
}

impl CollidableBody for SimpleBody {
    fn aabb(&self) -> Aabb {
        // Fields are public, so fall back to a point box if they were made invalid
        Aabb::from_center_half_extents(self.position, self.half_extents).unwrap_or_else(|err| {
            log::warn!("SimpleBody has an invalid box ({err}); using a point box");
            let center = if self.position.all_finite() {
                self.position
            } else {
                Vec3::zeros()
            };
            Aabb::point(center)
        })
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f64 {
        self.yaw
    }

    fn add_velocity(&mut self, delta: Vec3) {
        self.velocity += delta;
    }

    fn teleport_to(&mut self, position: Vec3) {
        self.position = position;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn layers(&self) -> CollisionLayers {
        self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_body_box_follows_position() {
        let mut body = SimpleBody::new(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(0.5)).unwrap();
        body.teleport_to(Vec3::new(2.0, 0.0, 0.0));
        let aabb = body.aabb();
        assert_relative_eq!(aabb.min(), Vec3::new(1.5, -0.5, -0.5));
        assert_relative_eq!(aabb.max(), Vec3::new(2.5, 0.5, 0.5));
    }

    #[test]
    fn test_step_integrates_and_damps() {
        let mut body = SimpleBody::new(Vec3::zeros(), Vec3::repeat(0.5))
            .unwrap()
            .with_damping(0.5);
        body.add_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.step();
        assert_relative_eq!(body.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(body.velocity, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_invalid_construction_rejected() {
        assert!(SimpleBody::new(Vec3::zeros(), Vec3::new(-1.0, 1.0, 1.0)).is_err());
        assert!(SimpleBody::new(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::repeat(1.0)).is_err());
    }

    #[test]
    fn test_corrupted_fields_fall_back_to_point_box() {
        let mut body = SimpleBody::new(Vec3::zeros(), Vec3::repeat(0.5)).unwrap();
        body.half_extents = Vec3::new(-1.0, 0.0, 0.0);
        let aabb = body.aabb();
        assert_eq!(aabb.min(), aabb.max());
    }
}
