//! Box primitives for collision detection
//!
//! Provides the axis-aligned and oriented boxes the SAT test works on. Both
//! validate their invariants on construction and are immutable afterwards.

use crate::foundation::math::{
    constants::ORTHOGONALITY_TOLERANCE, GeometryError, Vec3, VectorExt, WORLD_AXES,
};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    ///
    /// Fails on non-finite coordinates or when `min > max` on any axis.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, GeometryError> {
        if !min.all_finite() {
            return Err(GeometryError::NonFinite("aabb min"));
        }
        if !max.all_finite() {
            return Err(GeometryError::NonFinite("aabb max"));
        }
        for axis in 0..3 {
            if min[axis] > max[axis] {
                return Err(GeometryError::InvertedBounds {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Result<Self, GeometryError> {
        if let Some(index) = (0..3).find(|&i| half_extents[i] < 0.0) {
            return Err(GeometryError::NegativeHalfExtent {
                index,
                value: half_extents[index],
            });
        }
        Self::new(center - half_extents, center + half_extents)
    }

    /// Zero-size box at `point`; the caller guarantees `point` is finite
    pub(crate) fn point(point: Vec3) -> Self {
        debug_assert!(point.all_finite());
        Self { min: point, max: point }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents of the AABB
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow the box by `amount` on every side
    ///
    /// Negative amounts are clamped to zero so the result stays valid.
    #[must_use]
    pub fn expanded(&self, amount: f64) -> Self {
        let grow = Vec3::repeat(amount.max(0.0));
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }

    /// Check if this AABB overlaps another (touching counts as overlap)
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

/// Oriented Bounding Box
///
/// Axes are stored normalized and checked for mutual orthogonality;
/// half-extents are non-negative. There are no setters: a moving body gets a
/// fresh box every tick from [`super::shape::LocalShape::to_world_space`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    center: Vec3,
    axes: [Vec3; 3],
    half_extents: Vec3,
}

impl Obb {
    /// Creates a new OBB, re-normalizing the supplied axes
    pub fn new(center: Vec3, axes: [Vec3; 3], half_extents: Vec3) -> Result<Self, GeometryError> {
        if !center.all_finite() {
            return Err(GeometryError::NonFinite("obb center"));
        }
        if !half_extents.all_finite() {
            return Err(GeometryError::NonFinite("obb half-extents"));
        }
        if let Some(index) = (0..3).find(|&i| half_extents[i] < 0.0) {
            return Err(GeometryError::NegativeHalfExtent {
                index,
                value: half_extents[index],
            });
        }
        if axes.iter().any(|axis| !axis.all_finite()) {
            return Err(GeometryError::NonFinite("obb axis"));
        }

        let axes = [
            axes[0].normalize_checked()?,
            axes[1].normalize_checked()?,
            axes[2].normalize_checked()?,
        ];
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            if axes[i].dot(&axes[j]).abs() > ORTHOGONALITY_TOLERANCE {
                return Err(GeometryError::NonOrthogonalAxes(i, j));
            }
        }

        Ok(Self {
            center,
            axes,
            half_extents,
        })
    }

    /// Creates an OBB whose axes are the world axes
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Result<Self, GeometryError> {
        Self::new(center, WORLD_AXES, half_extents)
    }

    /// Unit cube (half-extent 0.5) at the origin, aligned with the world axes
    pub fn unit() -> Self {
        Self {
            center: Vec3::zeros(),
            axes: WORLD_AXES,
            half_extents: Vec3::repeat(0.5),
        }
    }

    /// Same box moved to `center`
    ///
    /// `center` must be finite; callers pass values they already validated.
    pub(crate) fn recentered(&self, center: Vec3) -> Self {
        debug_assert!(center.all_finite());
        Self { center, ..*self }
    }

    /// Creates an OBB covering exactly the given AABB
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            axes: WORLD_AXES,
            half_extents: aabb.half_extents(),
        }
    }

    /// Center in world space
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// The three unit axes
    pub fn axes(&self) -> &[Vec3; 3] {
        &self.axes
    }

    /// Half-extent along each of the box's own axes
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Projected radius onto `axis`: Σ |h_k (a_k · L)|
    pub fn projected_radius(&self, axis: &Vec3) -> f64 {
        self.axes
            .iter()
            .zip(self.half_extents.iter())
            .map(|(box_axis, half)| (half * box_axis.dot(axis)).abs())
            .sum()
    }
}

/// Projected radius of an AABB onto `axis`: Σ |e_k L_k|
pub fn aabb_projected_radius(aabb: &Aabb, axis: &Vec3) -> f64 {
    aabb.half_extents().zip_map(axis, |half, l| (half * l).abs()).sum()
}
