//! Math utilities and types
//!
//! Provides the vector type used by every collision component, plus the
//! guarded operations the hot path relies on (normalization is only ever
//! performed on vectors that pass the degeneracy check).

use thiserror::Error;

pub use nalgebra::{UnitQuaternion, Vector3};

/// 3D vector type (world units, double precision)
pub type Vec3 = Vector3<f64>;

/// Yaw rotation type
pub type Quat = UnitQuaternion<f64>;

/// Math constants
pub mod constants {
    /// Squared length below which a vector is treated as degenerate
    pub const MIN_AXIS_LENGTH_SQUARED: f64 = 1e-6;

    /// Tolerance on |a · b| when checking that two unit axes are orthogonal
    pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-3;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
}

/// The three world axes, which are also the implicit axes of every AABB
pub const WORLD_AXES: [Vec3; 3] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Geometry construction errors
///
/// These are raised at construction boundaries only. Numeric edge cases inside
/// the per-tick path (degenerate SAT axes, zero overlap) are handled locally.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A half-extent was negative
    #[error("half-extent {index} is negative: {value}")]
    NegativeHalfExtent {
        /// Axis index (0, 1 or 2)
        index: usize,
        /// Offending value
        value: f64,
    },

    /// A coordinate was NaN or infinite
    #[error("non-finite {0}")]
    NonFinite(&'static str),

    /// AABB min exceeds max on some axis
    #[error("inverted bounds on axis {axis}: min {min} > max {max}")]
    InvertedBounds {
        /// Axis index (0, 1 or 2)
        axis: usize,
        /// Minimum coordinate
        min: f64,
        /// Maximum coordinate
        max: f64,
    },

    /// A vector was too short to normalize
    #[error("vector too short to normalize (length squared {0})")]
    DegenerateVector(f64),

    /// Two box axes were not perpendicular
    #[error("axes {0} and {1} are not orthogonal")]
    NonOrthogonalAxes(usize, usize),
}

/// Extension trait for `Vec3` with the guarded operations used by collision code
pub trait VectorExt: Sized {
    /// True when the squared length is below [`constants::MIN_AXIS_LENGTH_SQUARED`]
    fn is_degenerate(&self) -> bool;

    /// Normalize, failing instead of dividing by a near-zero length
    fn normalize_checked(&self) -> Result<Self, GeometryError>;

    /// True when every component is finite
    fn all_finite(&self) -> bool;

    /// Rotate about the world +Y axis by `degrees`
    fn rotate_yaw(&self, degrees: f64) -> Self;
}

impl VectorExt for Vec3 {
    fn is_degenerate(&self) -> bool {
        self.norm_squared() < constants::MIN_AXIS_LENGTH_SQUARED
    }

    fn normalize_checked(&self) -> Result<Self, GeometryError> {
        let length_squared = self.norm_squared();
        if length_squared < constants::MIN_AXIS_LENGTH_SQUARED {
            return Err(GeometryError::DegenerateVector(length_squared));
        }
        Ok(self / length_squared.sqrt())
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|component| component.is_finite())
    }

    fn rotate_yaw(&self, degrees: f64) -> Self {
        utils::yaw_rotation(degrees) * self
    }
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Rotation about the world +Y axis
    pub fn yaw_rotation(degrees: f64) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(degrees))
    }

    /// Largest component
    pub fn max_component(v: &Vec3) -> f64 {
        v.x.max(v.y).max(v.z)
    }
}
