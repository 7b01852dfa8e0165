//! # Collision Configuration
//!
//! The tunables that shape detection and response. They are the only knobs
//! the core exposes; all of them are validated finite and non-negative when
//! constructed or loaded.
//!
//! ## Example (TOML)
//!
//! ```toml
//! push_factor = 0.5
//! broad_phase_margin = 0.1
//! degenerate_axis_threshold = 1e-6
//! separation_epsilon = 0.001
//! max_teleport_correction = 0.25
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::constants::MIN_AXIS_LENGTH_SQUARED;

/// Default push strength
pub const DEFAULT_PUSH_FACTOR: f64 = 0.5;

/// Default expansion of the broad-phase search region beyond the owner's extent
pub const DEFAULT_BROAD_PHASE_MARGIN: f64 = 0.1;

/// Default padding added to every push so it never has zero magnitude
pub const DEFAULT_SEPARATION_EPSILON: f64 = 0.001;

/// How a confirmed collision moves the pushed body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectionMode {
    /// Velocity impulse only; separation happens over the following ticks
    VelocityOnly,
    /// Velocity impulse plus an immediate position correction along the
    /// center-to-center vector, clamped to `max_distance`
    VelocityAndTeleport {
        /// Upper bound on the length of one teleport correction
        max_distance: f64,
    },
}

/// # Collision Configuration
///
/// Owned by each collision boundary and passed by reference into the
/// per-tick pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Scale applied to every push (0 = detection only)
    pub push_factor: f64,
    /// Added to the owner's largest half-extent when expanding the search region
    pub broad_phase_margin: f64,
    /// Squared length below which a SAT candidate axis is skipped
    pub degenerate_axis_threshold: f64,
    /// Added to the chosen overlap so a push is never zero
    pub separation_epsilon: f64,
    /// When set, also teleport pushed bodies, bounded by this distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_teleport_correction: Option<f64>,
}

impl CollisionConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            push_factor: DEFAULT_PUSH_FACTOR,
            broad_phase_margin: DEFAULT_BROAD_PHASE_MARGIN,
            degenerate_axis_threshold: MIN_AXIS_LENGTH_SQUARED,
            separation_epsilon: DEFAULT_SEPARATION_EPSILON,
            max_teleport_correction: None,
        }
    }

    /// Derive the push factor from a configured push distance (`1 / distance`)
    ///
    /// Hosts that expose push strength as an integer "push distance" rule
    /// (default 5) use this to turn it into a factor.
    pub fn from_push_distance(distance: f64) -> Result<Self, ConfigError> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "push_distance",
                reason: format!("must be a positive finite number, got {distance}"),
            });
        }
        Self::new().with_push_factor(1.0 / distance)
    }

    /// Set the push factor
    pub fn with_push_factor(mut self, push_factor: f64) -> Result<Self, ConfigError> {
        self.push_factor = push_factor;
        self.validate()?;
        Ok(self)
    }

    /// Enable bounded teleport corrections
    pub fn with_teleport_correction(mut self, max_distance: f64) -> Result<Self, ConfigError> {
        self.max_teleport_correction = Some(max_distance);
        self.validate()?;
        Ok(self)
    }

    /// Detection-only configuration: collisions are reported but nothing is pushed
    pub fn detection_only() -> Self {
        Self {
            push_factor: 0.0,
            ..Self::new()
        }
    }

    /// True when no push will ever be applied
    pub fn is_detection_only(&self) -> bool {
        self.push_factor == 0.0
    }

    /// The correction strategy implied by this configuration
    pub fn correction_mode(&self) -> CorrectionMode {
        match self.max_teleport_correction {
            Some(max_distance) => CorrectionMode::VelocityAndTeleport { max_distance },
            None => CorrectionMode::VelocityOnly,
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and non-negative, got {value}"),
        });
    }
    Ok(())
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("push_factor", self.push_factor)?;
        check_non_negative("broad_phase_margin", self.broad_phase_margin)?;
        check_non_negative("degenerate_axis_threshold", self.degenerate_axis_threshold)?;
        check_non_negative("separation_epsilon", self.separation_epsilon)?;
        if self.separation_epsilon == 0.0 {
            return Err(ConfigError::Invalid {
                field: "separation_epsilon",
                reason: "must be greater than zero".to_string(),
            });
        }
        if let Some(max_distance) = self.max_teleport_correction {
            check_non_negative("max_teleport_correction", max_distance)?;
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}
