//! # Core Module
//!
//! Shared configuration for the collision subsystem.
//!
//! ## Organization
//!
//! - **Config**: Validated tunables for detection and response

pub mod config;

pub use config::{CollisionConfig, CorrectionMode};
pub use crate::config::{Config, ConfigError, ConfigFormat};
