//! Broad-phase candidate queries
//!
//! The core does not partition space itself. Hosts plug their own spatial
//! index in through [`BroadPhase`]; [`LinearBroadPhase`] is a plain scan that
//! is adequate for small worlds, tests and the demo.

pub mod spatial_query;

pub use spatial_query::{BroadPhase, LinearBroadPhase};
