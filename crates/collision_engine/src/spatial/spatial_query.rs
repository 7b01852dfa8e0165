//! Broad-phase query contract and a linear-scan implementation
//!
//! The collision pass asks the broad phase for bodies whose AABB overlaps an
//! expanded search region, then reads and mutates each candidate through the
//! same broad phase. Candidates come back in a stable order and are processed
//! in that order.

use slotmap::SlotMap;

use crate::physics::body::{BodyHandle, CollidableBody};
use crate::physics::collision::Aabb;
use crate::physics::collision_layers::CandidateFilter;

/// Host-provided spatial lookup used once per owner per tick
pub trait BroadPhase {
    /// Bodies whose AABB overlaps `region` and that `filter` does not exclude
    ///
    /// An empty result is not an error; the pass simply does no work.
    fn query_candidates(&self, region: &Aabb, filter: &CandidateFilter) -> Vec<BodyHandle>;

    /// Read access to a body
    fn body(&self, handle: BodyHandle) -> Option<&dyn CollidableBody>;

    /// Write access to a body
    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn CollidableBody>;
}

/// Linear-scan broad phase over a slot map of boxed bodies
///
/// Every query visits every body, so cost grows with world size. Results are
/// returned in slot order.
#[derive(Default)]
pub struct LinearBroadPhase {
    bodies: SlotMap<BodyHandle, Box<dyn CollidableBody>>,
}

impl LinearBroadPhase {
    /// Create an empty broad phase
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
        }
    }

    /// Register a body and return its handle
    pub fn insert(&mut self, body: impl CollidableBody + 'static) -> BodyHandle {
        self.bodies.insert(Box::new(body))
    }

    /// Remove a body
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Box<dyn CollidableBody>> {
        self.bodies.remove(handle)
    }

    /// Check if a handle is registered
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    /// Number of registered bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when no bodies are registered
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl BroadPhase for LinearBroadPhase {
    fn query_candidates(&self, region: &Aabb, filter: &CandidateFilter) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|&(handle, body)| !filter.excludes(handle, &**body))
            .filter(|(_, body)| region.intersects(&body.aabb()))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn body(&self, handle: BodyHandle) -> Option<&dyn CollidableBody> {
        self.bodies.get(handle).map(|body| &**body as &dyn CollidableBody)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn CollidableBody> {
        self.bodies.get_mut(handle).map(|body| &mut **body as &mut dyn CollidableBody)
    }
}
