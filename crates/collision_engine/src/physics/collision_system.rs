//! Per-tick collision pass for one collision boundary
//!
//! A collision boundary is a body that owns an oriented box and pushes other
//! bodies out of it. Once per tick it:
//!
//! 1. rebuilds its world-space OBB from the fixed local shape and the owner's
//!    current pose,
//! 2. asks the broad phase for nearby candidates,
//! 3. runs the SAT test against each candidate's AABB (narrow phase),
//! 4. pushes every confirmed candidate through the resolver.
//!
//! Nothing is stored between ticks.

use crate::config::{Config, ConfigError};
use crate::core::config::CollisionConfig;
use crate::events::{CollisionEvent, CollisionObserver};
use crate::foundation::math::{GeometryError, Vec3, VectorExt};
use crate::physics::body::{BodyHandle, CollidableBody};
use crate::physics::collision::{build_world_obb, intersects_with_threshold, Aabb, LocalShape, Obb};
use crate::physics::collision_layers::{CandidateFilter, CollisionLayers};
use crate::physics::resolver::Resolver;
use crate::spatial::spatial_query::BroadPhase;

/// Owner state read at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnerPose {
    /// World position of the owner
    pub position: Vec3,
    /// Yaw in degrees
    pub yaw: f64,
    /// The owner's own bounding box, used to size the search region
    pub aabb: Aabb,
}

impl OwnerPose {
    /// Snapshot the pose of a body
    pub fn of(body: &dyn CollidableBody) -> Self {
        Self {
            position: body.position(),
            yaw: body.yaw(),
            aabb: body.aabb(),
        }
    }
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bodies returned by the broad phase
    pub candidates: usize,
    /// Candidates confirmed by the SAT test
    pub collisions: usize,
    /// Candidates actually pushed
    pub pushes: usize,
}

impl TickReport {
    /// Accumulate another report into this one
    pub fn merge(&mut self, other: TickReport) {
        self.candidates += other.candidates;
        self.collisions += other.collisions;
        self.pushes += other.pushes;
    }
}

/// An OBB-owning body that pushes other bodies out of its box
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionBoundary {
    owner: Option<BodyHandle>,
    kind: CollisionLayers,
    mask: CollisionLayers,
    shape: LocalShape,
    config: CollisionConfig,
    resolver: Resolver,
}

impl CollisionBoundary {
    /// Create a boundary of the given kind
    ///
    /// Bodies whose layers share a bit with `kind` are never pushed by it.
    pub fn new(
        shape: LocalShape,
        kind: CollisionLayers,
        config: CollisionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolver = Resolver::new(&config);
        Ok(Self {
            owner: None,
            kind,
            mask: CollisionLayers::all(),
            shape,
            config,
            resolver,
        })
    }

    /// Attach the boundary to its owner's broad-phase entry (builder pattern)
    ///
    /// The owner is then excluded from its own candidates and
    /// [`CollisionBoundary::tick_owner`] can read its pose.
    #[must_use]
    pub fn with_owner(mut self, owner: BodyHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Only push bodies on these layers (builder pattern)
    #[must_use]
    pub fn with_mask(mut self, mask: CollisionLayers) -> Self {
        self.mask = mask;
        self
    }

    /// Owner handle, if attached
    pub fn owner(&self) -> Option<BodyHandle> {
        self.owner
    }

    /// Boundary kind
    pub fn kind(&self) -> CollisionLayers {
        self.kind
    }

    /// Local shape
    pub fn shape(&self) -> &LocalShape {
        &self.shape
    }

    /// Configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Resolver built from the configuration
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Broad-phase filter for this boundary
    pub fn filter(&self) -> CandidateFilter {
        let filter = CandidateFilter::new(self.kind).with_mask(self.mask);
        match self.owner {
            Some(owner) => filter.with_owner(owner),
            None => filter,
        }
    }

    /// Region handed to the broad phase: the owner's box grown by the
    /// largest local half-extent plus the configured margin
    pub fn search_region(&self, owner_aabb: &Aabb) -> Aabb {
        owner_aabb.expanded(self.shape.max_half_extent() + self.config.broad_phase_margin)
    }

    /// World-space OBB for the given pose
    pub fn world_obb(&self, pose: &OwnerPose) -> Result<Obb, GeometryError> {
        build_world_obb(&self.shape, pose.position, pose.yaw)
    }

    /// Run one collision pass with an explicitly supplied owner pose
    ///
    /// Fails only when the pose is not finite. Candidates that vanish from
    /// the broad phase mid-tick or whose position is not finite are skipped.
    pub fn tick(
        &self,
        pose: &OwnerPose,
        broad_phase: &mut dyn BroadPhase,
        observer: &mut dyn CollisionObserver,
    ) -> Result<TickReport, GeometryError> {
        let obb = self.world_obb(pose)?;
        let region = self.search_region(&pose.aabb);
        let candidates = broad_phase.query_candidates(&region, &self.filter());

        let mut report = TickReport {
            candidates: candidates.len(),
            ..TickReport::default()
        };

        for handle in candidates {
            let Some(body) = broad_phase.body_mut(handle) else {
                log::warn!("Candidate {handle:?} is no longer registered; skipping");
                continue;
            };

            let aabb = body.aabb();
            if !intersects_with_threshold(&obb, &aabb, self.config.degenerate_axis_threshold) {
                continue;
            }

            let center_to_center = body.position() - pose.position;
            if !center_to_center.all_finite() {
                log::warn!("Candidate {handle:?} has a non-finite position; skipping");
                continue;
            }

            report.collisions += 1;
            log::debug!("Boundary {:?} hit {handle:?}", self.owner);
            observer.on_event(&CollisionEvent::CollisionDetected {
                candidate: handle,
                center_to_center,
            });

            let push = self.resolver.resolve(&obb, &aabb, center_to_center);
            if let Some(applied) = self.resolver.apply(body, &push, center_to_center) {
                report.pushes += 1;
                observer.on_event(&CollisionEvent::PushApplied {
                    candidate: handle,
                    push,
                    applied,
                });
            }
        }

        log::trace!(
            "Tick: {} candidates, {} collisions, {} pushes",
            report.candidates,
            report.collisions,
            report.pushes
        );
        Ok(report)
    }

    /// Run one collision pass, reading the pose from the registered owner
    ///
    /// Returns `Ok(None)` when the boundary has no owner, or the owner is
    /// missing from the broad phase or dead.
    pub fn tick_owner(
        &self,
        broad_phase: &mut dyn BroadPhase,
        observer: &mut dyn CollisionObserver,
    ) -> Result<Option<TickReport>, GeometryError> {
        let Some(owner) = self.owner else {
            return Ok(None);
        };
        let pose = match broad_phase.body(owner) {
            Some(body) if body.is_alive() => OwnerPose::of(body),
            _ => return Ok(None),
        };
        self.tick(&pose, broad_phase, observer).map(Some)
    }
}
