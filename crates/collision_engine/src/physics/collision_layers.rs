//! Collision layers and the broad-phase candidate filter
//!
//! Every collision boundary belongs to a kind, expressed as a layer bit.
//! Bodies on the owner's own kind are never pushed by it, which stops chains
//! of boundaries pushing each other.

use bitflags::bitflags;

use crate::physics::body::{BodyHandle, CollidableBody};

bitflags! {
    /// Collision layer bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player-controlled bodies
        const PLAYER = 1 << 0;
        /// Mobs and other AI-driven bodies
        const MOB = 1 << 1;
        /// Projectiles
        const PROJECTILE = 1 << 2;
        /// Dropped items and pickups
        const ITEM = 1 << 3;
        /// Vehicles and other rideable bodies
        const VEHICLE = 1 << 4;
        /// Default kind for OBB collision boundaries
        const BOUNDARY = 1 << 8;

        // Host-defined kinds from `custom` live in the remaining bits
        const _ = !0;
    }
}

impl CollisionLayers {
    /// First bit available for host-defined boundary kinds
    pub const FIRST_CUSTOM_BIT: u32 = 9;

    /// A host-defined boundary kind (`index` 0..=22 maps to bits 9..=31)
    pub fn custom(index: u32) -> Option<Self> {
        let bit = Self::FIRST_CUSTOM_BIT.checked_add(index)?;
        (bit < u32::BITS).then(|| Self::from_bits_retain(1 << bit))
    }
}

/// Decides which bodies a broad-phase query may return for one owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    /// The owner's own handle, if it is registered in the same broad phase
    pub owner: Option<BodyHandle>,
    /// The owner's boundary kind; bodies sharing any of these bits are excluded
    pub owner_kind: CollisionLayers,
    /// Layers the owner pushes; bodies with no layers always match
    pub mask: CollisionLayers,
}

impl CandidateFilter {
    /// Filter for an owner of the given kind that pushes every other layer
    pub fn new(owner_kind: CollisionLayers) -> Self {
        Self {
            owner: None,
            owner_kind,
            mask: CollisionLayers::all(),
        }
    }

    /// Skip the owner's own entry
    #[must_use]
    pub fn with_owner(mut self, owner: BodyHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Restrict which layers are pushed
    #[must_use]
    pub fn with_mask(mut self, mask: CollisionLayers) -> Self {
        self.mask = mask;
        self
    }

    /// True when `body` must not be returned as a candidate
    pub fn excludes(&self, handle: BodyHandle, body: &dyn CollidableBody) -> bool {
        if self.owner == Some(handle) || !body.is_alive() {
            return true;
        }
        let layers = body.layers();
        if layers.intersects(self.owner_kind) {
            return true;
        }
        // No layers = matches all
        !layers.is_empty() && !layers.intersects(self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::body::SimpleBody;
    use slotmap::SlotMap;

    fn handles() -> (BodyHandle, BodyHandle) {
        let mut map: SlotMap<BodyHandle, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    fn body(layers: CollisionLayers) -> SimpleBody {
        SimpleBody::new(Vec3::zeros(), Vec3::repeat(0.5))
            .unwrap()
            .with_layers(layers)
    }

    #[test]
    fn test_custom_kinds() {
        assert_eq!(CollisionLayers::custom(0).unwrap().bits(), 1 << 9);
        assert_eq!(CollisionLayers::custom(22).unwrap().bits(), 1 << 31);
        assert!(CollisionLayers::custom(23).is_none());
        assert!(CollisionLayers::custom(u32::MAX).is_none());
    }

    #[test]
    fn test_filter_excludes_owner_dead_and_same_kind() {
        let (owner, other) = handles();
        let filter = CandidateFilter::new(CollisionLayers::BOUNDARY).with_owner(owner);

        assert!(filter.excludes(owner, &body(CollisionLayers::empty())));
        assert!(!filter.excludes(other, &body(CollisionLayers::empty())));
        assert!(!filter.excludes(other, &body(CollisionLayers::PLAYER)));
        assert!(filter.excludes(other, &body(CollisionLayers::BOUNDARY)));
        assert!(filter.excludes(other, &body(CollisionLayers::BOUNDARY | CollisionLayers::MOB)));

        let mut dead = body(CollisionLayers::PLAYER);
        dead.alive = false;
        assert!(filter.excludes(other, &dead));
    }

    #[test]
    fn test_default_mask_covers_custom_kinds() {
        let (_, other) = handles();
        let ward = CollisionLayers::custom(0).unwrap();
        let fence = CollisionLayers::custom(1).unwrap();
        assert!(CollisionLayers::all().contains(fence));

        let filter = CandidateFilter::new(ward);
        assert!(!filter.excludes(other, &body(fence)));
        assert!(filter.excludes(other, &body(ward)));

        // A built-in kind pushes custom kinds too
        let filter = CandidateFilter::new(CollisionLayers::BOUNDARY);
        assert!(!filter.excludes(other, &body(fence)));
    }

    #[test]
    fn test_filter_mask() {
        let (_, other) = handles();
        let filter = CandidateFilter::new(CollisionLayers::BOUNDARY).with_mask(CollisionLayers::PLAYER);
        assert!(!filter.excludes(other, &body(CollisionLayers::PLAYER)));
        assert!(filter.excludes(other, &body(CollisionLayers::ITEM)));
        // Bodies without layers are not filtered by the mask
        assert!(!filter.excludes(other, &body(CollisionLayers::empty())));
    }
}
