//! Collision events and observers
//!
//! The per-tick pass reports what it did through a [`CollisionObserver`]
//! instead of printing. Observers can log, count or record; an
//! [`ObserverRegistry`] forwards each event only to observers registered for
//! its type.

use std::collections::HashMap;

use crate::foundation::math::Vec3;
use crate::physics::body::BodyHandle;
use crate::physics::resolver::{AppliedPush, PushVector};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// SAT confirmed an overlap with a candidate
    CollisionDetected,
    /// A push was applied to a candidate
    PushApplied,
}

/// Something the collision pass did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// The boundary's OBB overlaps the candidate's AABB
    CollisionDetected {
        /// Body that was hit
        candidate: BodyHandle,
        /// Candidate position minus owner position
        center_to_center: Vec3,
    },
    /// The candidate was pushed
    PushApplied {
        /// Body that was pushed
        candidate: BodyHandle,
        /// Unscaled push
        push: PushVector,
        /// Velocity and position changes actually made
        applied: AppliedPush,
    },
}

impl CollisionEvent {
    /// Type of this event
    pub fn event_type(&self) -> EventType {
        match self {
            Self::CollisionDetected { .. } => EventType::CollisionDetected,
            Self::PushApplied { .. } => EventType::PushApplied,
        }
    }

    /// The body the event is about
    pub fn candidate(&self) -> BodyHandle {
        match self {
            Self::CollisionDetected { candidate, .. } | Self::PushApplied { candidate, .. } => {
                *candidate
            }
        }
    }
}

/// Receives collision events as they happen
pub trait CollisionObserver {
    /// Handle one event
    fn on_event(&mut self, event: &CollisionEvent);
}

/// Ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CollisionObserver for NoopObserver {
    fn on_event(&mut self, _event: &CollisionEvent) {}
}

/// Writes every event to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CollisionObserver for LogObserver {
    fn on_event(&mut self, event: &CollisionEvent) {
        match event {
            CollisionEvent::CollisionDetected {
                candidate,
                center_to_center,
            } => {
                log::debug!(
                    "Collision with {candidate:?}, center offset ({:.3}, {:.3}, {:.3})",
                    center_to_center.x,
                    center_to_center.y,
                    center_to_center.z
                );
            }
            CollisionEvent::PushApplied {
                candidate,
                push,
                applied,
            } => {
                log::debug!(
                    "Pushed {candidate:?} along {:?} (overlap {:.3}), velocity += ({:.4}, {:.4}, {:.4})",
                    push.axis,
                    push.overlap,
                    applied.velocity_delta.x,
                    applied.velocity_delta.y,
                    applied.velocity_delta.z
                );
                if let Some(target) = applied.teleported_to {
                    log::debug!("Teleported {candidate:?} to ({:.3}, {:.3}, {:.3})", target.x, target.y, target.z);
                }
            }
        }
    }
}

/// Running totals of events seen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionCounters {
    /// Number of `CollisionDetected` events
    pub detected: u64,
    /// Number of `PushApplied` events
    pub pushes: u64,
}

impl CollisionCounters {
    /// Zero both counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CollisionObserver for CollisionCounters {
    fn on_event(&mut self, event: &CollisionEvent) {
        match event.event_type() {
            EventType::CollisionDetected => self.detected += 1,
            EventType::PushApplied => self.pushes += 1,
        }
    }
}

/// Keeps a copy of every event, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<CollisionEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }
}

impl CollisionObserver for RecordingObserver {
    fn on_event(&mut self, event: &CollisionEvent) {
        self.events.push(*event);
    }
}

/// Forwards events to observers registered for their type
#[derive(Default)]
pub struct ObserverRegistry {
    observers: HashMap<EventType, Vec<Box<dyn CollisionObserver>>>,
}

impl ObserverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for one event type
    pub fn register(&mut self, event_type: EventType, observer: Box<dyn CollisionObserver>) {
        self.observers.entry(event_type).or_default().push(observer);
    }

    /// Number of observers registered for `event_type`
    pub fn observer_count(&self, event_type: EventType) -> usize {
        self.observers.get(&event_type).map_or(0, Vec::len)
    }
}

impl CollisionObserver for ObserverRegistry {
    fn on_event(&mut self, event: &CollisionEvent) {
        if let Some(observers) = self.observers.get_mut(&event.event_type()) {
            for observer in observers.iter_mut() {
                observer.on_event(event);
            }
        }
    }
}
