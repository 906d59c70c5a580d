//! Transient pair and event types produced by the collision pass.

use super::collider::WorldShape;

/// A pair that tested positive in the narrow phase.
///
/// Holds a snapshot of both world shapes so resolution stays consistent even
/// if the registry mutates between the passes. Pairs live for a single frame
/// and are never cached across frames.
#[derive(Debug, Clone, Copy)]
pub struct CollisionPair {
    pub a: hecs::Entity,
    pub b: hecs::Entity,
    pub shape_a: WorldShape,
    pub shape_b: WorldShape,
}

/// Collision notification for one side of a resolved pair.
///
/// Two events are emitted per pair, one per participant, carrying only the
/// opposing entity. Drained by the game loop after the collision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub entity: hecs::Entity,
    pub other: hecs::Entity,
}
