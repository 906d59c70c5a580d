//! Motion capabilities consumed by collision resolution.
//!
//! A game object opts into resolution by carrying these components:
//! [`Movable`] lets the resolver cancel inward velocity, [`Pushable`] lets it
//! distribute positional corrections by mass. Objects missing either degrade
//! gracefully (the correction lands on the other side of the pair).

use glam::Vec3;

/// Linear velocity of a game object.
#[derive(Debug, Clone, Copy, Default)]
pub struct Movable {
    pub velocity: Vec3,
}

impl Movable {
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

/// Mass plus the per-frame push accumulator.
///
/// Simultaneous collisions accumulate additively; the total is applied to the
/// owner's position exactly once per frame, then cleared. This keeps the
/// correction independent of pair ordering within a frame.
#[derive(Debug, Clone, Copy)]
pub struct Pushable {
    pub mass: f32,
    push: Vec3,
    dirty: bool,
}

impl Pushable {
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            push: Vec3::ZERO,
            dirty: false,
        }
    }

    /// Accumulate a positional correction for this frame.
    pub fn add_push(&mut self, push: Vec3) {
        self.push += push;
        self.dirty = true;
    }

    /// Pending correction accumulated so far this frame.
    pub fn pending_push(&self) -> Vec3 {
        self.push
    }

    /// Take the accumulated correction, clearing the accumulator.
    ///
    /// Returns `None` if nothing was accumulated since the last take.
    pub fn take_push(&mut self) -> Option<Vec3> {
        if !self.dirty {
            return None;
        }
        let push = self.push;
        self.push = Vec3::ZERO;
        self.dirty = false;
        Some(push)
    }
}
