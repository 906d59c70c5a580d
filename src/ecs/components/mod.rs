//! Components attached to game-object entities.

pub mod motion;
pub mod transform;
