//! Spatial component describing where a game object sits in the world.

use glam::{Mat3, Vec3};

use crate::math;

/// World-space placement of a game object.
///
/// `rotation` holds yaw/pitch/roll in radians, stored as `(yaw, pitch, roll)`.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Orientation basis composed from yaw, pitch, and roll.
    #[inline]
    pub fn rotation_matrix(&self) -> Mat3 {
        math::yaw_pitch_roll(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
