//! Collider component and world-space shape derivation.

use glam::Vec3;

use crate::ecs::components::transform::Transform;
use crate::math;

/// Collider shape, configured in local units.
///
/// Box variants take full extents; the world-space half extents are derived
/// when the shape is placed. The set is closed: every pair combination is
/// matched exhaustively in the narrow phase and the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box. Orientation is always the world basis, regardless of
    /// the owner's rotation.
    Aabb { extents: Vec3 },
    /// Oriented box following the owner's yaw/pitch/roll.
    Obb { extents: Vec3 },
    Sphere { radius: f32 },
}

/// Collision component attached to a game object.
#[derive(Debug, Clone)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Local offset from the owner's origin, scaled by the owner's scale.
    pub offset: Vec3,
    /// Disabled colliders are skipped by the broad phase. Disabling through
    /// [`CollisionWorld::set_enabled`](crate::CollisionWorld::set_enabled)
    /// also deregisters the collider.
    pub enabled: bool,
    /// Static colliders have infinite effective mass and are never displaced.
    pub is_static: bool,
    pub(crate) hit: bool,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
            enabled: true,
            is_static: false,
            hit: false,
        }
    }

    /// Create a static collider (never displaced by resolution).
    pub fn new_static(shape: ColliderShape) -> Self {
        Self {
            is_static: true,
            ..Self::new(shape)
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Whether this collider was part of a resolved pair this frame.
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Place the shape in world space using the owner's transform.
    pub fn world_shape(&self, transform: &Transform) -> WorldShape {
        let center = transform.position + self.offset * transform.scale;
        match self.shape {
            ColliderShape::Aabb { extents } => {
                WorldShape::Aabb(BoxFrame::axis_aligned(center, extents * 0.5))
            }
            ColliderShape::Obb { extents } => WorldShape::Obb(BoxFrame {
                center,
                half: extents * 0.5,
                axes: math::basis_axes(&transform.rotation_matrix()),
            }),
            ColliderShape::Sphere { radius } => WorldShape::Sphere { center, radius },
        }
    }
}

/// A box placed in world space: center, half extents, and basis axes.
#[derive(Debug, Clone, Copy)]
pub struct BoxFrame {
    pub center: Vec3,
    pub half: Vec3,
    pub axes: [Vec3; 3],
}

impl BoxFrame {
    pub fn axis_aligned(center: Vec3, half: Vec3) -> Self {
        Self {
            center,
            half,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
        }
    }

    /// Lower corner. Only meaningful for axis-aligned frames.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half
    }

    /// Upper corner. Only meaningful for axis-aligned frames.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half
    }
}

/// A collider shape resolved into world space for one frame.
#[derive(Debug, Clone, Copy)]
pub enum WorldShape {
    Aabb(BoxFrame),
    Obb(BoxFrame),
    Sphere { center: Vec3, radius: f32 },
}

impl WorldShape {
    pub fn center(&self) -> Vec3 {
        match self {
            WorldShape::Aabb(frame) | WorldShape::Obb(frame) => frame.center,
            WorldShape::Sphere { center, .. } => *center,
        }
    }
}
