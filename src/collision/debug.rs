//! Diagnostic visualization of registered colliders.

use glam::Vec3;

use crate::ecs::components::transform::Transform;

use super::collider::{Collider, WorldShape};
use super::CollisionWorld;

/// RGBA color handed to the renderer.
pub type Color = [f32; 4];

/// Colliders that were part of a resolved pair this frame.
pub const HIT_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
/// Idle colliders.
pub const IDLE_COLOR: Color = [0.0, 1.0, 0.0, 1.0];

/// Renderer capability consumed by [`CollisionWorld::debug_draw`].
///
/// The single primitive is an oriented box; spheres are drawn as their
/// bounding cube.
pub trait DebugDraw {
    fn draw_box(&mut self, center: Vec3, half: Vec3, axes: [Vec3; 3], color: Color);
}

impl CollisionWorld {
    /// Draw every registered collider, color-coded by this frame's hit state.
    ///
    /// Purely diagnostic; skips entries that cannot be placed in the world.
    pub fn debug_draw(&self, world: &hecs::World, draw: &mut dyn DebugDraw) {
        for &entity in self.registry().entries() {
            let Ok(collider) = world.get::<&Collider>(entity) else {
                continue;
            };
            let Ok(transform) = world.get::<&Transform>(entity) else {
                continue;
            };
            let color = if collider.hit() { HIT_COLOR } else { IDLE_COLOR };
            match collider.world_shape(&transform) {
                WorldShape::Aabb(frame) | WorldShape::Obb(frame) => {
                    draw.draw_box(frame.center, frame.half, frame.axes, color);
                }
                WorldShape::Sphere { center, radius } => {
                    draw.draw_box(
                        center,
                        Vec3::splat(radius),
                        [Vec3::X, Vec3::Y, Vec3::Z],
                        color,
                    );
                }
            }
        }
    }
}
