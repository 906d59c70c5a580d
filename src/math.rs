//! Shared math helpers and the epsilon policy for collision tests.

use glam::{EulerRot, Mat3, Vec3};

/// Axes shorter than this contribute no separating information and are skipped.
pub const AXIS_EPSILON: f32 = 1e-6;

/// Below this center-to-center distance two shapes are treated as coincident
/// and resolved along a deterministic default axis.
pub const CENTER_EPSILON: f32 = 1e-4;

/// Compose a yaw/pitch/roll rotation into a basis matrix.
///
/// Yaw is applied about world Y first, then pitch about X, then roll about Z,
/// matching the owner rotation convention of the game objects.
#[inline]
pub fn yaw_pitch_roll(rotation: Vec3) -> Mat3 {
    Mat3::from_euler(EulerRot::YXZ, rotation.x, rotation.y, rotation.z)
}

/// Extract the three basis axes (columns) of a rotation matrix.
#[inline]
pub fn basis_axes(m: &Mat3) -> [Vec3; 3] {
    [m.x_axis, m.y_axis, m.z_axis]
}

/// Closest point to `point` on (or inside) an oriented box given by center,
/// half extents, and basis axes. A point inside the box maps to itself.
pub fn closest_point_on_box(point: Vec3, center: Vec3, half: Vec3, axes: &[Vec3; 3]) -> Vec3 {
    let delta = point - center;
    let half = half.to_array();

    let mut closest = center;
    for i in 0..3 {
        let dist = delta.dot(axes[i]).clamp(-half[i], half[i]);
        closest += axes[i] * dist;
    }
    closest
}
