//! Minimum-translation-vector computation for every shape combination.
//!
//! Each routine returns the push that moves shape A out of shape B; the
//! opposite shape receives the exact negation. `None` after a positive
//! narrow-phase verdict means the pair is numerically marginal and is skipped
//! for the frame.

use glam::Vec3;

use crate::math::{self, CENTER_EPSILON};

use super::collider::{BoxFrame, WorldShape};
use super::narrowphase;

const WORLD_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// Compute the push for shape A, dispatched by shape-kind combination.
///
/// `push_clamp` caps the correction magnitude for box-box pairs, where
/// degenerate geometry can otherwise produce explosive corrections.
pub fn resolve(a: &WorldShape, b: &WorldShape, push_clamp: f32) -> Option<Vec3> {
    match (a, b) {
        (WorldShape::Aabb(fa), WorldShape::Aabb(fb)) => resolve_aabb_aabb(fa, fb),
        (
            WorldShape::Aabb(fa) | WorldShape::Obb(fa),
            WorldShape::Aabb(fb) | WorldShape::Obb(fb),
        ) => resolve_box_box(fa, fb, push_clamp),
        (
            WorldShape::Sphere { center, radius },
            WorldShape::Aabb(frame) | WorldShape::Obb(frame),
        ) => resolve_sphere_box(*center, *radius, frame),
        (
            WorldShape::Aabb(frame) | WorldShape::Obb(frame),
            WorldShape::Sphere { center, radius },
        ) => resolve_sphere_box(*center, *radius, frame).map(|push| -push),
        (
            WorldShape::Sphere {
                center: ca,
                radius: ra,
            },
            WorldShape::Sphere {
                center: cb,
                radius: rb,
            },
        ) => resolve_sphere_sphere(*ca, *ra, *cb, *rb),
    }
}

/// Axis-aligned pair: pick the world axis with the smallest overlap and push
/// A away from B along it.
///
/// Coincident centers fall back to a deterministic world-up push.
pub fn resolve_aabb_aabb(a: &BoxFrame, b: &BoxFrame) -> Option<Vec3> {
    let (amin, amax) = (a.min().to_array(), a.max().to_array());
    let (bmin, bmax) = (b.min().to_array(), b.max().to_array());

    let mut overlaps = [0.0f32; 3];
    for i in 0..3 {
        let overlap = amax[i].min(bmax[i]) - amin[i].max(bmin[i]);
        if overlap < 0.0 {
            return None;
        }
        overlaps[i] = overlap;
    }

    let delta = b.center - a.center;
    if delta.length_squared() < CENTER_EPSILON * CENTER_EPSILON {
        return Some(Vec3::Y * overlaps[1]);
    }

    let mut axis = 0;
    for i in 1..3 {
        if overlaps[i] < overlaps[axis] {
            axis = i;
        }
    }

    let direction = if delta.to_array()[axis] >= 0.0 { -1.0 } else { 1.0 };
    Some(WORLD_AXES[axis] * overlaps[axis] * direction)
}

/// General box pair: SAT minimum-overlap axis, oriented away from B, with the
/// magnitude clamped.
pub fn resolve_box_box(a: &BoxFrame, b: &BoxFrame, push_clamp: f32) -> Option<Vec3> {
    let hit = narrowphase::sat_box_box(a, b)?;
    Some(-hit.axis * hit.overlap.min(push_clamp))
}

/// Sphere against a box: closest-point push when the center is outside,
/// nearest-face ejection when the center is inside the box.
///
/// The inside case pushes by `face distance + radius`, leaving the sphere
/// fully outside rather than resting on the surface it penetrated.
pub fn resolve_sphere_box(center: Vec3, radius: f32, b: &BoxFrame) -> Option<Vec3> {
    let closest = math::closest_point_on_box(center, b.center, b.half, &b.axes);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return None;
    }

    if dist_sq > CENTER_EPSILON * CENTER_EPSILON {
        let dist = dist_sq.sqrt();
        return Some(delta / dist * (radius - dist));
    }

    // Center inside the box: eject through the nearest face.
    let local = center - b.center;
    let half = b.half.to_array();
    let mut face = 0;
    let mut face_dist = f32::MAX;
    let mut face_sign = 1.0;
    for i in 0..3 {
        let along = local.dot(b.axes[i]);
        let dist = half[i] - along.abs();
        if dist < face_dist {
            face_dist = dist;
            face = i;
            face_sign = if along >= 0.0 { 1.0 } else { -1.0 };
        }
    }

    Some(b.axes[face] * face_sign * (face_dist + radius))
}

/// Sphere pair: push along the center line by the penetration depth.
pub fn resolve_sphere_sphere(ca: Vec3, ra: f32, cb: Vec3, rb: f32) -> Option<Vec3> {
    let sum = ra + rb;
    let delta = cb - ca;
    let dist_sq = delta.length_squared();
    if dist_sq > sum * sum {
        return None;
    }

    if dist_sq < CENTER_EPSILON * CENTER_EPSILON {
        return Some(Vec3::Y * sum);
    }

    let dist = dist_sq.sqrt();
    Some(-delta / dist * (sum - dist))
}
