//! Narrow-phase intersection tests.
//!
//! One SAT core ([`sat_box_box`]) serves both the boolean tests and the
//! resolver, so the hit/no-hit verdict and the translation vector can never
//! disagree for box pairs.

use glam::Vec3;

use crate::math::{self, AXIS_EPSILON};

use super::collider::{BoxFrame, WorldShape};

/// Outcome of a box-box SAT test: the axis of least overlap, oriented from
/// shape A toward shape B, and the overlap depth along it.
#[derive(Debug, Clone, Copy)]
pub struct SatHit {
    pub axis: Vec3,
    pub overlap: f32,
}

/// Closed-interval overlap test on the three world axes.
///
/// Touching faces count as overlapping.
#[inline]
pub fn aabb_overlap(a: &BoxFrame, b: &BoxFrame) -> bool {
    let (amin, amax) = (a.min(), a.max());
    let (bmin, bmax) = (b.min(), b.max());
    amin.x <= bmax.x
        && amax.x >= bmin.x
        && amin.y <= bmax.y
        && amax.y >= bmin.y
        && amin.z <= bmax.z
        && amax.z >= bmin.z
}

/// Project both boxes onto `axis` and measure the interval overlap.
///
/// Returns `None` as soon as the projections separate; any non-positive
/// overlap means the axis separates the shapes.
fn axis_overlap(axis: Vec3, a: &BoxFrame, b: &BoxFrame, t: Vec3) -> Option<f32> {
    let half_a = a.half.to_array();
    let half_b = b.half.to_array();

    let mut proj_a = 0.0f32;
    let mut proj_b = 0.0f32;
    for i in 0..3 {
        proj_a += half_a[i] * a.axes[i].dot(axis).abs();
        proj_b += half_b[i] * b.axes[i].dot(axis).abs();
    }

    let overlap = proj_a + proj_b - t.dot(axis).abs();
    (overlap > 0.0).then_some(overlap)
}

/// General SAT test over the 15 candidate axes: 3 face normals of A, 3 of B,
/// and the 9 edge-edge cross products.
///
/// An axis-aligned box participates as a degenerate oriented box whose axes
/// are the world basis. Cross products of nearly parallel edges are skipped;
/// they carry no separating information.
pub fn sat_box_box(a: &BoxFrame, b: &BoxFrame) -> Option<SatHit> {
    let t = b.center - a.center;

    let mut min_overlap = f32::MAX;
    let mut best_axis = Vec3::ZERO;

    for axis in a.axes.iter().chain(b.axes.iter()) {
        let overlap = axis_overlap(*axis, a, b, t)?;
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = *axis;
        }
    }

    for i in 0..3 {
        for j in 0..3 {
            let cross = a.axes[i].cross(b.axes[j]);
            let len = cross.length();
            if len < AXIS_EPSILON {
                continue;
            }
            let axis = cross / len;
            let overlap = axis_overlap(axis, a, b, t)?;
            if overlap < min_overlap {
                min_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    // Orient the resolution axis from A toward B.
    if best_axis.dot(t) < 0.0 {
        best_axis = -best_axis;
    }

    Some(SatHit {
        axis: best_axis,
        overlap: min_overlap,
    })
}

/// Sphere against a (possibly oriented) box via closest-point projection.
#[inline]
pub fn sphere_box_overlap(center: Vec3, radius: f32, b: &BoxFrame) -> bool {
    let closest = math::closest_point_on_box(center, b.center, b.half, &b.axes);
    (center - closest).length_squared() <= radius * radius
}

#[inline]
fn sphere_sphere_overlap(ca: Vec3, ra: f32, cb: Vec3, rb: f32) -> bool {
    let sum = ra + rb;
    (cb - ca).length_squared() <= sum * sum
}

/// Boolean intersection test, dispatched by shape-kind combination.
pub fn intersects(a: &WorldShape, b: &WorldShape) -> bool {
    match (a, b) {
        (WorldShape::Aabb(fa), WorldShape::Aabb(fb)) => aabb_overlap(fa, fb),
        (
            WorldShape::Aabb(fa) | WorldShape::Obb(fa),
            WorldShape::Aabb(fb) | WorldShape::Obb(fb),
        ) => sat_box_box(fa, fb).is_some(),
        (
            WorldShape::Sphere { center, radius },
            WorldShape::Aabb(frame) | WorldShape::Obb(frame),
        )
        | (
            WorldShape::Aabb(frame) | WorldShape::Obb(frame),
            WorldShape::Sphere { center, radius },
        ) => sphere_box_overlap(*center, *radius, frame),
        (
            WorldShape::Sphere {
                center: ca,
                radius: ra,
            },
            WorldShape::Sphere {
                center: cb,
                radius: rb,
            },
        ) => sphere_sphere_overlap(*ca, *ra, *cb, *rb),
    }
}
