// core/math.rs
//
// Pure interpolation and angle helpers. No dependencies on the scheduler,
// just math.

use std::f32::consts::TAU;

use glam::{Mat3, Quat, Vec3};

/// Linearly interpolate between two values. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `v` sits between `a` and `b`, clamped to [0, 1].
/// Returns 0 for a degenerate (a == b) range.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((v - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Linear remap from one range to another, clamped to the source range.
/// Simplified interface, rather than solving the lerp/inverse-lerp puzzle
/// every time.
#[inline]
pub fn remap(value: f32, source_min: f32, source_max: f32, dest_min: f32, dest_max: f32) -> f32 {
    lerp(dest_min, dest_max, inverse_lerp(source_min, source_max, value))
}

/// Normalize an angle in radians into [0, TAU).
pub fn positive_angle(angle: f32) -> f32 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Component-wise [`positive_angle`].
pub fn positive_angle_vec3(angles: Vec3) -> Vec3 {
    Vec3::new(
        positive_angle(angles.x),
        positive_angle(angles.y),
        positive_angle(angles.z),
    )
}

/// Rotation that faces `forward` with `up` as the reference up axis.
/// Returns identity when `forward` is (near) zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let r = up.cross(f).normalize_or_zero();
    if r == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let u = f.cross(r);
    Quat::from_mat3(&Mat3::from_cols(r, u, f))
}
