// tween/interp.rs
//
// Curve-mapped interpolation, one function per value kind. Geometric
// quantities interpolate unclamped so overshoot curves can swing past the
// destination; colors clamp because their channels are bounded.
//
// The mirror_* variants remap progress through [-1, 2] -> [2, -1] before
// evaluation and remap the curve output back through the same inverted
// range. That reflects the curve through its center: an ease-in becomes
// the matching ease-out. A task that flips its mirror flag each bounce
// plays symmetric out-and-back motion from a single one-directional curve.

use glam::{Quat, Vec3};

use crate::api::types::Rgba;
use crate::core::curve::Curve;
use crate::core::math::remap;

/// Interpolate with a curve-shaped factor. Unclamped.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, curve: &Curve) -> f32 {
    a + (b - a) * curve.evaluate(t)
}

/// Interpolate a Vec3 with a curve-shaped factor. Unclamped.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, curve: &Curve) -> Vec3 {
    a + (b - a) * curve.evaluate(t)
}

/// Interpolate a rotation with a curve-shaped factor.
#[inline]
pub fn ease_quat(a: Quat, b: Quat, t: f32, curve: &Curve) -> Quat {
    nlerp(a, b, curve.evaluate(t))
}

/// Interpolate a color with a curve-shaped factor, clamped to [0, 1].
#[inline]
pub fn ease_rgba(a: Rgba, b: Rgba, t: f32, curve: &Curve) -> Rgba {
    a.lerp(b, curve.evaluate(t))
}

/// Mirrored [`ease`].
#[inline]
pub fn mirror_ease(a: f32, b: f32, t: f32, curve: &Curve) -> f32 {
    a + (b - a) * mirror_factor(t, curve)
}

/// Mirrored [`ease_vec3`].
#[inline]
pub fn mirror_ease_vec3(a: Vec3, b: Vec3, t: f32, curve: &Curve) -> Vec3 {
    a + (b - a) * mirror_factor(t, curve)
}

/// Mirrored [`ease_quat`].
#[inline]
pub fn mirror_ease_quat(a: Quat, b: Quat, t: f32, curve: &Curve) -> Quat {
    nlerp(a, b, mirror_factor(t, curve))
}

/// Mirrored [`ease_rgba`]. Unclamped, matching the other mirror variants.
#[inline]
pub fn mirror_ease_rgba(a: Rgba, b: Rgba, t: f32, curve: &Curve) -> Rgba {
    a.lerp_unclamped(b, mirror_factor(t, curve))
}

#[inline]
fn mirror_factor(t: f32, curve: &Curve) -> f32 {
    let t = remap(t, -1.0, 2.0, 2.0, -1.0);
    remap(curve.evaluate(t), -1.0, 2.0, 2.0, -1.0)
}

/// Normalized lerp between rotations with shortest-path bias. The factor
/// is not clamped, so overshoot curves swing past the end orientation.
#[inline]
fn nlerp(a: Quat, b: Quat, s: f32) -> Quat {
    let b = if a.dot(b) < 0.0 { -b } else { b };
    (a * (1.0 - s) + b * s).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn ease_hits_endpoints() {
        let curve = Curve::ease_in_out();
        assert!((ease(100.0, 200.0, 0.0, &curve) - 100.0).abs() < 1e-4);
        assert!((ease(100.0, 200.0, 1.0, &curve) - 200.0).abs() < 1e-4);
    }

    #[test]
    fn ease_is_unclamped() {
        // A curve that overshoots 1.0 pushes the value past the end.
        let overshoot = Curve::new(vec![
            crate::core::curve::Key::flat(0.0, 0.0),
            crate::core::curve::Key::flat(0.5, 1.4),
            crate::core::curve::Key::flat(1.0, 1.0),
        ])
        .unwrap();
        let v = ease(0.0, 10.0, 0.5, &overshoot);
        assert!((v - 14.0).abs() < 1e-4);
    }

    #[test]
    fn mirror_of_linear_is_linear() {
        let curve = Curve::linear();
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let m = mirror_ease(0.0, 1.0, t, &curve);
            assert!((m - t).abs() < 1e-5, "at t={}", t);
        }
    }

    #[test]
    fn mirror_reflects_ease_in_into_ease_out() {
        let curve = Curve::ease_in();
        for t in [0.0, 0.2, 0.5, 0.8, 1.0] {
            let mirrored = mirror_ease(0.0, 1.0, t, &curve);
            let reflected = 1.0 - ease(0.0, 1.0, 1.0 - t, &curve);
            assert!((mirrored - reflected).abs() < 1e-5, "at t={}", t);
        }
        // Ease-in lags linear; its mirror leads.
        assert!(ease(0.0, 1.0, 0.25, &curve) < 0.25);
        assert!(mirror_ease(0.0, 1.0, 0.25, &curve) > 0.25);
    }

    #[test]
    fn quat_ease_reaches_end_rotation() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(FRAC_PI_2);
        let curve = Curve::linear();
        let end = ease_quat(a, b, 1.0, &curve);
        assert!(end.dot(b).abs() > 0.9999);
    }

    #[test]
    fn quat_ease_takes_shortest_path() {
        let a = Quat::from_rotation_y(0.1);
        let b = -Quat::from_rotation_y(0.2);
        let curve = Curve::linear();
        let mid = ease_quat(a, b, 0.5, &curve);
        // The halfway rotation stays near the small arc between the two.
        let expected = Quat::from_rotation_y(0.15);
        assert!(mid.dot(expected).abs() > 0.9999);
    }

    #[test]
    fn rgba_ease_clamps_but_mirror_does_not() {
        let overshoot = Curve::new(vec![
            crate::core::curve::Key::flat(0.0, 0.0),
            crate::core::curve::Key::flat(0.5, 1.4),
            crate::core::curve::Key::flat(1.0, 1.0),
        ])
        .unwrap();
        let clamped = ease_rgba(Rgba::BLACK, Rgba::WHITE, 0.5, &overshoot);
        assert!((clamped.r - 1.0).abs() < 1e-5);

        let mirrored = mirror_ease_rgba(Rgba::BLACK, Rgba::WHITE, 0.5, &overshoot);
        assert!(mirrored.r < 0.0);
    }
}
