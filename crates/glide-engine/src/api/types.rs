use serde::{Deserialize, Serialize};

/// Unique identifier for an animatable target owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// Handle to a running tween. Permits cancellation and state polling
/// without owning the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// A completion event emitted when a tween finishes its final cycle.
/// The numeric value carries a host-defined meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TweenEvent(pub u32);

/// RGBA color with [0, 1] channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise lerp with `t` clamped to [0, 1]. Color channels are
    /// bounded, so curve overshoot is not allowed to push them outside.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        self.lerp_unclamped(other, t.clamp(0.0, 1.0))
    }

    /// Channel-wise lerp without clamping `t`.
    pub fn lerp_unclamped(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_clamps_factor() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 1.5);
        assert_eq!(mid, Rgba::WHITE);
    }

    #[test]
    fn lerp_unclamped_overshoots() {
        let over = Rgba::BLACK.lerp_unclamped(Rgba::WHITE, 1.5);
        assert!((over.r - 1.5).abs() < 1e-6);
    }
}
