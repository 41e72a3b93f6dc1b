// core/curve.rs
//
// Keyframed easing curves. A curve maps normalized time to a shaping value
// via cubic Hermite segments between keys, the way authoring tools express
// hand-drawn easing. Curves are validated at construction and immutable
// afterwards; evaluation never fails.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single curve keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Key {
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }

    /// A key with flat tangents.
    pub const fn flat(time: f32, value: f32) -> Self {
        Self::new(time, value, 0.0, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.value.is_finite()
            && self.in_tangent.is_finite()
            && self.out_tangent.is_finite()
    }
}

/// Curve construction failures. Malformed curves fail fast here, never at
/// evaluation time.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("curve has no keys")]
    Empty,
    #[error("key {index} is not strictly after the previous key")]
    Unordered { index: usize },
    #[error("key {index} contains a non-finite component")]
    NonFinite { index: usize },
    #[error("keys span [{first}, {last}] but must cover [0, 1]")]
    DomainGap { first: f32, last: f32 },
    #[error("invalid curve JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable easing curve: ordered keyframes evaluated with cubic
/// Hermite interpolation. Times outside the stored domain clamp to the
/// boundary key values; there is no extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    keys: Vec<Key>,
}

impl Curve {
    /// Build a curve from keyframes. Keys must be non-empty, finite,
    /// strictly increasing in time, and span at least [0, 1].
    pub fn new(keys: Vec<Key>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && key.time <= keys[index - 1].time {
                return Err(CurveError::Unordered { index });
            }
        }
        let first = keys[0].time;
        let last = keys[keys.len() - 1].time;
        if first > 0.0 || last < 1.0 {
            return Err(CurveError::DomainGap { first, last });
        }
        Ok(Self { keys })
    }

    /// Parse a curve from a JSON array of keys, e.g.
    /// `[{"time":0,"value":0},{"time":1,"value":1}]`.
    /// Omitted tangents default to flat.
    pub fn from_json(json: &str) -> Result<Self, CurveError> {
        let keys: Vec<Key> = serde_json::from_str(json)?;
        Self::new(keys)
    }

    /// Sample the curve at `t`. Clamps to the boundary key values outside
    /// the stored domain.
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = &self.keys[0];
        let last = &self.keys[self.keys.len() - 1];
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // Bracketing segment: keys[idx - 1].time <= t < keys[idx].time.
        let idx = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[idx - 1];
        let k1 = &self.keys[idx];

        let dt = k1.time - k0.time;
        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let m0 = k0.out_tangent * dt;
        let m1 = k1.in_tangent * dt;

        (2.0 * s3 - 3.0 * s2 + 1.0) * k0.value
            + (s3 - 2.0 * s2 + s) * m0
            + (-2.0 * s3 + 3.0 * s2) * k1.value
            + (s3 - s2) * m1
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    // -- Shared presets --

    /// Constant-velocity curve: (0,0) to (1,1) with unit tangents.
    pub fn linear() -> Arc<Curve> {
        static CURVE: LazyLock<Arc<Curve>> = LazyLock::new(|| {
            Arc::new(Curve {
                keys: vec![Key::new(0.0, 0.0, 1.0, 1.0), Key::new(1.0, 1.0, 1.0, 1.0)],
            })
        });
        CURVE.clone()
    }

    /// Smooth S-curve over [0, 1]: flat tangents at both ends.
    pub fn ease_in_out() -> Arc<Curve> {
        static CURVE: LazyLock<Arc<Curve>> = LazyLock::new(|| {
            Arc::new(Curve {
                keys: vec![Key::flat(0.0, 0.0), Key::flat(1.0, 1.0)],
            })
        });
        CURVE.clone()
    }

    /// Accelerate-only curve: the first half of a wider S-curve. The keys
    /// sit at (0,0) and (2,2), so over [0, 1] the value climbs from 0 to 1
    /// with increasing slope.
    pub fn ease_in() -> Arc<Curve> {
        static CURVE: LazyLock<Arc<Curve>> = LazyLock::new(|| {
            Arc::new(Curve {
                keys: vec![Key::flat(0.0, 0.0), Key::flat(2.0, 2.0)],
            })
        });
        CURVE.clone()
    }
}
