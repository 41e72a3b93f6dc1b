// core/path.rs
//
// Motion paths traced from bezier control points. A path is a fixed array
// of points sampled at construction; runtime sampling is piecewise-linear,
// which keeps per-tick work bounded no matter how curvy the path is.

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("a path needs at least two points")]
    TooFewPoints,
    #[error("point count {0} cannot trace a curve")]
    DegenerateCount(usize),
}

/// A polyline for path-following tweens, usually traced from a bezier.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPath {
    points: Vec<Vec3>,
}

impl MotionPath {
    /// Build a path from explicit points.
    pub fn from_points(points: Vec<Vec3>) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints);
        }
        Ok(Self { points })
    }

    /// Trace a quadratic bezier through `point_count` points.
    ///
    /// With `through_influence`, the influence point is adjusted so the
    /// curve passes through it instead of merely bending toward it.
    pub fn quadratic(
        origin: Vec3,
        influence: Vec3,
        destination: Vec3,
        point_count: usize,
        through_influence: bool,
    ) -> Result<Self, PathError> {
        if point_count < 2 {
            return Err(PathError::DegenerateCount(point_count));
        }
        let influence = if through_influence {
            influence * 2.0 - (origin + destination) / 2.0
        } else {
            influence
        };

        let mut points = Vec::with_capacity(point_count);
        for i in 0..point_count {
            let t = i as f32 / (point_count - 1) as f32;
            let p1 = origin.lerp(influence, t);
            let p2 = influence.lerp(destination, t);
            points.push(p1.lerp(p2, t));
        }
        Ok(Self { points })
    }

    /// Trace a cubic bezier through `point_count` points.
    pub fn cubic(
        origin: Vec3,
        influence_a: Vec3,
        influence_b: Vec3,
        destination: Vec3,
        point_count: usize,
    ) -> Result<Self, PathError> {
        if point_count < 2 {
            return Err(PathError::DegenerateCount(point_count));
        }
        let mut points = Vec::with_capacity(point_count);
        for i in 0..point_count {
            let t = i as f32 / (point_count - 1) as f32;
            let p1 = origin.lerp(influence_a, t);
            let p2 = influence_a.lerp(influence_b, t);
            let p3 = influence_b.lerp(destination, t);
            let p4 = p1.lerp(p2, t);
            let p5 = p2.lerp(p3, t);
            points.push(p4.lerp(p5, t));
        }
        Ok(Self { points })
    }

    /// Sample the path at normalized `t` (clamped to [0, 1]).
    ///
    /// Returns the position and a trailing look target: the point just
    /// behind the direction of travel, for facing alignment. At the very
    /// start both are equal, and callers skip alignment when they coincide.
    pub fn sample(&self, t: f32) -> (Vec3, Vec3) {
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (self.points.len() - 1) as f32;
        let idx = (scaled as usize).min(self.points.len() - 2);
        let frac = scaled - idx as f32;

        let pos = self.points[idx].lerp(self.points[idx + 1], frac);
        let look = if frac > 0.0 {
            self.points[idx]
        } else if idx > 0 {
            self.points[idx - 1]
        } else {
            self.points[0]
        };
        (pos, look)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_land_on_controls() {
        let path =
            MotionPath::quadratic(Vec3::ZERO, Vec3::new(5.0, 10.0, 0.0), Vec3::X * 10.0, 16, false)
                .unwrap();
        assert!((path.sample(0.0).0 - Vec3::ZERO).length() < 1e-5);
        assert!((path.sample(1.0).0 - Vec3::X * 10.0).length() < 1e-5);
    }

    #[test]
    fn quadratic_bends_toward_influence() {
        let path =
            MotionPath::quadratic(Vec3::ZERO, Vec3::new(5.0, 10.0, 0.0), Vec3::X * 10.0, 64, false)
                .unwrap();
        let (mid, _) = path.sample(0.5);
        // Bezier midpoint sits halfway between chord and influence.
        assert!((mid.y - 5.0).abs() < 0.05);
    }

    #[test]
    fn through_influence_passes_through() {
        let influence = Vec3::new(5.0, 10.0, 0.0);
        let path = MotionPath::quadratic(Vec3::ZERO, influence, Vec3::X * 10.0, 129, true).unwrap();
        let (mid, _) = path.sample(0.5);
        assert!((mid - influence).length() < 0.1);
    }

    #[test]
    fn look_trails_the_position() {
        let path = MotionPath::from_points(vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0]).unwrap();
        let (pos, look) = path.sample(0.75);
        assert!(look.x < pos.x);

        // At the start there is no travel direction yet.
        let (pos, look) = path.sample(0.0);
        assert_eq!(pos, look);
    }

    #[test]
    fn rejects_degenerate_paths() {
        assert!(matches!(
            MotionPath::from_points(vec![Vec3::ZERO]),
            Err(PathError::TooFewPoints)
        ));
        assert!(matches!(
            MotionPath::quadratic(Vec3::ZERO, Vec3::ONE, Vec3::X, 1, false),
            Err(PathError::DegenerateCount(1))
        ));
    }
}
