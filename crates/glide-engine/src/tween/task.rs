// tween/task.rs
//
// A Tween is one running interpolation bound to a target property: its own
// elapsed time, curve, playback counters, and pause flag. The scheduler
// owns tweens from registration to completion; callers keep only a TweenId.
//
// Usage:
//   let motion = Motion::over(0.5).with_curve(Curve::linear()).ping_pong(1);
//   scheduler.add(target, Tween::scale(Vec3::ONE, Vec3::splat(2.0), motion));

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::api::stage::Property;
use crate::api::types::{Rgba, TweenEvent};
use crate::core::curve::Curve;
use crate::core::math::{look_rotation, remap};
use crate::core::path::MotionPath;
use crate::tween::interp::{
    ease, ease_quat, ease_rgba, ease_vec3, mirror_ease, mirror_ease_quat, mirror_ease_rgba,
    mirror_ease_vec3,
};

/// What happens when a tween finishes a playback segment.
///
/// The three repeating modes are mutually exclusive; on completion they are
/// checked in the order ping-pong, mirror-ping-pong, loop, and only one
/// fires per completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    /// Play once, then finish.
    #[default]
    Once,
    /// Restart from the original start value `n` more times.
    Loop(u32),
    /// Reverse direction `n` more times, same curve shape each way.
    PingPong(u32),
    /// Reverse direction `n` more times, reflecting the curve each bounce
    /// so the return leg eases symmetrically.
    MirrorPingPong(u32),
}

/// Which frame clock a tween consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSource {
    /// Game time; pauses and slow motion affect the tween.
    #[default]
    Scaled,
    /// Wall time; runs through pauses (menus, hit-stop).
    Unscaled,
}

/// Frame deltas for one tick, both clocks. The host passes this into
/// `Scheduler::advance_all` once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDelta {
    pub scaled: f32,
    pub unscaled: f32,
}

impl TickDelta {
    pub fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    /// Both clocks advancing in lockstep.
    pub fn uniform(dt: f32) -> Self {
        Self {
            scaled: dt,
            unscaled: dt,
        }
    }

    fn select(&self, source: TimeSource) -> f32 {
        match source {
            TimeSource::Scaled => self.scaled,
            TimeSource::Unscaled => self.unscaled,
        }
    }
}

/// Timing and playback parameters shared by every channel kind, and by all
/// members of a composite group.
#[derive(Debug, Clone)]
pub struct Motion {
    /// Segment duration in seconds. Non-positive durations complete on the
    /// first tick with the end value applied.
    pub duration: f32,
    pub curve: Arc<Curve>,
    /// Play through the reflected curve instead of the authored one.
    pub mirror: bool,
    pub playback: Playback,
    pub time_source: TimeSource,
    /// Emitted exactly once, when the final cycle finishes. Never emitted
    /// on cancellation or target loss.
    pub on_complete: Option<TweenEvent>,
}

impl Motion {
    /// A once-through motion over `duration` seconds on the default
    /// ease-in-out curve.
    pub fn over(duration: f32) -> Self {
        Self {
            duration,
            curve: Curve::ease_in_out(),
            mirror: false,
            playback: Playback::Once,
            time_source: TimeSource::Scaled,
            on_complete: None,
        }
    }

    // -- Builder methods --

    pub fn with_curve(mut self, curve: Arc<Curve>) -> Self {
        self.curve = curve;
        self
    }

    pub fn mirrored(mut self) -> Self {
        self.mirror = true;
        self
    }

    pub fn looped(mut self, repeats: u32) -> Self {
        self.playback = Playback::Loop(repeats);
        self
    }

    pub fn ping_pong(mut self, repeats: u32) -> Self {
        self.playback = Playback::PingPong(repeats);
        self
    }

    pub fn mirror_ping_pong(mut self, repeats: u32) -> Self {
        self.playback = Playback::MirrorPingPong(repeats);
        self
    }

    pub fn unscaled(mut self) -> Self {
        self.time_source = TimeSource::Unscaled;
        self
    }

    pub fn with_event(mut self, event: TweenEvent) -> Self {
        self.on_complete = Some(event);
        self
    }
}

/// What property a tween drives, with explicit endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum Channel {
    /// Position relative to the target's parent.
    Move { from: Vec3, to: Vec3 },
    /// Position in world space.
    MoveWorld { from: Vec3, to: Vec3 },
    /// Shortest-path rotation.
    Rotate { from: Quat, to: Quat },
    /// Component-wise euler rotation in radians; spins past pi instead of
    /// taking the short way around.
    RotateEuler { from: Vec3, to: Vec3 },
    Scale { from: Vec3, to: Vec3 },
    Alpha { from: f32, to: f32 },
    /// RGB channels; alpha is left to alpha tweens.
    Color { from: Rgba, to: Rgba },
    /// Audio volume.
    Volume { from: f32, to: f32 },
    /// World position along a traced path, optionally facing along it.
    Path {
        path: Arc<MotionPath>,
        align: bool,
        inverse: bool,
    },
}

impl Channel {
    /// Interpolated write at normalized progress `t`, plus an optional
    /// facing write for aligned path motion.
    fn sample(&self, t: f32, mirror: bool, curve: &Curve) -> (Property, Option<Property>) {
        match self {
            Channel::Move { from, to } => {
                let v = if mirror {
                    mirror_ease_vec3(*from, *to, t, curve)
                } else {
                    ease_vec3(*from, *to, t, curve)
                };
                (Property::LocalPosition(v), None)
            }
            Channel::MoveWorld { from, to } => {
                let v = if mirror {
                    mirror_ease_vec3(*from, *to, t, curve)
                } else {
                    ease_vec3(*from, *to, t, curve)
                };
                (Property::WorldPosition(v), None)
            }
            Channel::Rotate { from, to } => {
                let q = if mirror {
                    mirror_ease_quat(*from, *to, t, curve)
                } else {
                    ease_quat(*from, *to, t, curve)
                };
                (Property::Rotation(q), None)
            }
            Channel::RotateEuler { from, to } => {
                let v = if mirror {
                    mirror_ease_vec3(*from, *to, t, curve)
                } else {
                    ease_vec3(*from, *to, t, curve)
                };
                (Property::EulerAngles(v), None)
            }
            Channel::Scale { from, to } => {
                let v = if mirror {
                    mirror_ease_vec3(*from, *to, t, curve)
                } else {
                    ease_vec3(*from, *to, t, curve)
                };
                (Property::Scale(v), None)
            }
            Channel::Alpha { from, to } => {
                let v = if mirror {
                    mirror_ease(*from, *to, t, curve)
                } else {
                    ease(*from, *to, t, curve)
                };
                (Property::Alpha(v), None)
            }
            Channel::Color { from, to } => {
                let c = if mirror {
                    mirror_ease_rgba(*from, *to, t, curve)
                } else {
                    ease_rgba(*from, *to, t, curve)
                };
                (Property::Color(c), None)
            }
            Channel::Volume { from, to } => {
                let v = if mirror {
                    mirror_ease(*from, *to, t, curve)
                } else {
                    ease(*from, *to, t, curve)
                };
                (Property::Volume(v), None)
            }
            Channel::Path {
                path,
                align,
                inverse,
            } => {
                let scrub = if *inverse {
                    remap(t, 0.0, 1.0, 1.0, 0.0)
                } else {
                    t
                };
                let s = if mirror {
                    mirror_ease(0.0, 1.0, scrub, curve)
                } else {
                    ease(0.0, 1.0, scrub, curve)
                };
                let (pos, look) = path.sample(s);
                let facing = (*align && pos != look)
                    .then(|| Property::Rotation(look_rotation(pos - look, Vec3::Y)));
                (Property::WorldPosition(pos), facing)
            }
        }
    }

    /// Exact value at the start of the current segment.
    fn start_value(&self) -> Property {
        match self {
            Channel::Move { from, .. } => Property::LocalPosition(*from),
            Channel::MoveWorld { from, .. } => Property::WorldPosition(*from),
            Channel::Rotate { from, .. } => Property::Rotation(*from),
            Channel::RotateEuler { from, .. } => Property::EulerAngles(*from),
            Channel::Scale { from, .. } => Property::Scale(*from),
            Channel::Alpha { from, .. } => Property::Alpha(*from),
            Channel::Color { from, .. } => Property::Color(*from),
            Channel::Volume { from, .. } => Property::Volume(*from),
            Channel::Path { path, inverse, .. } => {
                Property::WorldPosition(path.sample(if *inverse { 1.0 } else { 0.0 }).0)
            }
        }
    }

    /// Exact value at the end of the current segment. Terminal completion
    /// writes this so no interpolation error is left behind.
    fn end_value(&self) -> Property {
        match self {
            Channel::Move { to, .. } => Property::LocalPosition(*to),
            Channel::MoveWorld { to, .. } => Property::WorldPosition(*to),
            Channel::Rotate { to, .. } => Property::Rotation(*to),
            Channel::RotateEuler { to, .. } => Property::EulerAngles(*to),
            Channel::Scale { to, .. } => Property::Scale(*to),
            Channel::Alpha { to, .. } => Property::Alpha(*to),
            Channel::Color { to, .. } => Property::Color(*to),
            Channel::Volume { to, .. } => Property::Volume(*to),
            Channel::Path { path, inverse, .. } => {
                Property::WorldPosition(path.sample(if *inverse { 0.0 } else { 1.0 }).0)
            }
        }
    }

    /// Flip direction for a ping-pong bounce.
    fn reverse(&mut self) {
        match self {
            Channel::Move { from, to }
            | Channel::MoveWorld { from, to }
            | Channel::RotateEuler { from, to }
            | Channel::Scale { from, to } => std::mem::swap(from, to),
            Channel::Rotate { from, to } => std::mem::swap(from, to),
            Channel::Alpha { from, to } | Channel::Volume { from, to } => {
                std::mem::swap(from, to)
            }
            Channel::Color { from, to } => std::mem::swap(from, to),
            Channel::Path { inverse, .. } => *inverse = !*inverse,
        }
    }
}

/// Outcome of one tween tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    /// Paused; nothing written.
    Paused,
    /// Wrote an interpolated value (or cycled into another segment).
    Running(Property, Option<Property>),
    /// Final cycle finished; the exact end value was produced and the
    /// tween should be deregistered.
    Done(Property),
}

/// A single running animation task.
#[derive(Debug, Clone)]
pub struct Tween {
    pub channel: Channel,
    pub motion: Motion,
    /// Elapsed time within the current segment.
    pub elapsed: f32,
    /// Whether currently playing (can be paused).
    pub playing: bool,
}

impl Tween {
    pub fn new(channel: Channel, motion: Motion) -> Self {
        Self {
            channel,
            motion,
            elapsed: 0.0,
            playing: true,
        }
    }

    /// Local-space position tween.
    pub fn move_to(from: Vec3, to: Vec3, motion: Motion) -> Self {
        Self::new(Channel::Move { from, to }, motion)
    }

    /// World-space position tween.
    pub fn move_world(from: Vec3, to: Vec3, motion: Motion) -> Self {
        Self::new(Channel::MoveWorld { from, to }, motion)
    }

    /// Shortest-path rotation tween.
    pub fn rotate(from: Quat, to: Quat, motion: Motion) -> Self {
        Self::new(Channel::Rotate { from, to }, motion)
    }

    /// Euler rotation tween; interpolates each axis independently.
    pub fn rotate_euler(from: Vec3, to: Vec3, motion: Motion) -> Self {
        Self::new(Channel::RotateEuler { from, to }, motion)
    }

    pub fn scale(from: Vec3, to: Vec3, motion: Motion) -> Self {
        Self::new(Channel::Scale { from, to }, motion)
    }

    pub fn alpha(from: f32, to: f32, motion: Motion) -> Self {
        Self::new(Channel::Alpha { from, to }, motion)
    }

    /// Fade in from transparent.
    pub fn fade_in(motion: Motion) -> Self {
        Self::alpha(0.0, 1.0, motion)
    }

    /// Fade out to transparent.
    pub fn fade_out(motion: Motion) -> Self {
        Self::alpha(1.0, 0.0, motion)
    }

    pub fn color(from: Rgba, to: Rgba, motion: Motion) -> Self {
        Self::new(Channel::Color { from, to }, motion)
    }

    pub fn volume(from: f32, to: f32, motion: Motion) -> Self {
        Self::new(Channel::Volume { from, to }, motion)
    }

    /// Follow a traced path from start to end.
    pub fn follow_path(path: Arc<MotionPath>, motion: Motion) -> Self {
        Self::new(
            Channel::Path {
                path,
                align: false,
                inverse: false,
            },
            motion,
        )
    }

    // -- Builder methods --

    /// Face along the travel direction while following a path.
    pub fn aligned(mut self) -> Self {
        if let Channel::Path { align, .. } = &mut self.channel {
            *align = true;
        }
        self
    }

    /// Traverse a path end-to-start.
    pub fn reversed(mut self) -> Self {
        if let Channel::Path { inverse, .. } = &mut self.channel {
            *inverse = true;
        }
        self
    }

    /// Start paused; resume through the scheduler.
    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    /// Normalized progress through the current segment, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.motion.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.motion.duration).clamp(0.0, 1.0)
        }
    }

    /// Advance by one tick and produce the write for this frame.
    ///
    /// Segment completion forces the exact end value, then consumes at most
    /// one playback transition: ping-pong before mirror-ping-pong before
    /// loop. When no transition remains the tween reports `Done`.
    pub fn step(&mut self, delta: TickDelta) -> TickResult {
        if !self.playing {
            return TickResult::Paused;
        }

        // Degenerate duration: complete immediately, end value applied.
        if self.motion.duration <= 0.0 {
            return TickResult::Done(self.channel.end_value());
        }

        self.elapsed += delta.select(self.motion.time_source);

        if self.elapsed < self.motion.duration {
            let t = remap(self.elapsed, 0.0, self.motion.duration, 0.0, 1.0);
            let (value, facing) = self.channel.sample(t, self.motion.mirror, &self.motion.curve);
            return TickResult::Running(value, facing);
        }

        let end = self.channel.end_value();
        match self.motion.playback {
            Playback::PingPong(n) if n > 0 => {
                self.motion.playback = Playback::PingPong(n - 1);
                self.channel.reverse();
                self.elapsed = 0.0;
                TickResult::Running(end, None)
            }
            Playback::MirrorPingPong(n) if n > 0 => {
                self.motion.playback = Playback::MirrorPingPong(n - 1);
                self.channel.reverse();
                self.motion.mirror = !self.motion.mirror;
                self.elapsed = 0.0;
                TickResult::Running(end, None)
            }
            Playback::Loop(n) if n > 0 => {
                self.motion.playback = Playback::Loop(n - 1);
                self.elapsed = 0.0;
                // Snap back to the original start value; next tick heads
                // toward the same destination again.
                TickResult::Running(self.channel.start_value(), None)
            }
            _ => TickResult::Done(end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_step_hits_midpoint() {
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        let mut tween = Tween::alpha(0.0, 1.0, motion);

        match tween.step(TickDelta::uniform(0.5)) {
            TickResult::Running(Property::Alpha(v), None) => assert!((v - 0.5).abs() < 1e-5),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn once_finishes_with_exact_end() {
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        let mut tween = Tween::alpha(0.0, 0.7, motion);

        // Overshooting the duration still lands exactly on the end value.
        match tween.step(TickDelta::uniform(3.0)) {
            TickResult::Done(Property::Alpha(v)) => assert_eq!(v, 0.7),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn degenerate_duration_completes_immediately() {
        let motion = Motion::over(0.0).with_curve(Curve::linear()).looped(5);
        let mut tween = Tween::volume(1.0, 0.0, motion);

        match tween.step(TickDelta::uniform(1.0 / 60.0)) {
            TickResult::Done(Property::Volume(v)) => assert_eq!(v, 0.0),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn ping_pong_reverses_endpoints() {
        let motion = Motion::over(1.0).with_curve(Curve::linear()).ping_pong(1);
        let mut tween = Tween::alpha(0.0, 1.0, motion);

        // First segment completes and bounces.
        match tween.step(TickDelta::uniform(1.0)) {
            TickResult::Running(Property::Alpha(v), None) => assert_eq!(v, 1.0),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(
            tween.channel,
            Channel::Alpha { from: 1.0, to: 0.0 }
        );

        // Second segment is the last.
        match tween.step(TickDelta::uniform(1.0)) {
            TickResult::Done(Property::Alpha(v)) => assert_eq!(v, 0.0),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn mirror_ping_pong_flips_mirror_flag() {
        let motion = Motion::over(1.0)
            .with_curve(Curve::ease_in())
            .mirror_ping_pong(1);
        let mut tween = Tween::alpha(0.0, 1.0, motion);
        assert!(!tween.motion.mirror);

        tween.step(TickDelta::uniform(1.0));
        assert!(tween.motion.mirror);
        assert_eq!(tween.channel, Channel::Alpha { from: 1.0, to: 0.0 });
    }

    #[test]
    fn loop_restarts_from_original_start() {
        let motion = Motion::over(1.0).with_curve(Curve::linear()).looped(1);
        let mut tween = Tween::alpha(0.2, 0.9, motion);

        match tween.step(TickDelta::uniform(1.0)) {
            TickResult::Running(Property::Alpha(v), None) => assert!((v - 0.2).abs() < 1e-6),
            other => panic!("unexpected result {:?}", other),
        }
        // Endpoints unchanged: same direction on the repeat.
        assert_eq!(tween.channel, Channel::Alpha { from: 0.2, to: 0.9 });

        match tween.step(TickDelta::uniform(1.0)) {
            TickResult::Done(Property::Alpha(v)) => assert_eq!(v, 0.9),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn unscaled_tween_ignores_scaled_clock() {
        let motion = Motion::over(1.0).with_curve(Curve::linear()).unscaled();
        let mut tween = Tween::alpha(0.0, 1.0, motion);

        // Game clock frozen, wall clock advancing.
        match tween.step(TickDelta::new(0.0, 0.5)) {
            TickResult::Running(Property::Alpha(v), None) => assert!((v - 0.5).abs() < 1e-5),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn paused_tween_does_not_advance() {
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        let mut tween = Tween::alpha(0.0, 1.0, motion).paused();

        assert_eq!(tween.step(TickDelta::uniform(0.5)), TickResult::Paused);
        assert_eq!(tween.elapsed, 0.0);
    }

    #[test]
    fn euler_rotation_spins_past_pi() {
        use std::f32::consts::TAU;
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        let mut tween = Tween::rotate_euler(Vec3::ZERO, Vec3::new(0.0, TAU, 0.0), motion);

        // A full-turn euler tween passes through the halfway spin instead
        // of collapsing to the shortest arc.
        match tween.step(TickDelta::uniform(0.5)) {
            TickResult::Running(Property::EulerAngles(e), None) => {
                assert!((e.y - TAU / 2.0).abs() < 1e-4)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn fade_helpers_span_the_full_range() {
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        assert_eq!(
            Tween::fade_in(motion.clone()).channel,
            Channel::Alpha { from: 0.0, to: 1.0 }
        );
        assert_eq!(
            Tween::fade_out(motion).channel,
            Channel::Alpha { from: 1.0, to: 0.0 }
        );
    }

    #[test]
    fn reversed_path_starts_at_the_far_end() {
        let path = Arc::new(
            MotionPath::from_points(vec![Vec3::ZERO, Vec3::X * 10.0]).unwrap(),
        );
        let motion = Motion::over(1.0).with_curve(Curve::linear());
        let mut tween = Tween::follow_path(path, motion).reversed();

        match tween.step(TickDelta::uniform(0.25)) {
            TickResult::Running(Property::WorldPosition(p), _) => {
                assert!((p.x - 7.5).abs() < 1e-4)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
