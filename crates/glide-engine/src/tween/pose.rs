// tween/pose.rs
//
// Composite driver: launch position+rotation+scale against one target as a
// single logical operation, and cross-fade volume between two targets.
// The members are fully independent tweens that merely share their Motion
// parameters. There is no atomicity across them, but the group handle
// cancels them together.

use glam::{Quat, Vec3};

use crate::api::stage::Prop;
use crate::api::types::{TargetId, TweenId};
use crate::tween::scheduler::Scheduler;
use crate::tween::task::{Motion, Tween};

/// A transform snapshot: the reference a composite tween animates toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Snapshot a prop's transform, e.g. to match a sibling.
    pub fn of(prop: &Prop) -> Self {
        Self {
            position: prop.position,
            rotation: prop.rotation,
            scale: prop.scale,
        }
    }
}

/// Handles for the three members of a pose group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseHandles {
    pub scaling: TweenId,
    pub movement: TweenId,
    pub rotation: TweenId,
}

impl PoseHandles {
    pub fn iter(&self) -> impl Iterator<Item = TweenId> {
        [self.scaling, self.movement, self.rotation].into_iter()
    }
}

impl Scheduler {
    /// Animate a target from one pose to another: three independent tweens
    /// (scale, position, rotation) sharing the same Motion. The completion
    /// event, if any, is carried by the scale member only, so it fires once
    /// per group.
    pub fn match_pose(
        &mut self,
        target: TargetId,
        from: &Pose,
        to: &Pose,
        motion: Motion,
    ) -> PoseHandles {
        let mut silent = motion.clone();
        silent.on_complete = None;

        PoseHandles {
            scaling: self.add(target, Tween::scale(from.scale, to.scale, motion)),
            movement: self.add(
                target,
                Tween::move_to(from.position, to.position, silent.clone()),
            ),
            rotation: self.add(target, Tween::rotate(from.rotation, to.rotation, silent)),
        }
    }

    /// Cancel all members of a pose group. No completion events fire.
    pub fn cancel_group(&mut self, group: &PoseHandles) {
        for id in group.iter() {
            self.cancel(id);
        }
    }

    /// Fade one target's volume out while another's fades in, with shared
    /// timing. The completion event, if any, rides on the fade-in member.
    pub fn cross_fade(
        &mut self,
        out_target: TargetId,
        out_from: f32,
        in_target: TargetId,
        in_peak: f32,
        motion: Motion,
    ) -> (TweenId, TweenId) {
        let mut silent = motion.clone();
        silent.on_complete = None;

        let fading_out = self.add(out_target, Tween::volume(out_from, 0.0, silent));
        let fading_in = self.add(in_target, Tween::volume(0.0, in_peak, motion));
        (fading_out, fading_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stage::PropStage;
    use crate::api::types::TweenEvent;
    use crate::core::curve::Curve;
    use crate::tween::task::TickDelta;

    fn stage_with(ids: &[u32]) -> PropStage {
        let mut stage = PropStage::new();
        for &id in ids {
            stage.spawn(TargetId(id), Prop::new());
        }
        stage
    }

    #[test]
    fn pose_group_drives_all_three_properties() {
        let mut stage = stage_with(&[1]);
        let mut scheduler = Scheduler::new();

        let to = Pose::new(
            Vec3::new(4.0, 0.0, 0.0),
            Quat::from_rotation_z(1.0),
            Vec3::splat(2.0),
        );
        let motion = Motion::over(1.0)
            .with_curve(Curve::linear())
            .with_event(TweenEvent(5));
        let group = scheduler.match_pose(TargetId(1), &Pose::IDENTITY, &to, motion);
        assert_eq!(scheduler.len(), 3);

        scheduler.advance_all(TickDelta::uniform(1.0), &mut stage);
        let prop = stage.get(TargetId(1)).unwrap();
        assert_eq!(prop.position, to.position);
        assert_eq!(prop.scale, to.scale);
        assert!(prop.rotation.dot(to.rotation).abs() > 0.9999);

        // One event for the whole group.
        let events: Vec<_> = scheduler.drain_completed().collect();
        assert_eq!(events, vec![TweenEvent(5)]);
        assert!(!scheduler.is_active(group.movement));
    }

    #[test]
    fn group_cancel_stops_every_member() {
        let mut stage = stage_with(&[1]);
        let mut scheduler = Scheduler::new();
        let to = Pose::new(Vec3::X, Quat::IDENTITY, Vec3::splat(3.0));
        let group = scheduler.match_pose(
            TargetId(1),
            &Pose::IDENTITY,
            &to,
            Motion::over(1.0).with_curve(Curve::linear()),
        );

        scheduler.cancel_group(&group);
        assert!(scheduler.is_empty());

        scheduler.advance_all(TickDelta::uniform(0.5), &mut stage);
        assert_eq!(stage.get(TargetId(1)).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn cross_fade_swaps_volumes() {
        let mut stage = stage_with(&[1, 2]);
        let mut scheduler = Scheduler::new();
        let (out_id, in_id) = scheduler.cross_fade(
            TargetId(1),
            0.8,
            TargetId(2),
            1.0,
            Motion::over(1.0).with_curve(Curve::linear()),
        );

        scheduler.advance_all(TickDelta::uniform(0.5), &mut stage);
        assert!((stage.get(TargetId(1)).unwrap().volume - 0.4).abs() < 1e-5);
        assert!((stage.get(TargetId(2)).unwrap().volume - 0.5).abs() < 1e-5);

        scheduler.advance_all(TickDelta::uniform(0.5), &mut stage);
        assert_eq!(stage.get(TargetId(1)).unwrap().volume, 0.0);
        assert_eq!(stage.get(TargetId(2)).unwrap().volume, 1.0);
        assert!(!scheduler.is_active(out_id));
        assert!(!scheduler.is_active(in_id));
    }
}
