// tween/scheduler.rs
//
// The task registry. Owns every running tween from registration until
// completion or cancellation and advances them once per host tick, in
// registration order. Explicitly constructed by the caller and injected
// into the frame loop; there is no hidden global instance.
//
// Usage:
//   let mut scheduler = Scheduler::new();
//   let id = scheduler.add(target, Tween::move_to(from, to, Motion::over(0.5)));
//   scheduler.advance_all(TickDelta::uniform(dt), &mut stage);  // once per frame
//   for event in scheduler.drain_completed() { ... }

use std::collections::BTreeMap;

use crate::api::stage::Stage;
use crate::api::types::{TargetId, TweenEvent, TweenId};
use crate::tween::task::{TickDelta, TickResult, Tween};

/// Registry and per-frame driver for all active tweens.
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Keyed by a monotonically increasing id, so iteration order is
    /// registration order.
    tweens: BTreeMap<TweenId, (TargetId, Tween)>,
    next_id: u64,
    /// Completion events to be drained by the host.
    completed: Vec<TweenEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween against a target. Returns a handle for later
    /// control; the scheduler owns the tween itself.
    pub fn add(&mut self, target: TargetId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (target, tween));
        log::trace!("tween {:?} registered on target {:?}", id, target);
        id
    }

    /// Cancel one tween. No completion event fires.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Cancel every tween bound to a target. No completion events fire.
    pub fn cancel_target(&mut self, target: TargetId) {
        let before = self.tweens.len();
        self.tweens.retain(|_, (t, _)| *t != target);
        let dropped = before - self.tweens.len();
        if dropped > 0 {
            log::debug!("cancelled {} tween(s) on target {:?}", dropped, target);
        }
    }

    /// Cancel everything. No completion events fire, and pending unread
    /// events are discarded too.
    pub fn cancel_all(&mut self) {
        log::debug!("cancelling all {} tween(s)", self.tweens.len());
        self.tweens.clear();
        self.completed.clear();
    }

    /// Pause a tween.
    pub fn pause(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = false;
        }
    }

    /// Resume a paused tween.
    pub fn resume(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = true;
        }
    }

    /// Pause all tweens.
    pub fn pause_all(&mut self) {
        for (_, tween) in self.tweens.values_mut() {
            tween.playing = false;
        }
    }

    /// Resume all tweens.
    pub fn resume_all(&mut self) {
        for (_, tween) in self.tweens.values_mut() {
            tween.playing = true;
        }
    }

    /// Whether a tween is still registered (running or paused).
    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(&id).map(|(_, t)| t)
    }

    /// The target a tween is bound to.
    pub fn target_of(&self, id: TweenId) -> Option<TargetId> {
        self.tweens.get(&id).map(|(t, _)| *t)
    }

    /// Advance every registered tween by one tick, writing interpolated
    /// values through the stage. Returns the number of tweens that
    /// finished their final cycle this tick.
    ///
    /// Targets are liveness-checked before each update; a dead target's
    /// tween is dropped without writing and without an event. The sweep
    /// walks a snapshot of ids, so removal mid-sweep is safe and tweens
    /// registered while an earlier tick's events are handled never corrupt
    /// iteration.
    pub fn advance_all<S: Stage>(&mut self, delta: TickDelta, stage: &mut S) -> usize {
        let ids: Vec<TweenId> = self.tweens.keys().copied().collect();
        let mut ended: Vec<(TweenId, Option<TweenEvent>)> = Vec::new();
        let mut dropped: Vec<TweenId> = Vec::new();

        for id in ids {
            let Some((target, tween)) = self.tweens.get_mut(&id) else {
                continue;
            };
            let target = *target;

            if !stage.is_alive(target) {
                log::debug!("target {:?} gone, dropping tween {:?}", target, id);
                dropped.push(id);
                continue;
            }

            match tween.step(delta) {
                TickResult::Paused => {}
                TickResult::Running(value, facing) => {
                    stage.write(target, value);
                    if let Some(facing) = facing {
                        stage.write(target, facing);
                    }
                }
                TickResult::Done(value) => {
                    stage.write(target, value);
                    ended.push((id, tween.motion.on_complete));
                }
            }
        }

        for id in dropped {
            self.tweens.remove(&id);
        }

        let finished = ended.len();
        for (id, event) in ended {
            self.tweens.remove(&id);
            if let Some(event) = event {
                log::trace!("tween {:?} completed with event {:?}", id, event);
                self.completed.push(event);
            }
        }
        finished
    }

    /// Drain completion events gathered since the last drain.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = TweenEvent> + '_ {
        self.completed.drain(..)
    }

    /// Number of registered tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
