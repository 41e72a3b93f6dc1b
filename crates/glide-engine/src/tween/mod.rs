// tween/mod.rs
//
// The tweening runtime: curve-mapped interpolators, the per-task playback
// state machine, the scheduler that drives every task once per host tick,
// and the pose composite driver.

pub mod interp;
pub mod pose;
pub mod scheduler;
pub mod task;

pub use interp::{
    ease, ease_quat, ease_rgba, ease_vec3, mirror_ease, mirror_ease_quat, mirror_ease_rgba,
    mirror_ease_vec3,
};
pub use pose::{Pose, PoseHandles};
pub use scheduler::Scheduler;
pub use task::{Channel, Motion, Playback, TickDelta, TickResult, TimeSource, Tween};
