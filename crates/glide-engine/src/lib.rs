pub mod api;
pub mod core;
pub mod tween;
pub mod util;

// Re-export key types at crate root for convenience
pub use crate::api::stage::{Prop, PropStage, Property, Stage};
pub use crate::api::types::{Rgba, TargetId, TweenEvent, TweenId};
pub use crate::core::curve::{Curve, CurveError, Key};
pub use crate::core::math::{
    inverse_lerp, lerp, look_rotation, positive_angle, positive_angle_vec3, remap,
};
pub use crate::core::path::{MotionPath, PathError};
pub use crate::core::rng::Rng;
pub use crate::tween::{
    ease, ease_quat, ease_rgba, ease_vec3, mirror_ease, mirror_ease_quat, mirror_ease_rgba,
    mirror_ease_vec3, Channel, Motion, Playback, Pose, PoseHandles, Scheduler, TickDelta,
    TickResult, TimeSource, Tween,
};
pub use crate::util::WeightedTable;
