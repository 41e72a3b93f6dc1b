// api/stage.rs
//
// Host-facing surface: the Stage trait the engine writes through, plus a
// concrete PropStage store for hosts (and tests) that don't bring their own.
// The engine never holds references into host objects: it asks the stage
// whether a target is still alive before every update and hands over plain
// property values.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::api::types::{Rgba, TargetId};

/// One interpolated value produced by a tween tick, tagged with the
/// property it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    /// Position relative to the target's parent.
    LocalPosition(Vec3),
    /// Position in world space.
    WorldPosition(Vec3),
    Rotation(Quat),
    /// Component-wise euler angles in radians.
    EulerAngles(Vec3),
    Scale(Vec3),
    /// Opacity channel only.
    Alpha(f32),
    /// RGB channels; the alpha channel is owned by alpha tweens.
    Color(Rgba),
    /// Audio volume in [0, 1].
    Volume(f32),
}

/// What the engine needs from a host: a liveness query and a property sink.
///
/// Targets are owned by the host (scene nodes, audio sources, UI elements).
/// `is_alive` is consulted before each update; a dead target cancels its
/// tweens silently. Two tweens driving the same property of one target are
/// not prevented; the later-registered write wins within a tick.
pub trait Stage {
    fn is_alive(&self, id: TargetId) -> bool;
    fn write(&mut self, id: TargetId, value: Property);
}

/// An animatable record: transform, color, and volume in one flat struct.
#[derive(Debug, Clone)]
pub struct Prop {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: Rgba,
    pub volume: f32,
}

impl Default for Prop {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: Rgba::WHITE,
            volume: 1.0,
        }
    }
}

impl Prop {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}

/// Flat prop storage keyed by TargetId.
///
/// A ready-made Stage for hosts without their own scene store. It has no
/// parent hierarchy, so local- and world-space positions land in the same
/// field.
#[derive(Debug, Default)]
pub struct PropStage {
    props: HashMap<TargetId, Prop>,
}

impl PropStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prop. Replaces any existing prop under the same id.
    pub fn spawn(&mut self, id: TargetId, prop: Prop) {
        self.props.insert(id, prop);
    }

    /// Remove a prop by id. Returns the removed prop if found.
    pub fn despawn(&mut self, id: TargetId) -> Option<Prop> {
        self.props.remove(&id)
    }

    pub fn get(&self, id: TargetId) -> Option<&Prop> {
        self.props.get(&id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Prop> {
        self.props.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn clear(&mut self) {
        self.props.clear();
    }
}

impl Stage for PropStage {
    fn is_alive(&self, id: TargetId) -> bool {
        self.props.contains_key(&id)
    }

    fn write(&mut self, id: TargetId, value: Property) {
        let Some(prop) = self.props.get_mut(&id) else {
            return;
        };
        match value {
            Property::LocalPosition(p) | Property::WorldPosition(p) => prop.position = p,
            Property::Rotation(q) => prop.rotation = q,
            Property::EulerAngles(e) => {
                prop.rotation = Quat::from_euler(glam::EulerRot::XYZ, e.x, e.y, e.z)
            }
            Property::Scale(s) => prop.scale = s,
            Property::Alpha(a) => prop.color.a = a,
            Property::Color(c) => {
                // Alpha channel untouched so color and alpha tweens can
                // run on the same target simultaneously.
                let a = prop.color.a;
                prop.color = Rgba { a, ..c };
            }
            Property::Volume(v) => prop.volume = v,
        }
    }
}
