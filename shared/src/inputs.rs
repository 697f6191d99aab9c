use glam::{UVec2, Vec3};

use crate::PhysicalParams;

/// Orthonormal viewing basis positioned in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Everything a pixel evaluation is allowed to see for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub resolution: UVec2,
    pub camera: Camera,
    pub time: f32,
    pub params: PhysicalParams,
}

impl Camera {
    /// Basis looking from `position` towards `target`, rolled so that `up` stays
    /// in the plane spanned by `forward` and world `Y`.
    ///
    /// `target - position` must not be parallel to `Y`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
        }
    }
}
