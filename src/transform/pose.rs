//! World-space pose produced by transform node resolution

use crate::core::types::{Mat4, Quat, Vec3};

/// Position, orientation, and uniform scale of an anchor object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: 1.0,
    };

    /// Create a pose from position and orientation with unit scale.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            scale: 1.0,
        }
    }

    /// Transform a local-space point into world space (scale-aware).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.orientation * (point * self.scale)
    }

    /// Transform a local-space direction into world space (unit length).
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        (self.orientation * direction).normalize_or_zero()
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation,
            self.position,
        )
    }
}
