//! Collision volume pick shape parameters

use serde::Deserialize;

use crate::core::types::{Quat, Vec3};
use crate::transform::Pose;

/// Collision group a volume pick collides as when none is specified
/// (the engine's default physics layer).
pub const DEFAULT_COLLISION_GROUP: u8 = 8;

/// Geometric primitive used by a collision volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Box,
    Sphere,
    CapsuleX,
    CapsuleY,
    CapsuleZ,
    CylinderX,
    CylinderY,
    CylinderZ,
}

/// A physical volume: primitive type plus world-space dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub shape_type: ShapeType,
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec3,
}

fn default_dimensions() -> Vec3 {
    Vec3::ONE
}

/// The region a collision pick tests for contacts.
///
/// Dimensions and threshold are world-space at rest and scale with the
/// parent when the pick is anchored.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionRegion {
    pub shape: Shape,
    pub position: Vec3,
    pub orientation: Quat,
    /// Approximate minimum penetration depth for a contact to count.
    pub threshold: f32,
    pub collision_group: u8,
}

impl CollisionRegion {
    /// Place the region in world space given this frame's anchor pose.
    pub fn to_world(&self, parent: Option<&Pose>) -> CollisionRegion {
        match parent {
            Some(pose) => CollisionRegion {
                shape: Shape {
                    shape_type: self.shape.shape_type,
                    dimensions: self.shape.dimensions * pose.scale,
                },
                position: pose.transform_point(self.position),
                orientation: pose.orientation * self.orientation,
                threshold: self.threshold * pose.scale,
                collision_group: self.collision_group,
            },
            None => self.clone(),
        }
    }
}
