//! Ray pick shape parameters

use crate::core::types::Vec3;
use crate::math::Ray;
use crate::transform::Pose;

/// Local shape parameters of a ray pick.
///
/// When the pick is parented, `position` and `direction` are offsets in the
/// anchor's local frame; otherwise they are absolute world-space values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayShape {
    pub position: Vec3,
    pub direction: Vec3,
}

impl RayShape {
    /// Place the ray in world space given this frame's anchor pose.
    pub fn to_world(&self, parent: Option<&Pose>) -> Ray {
        match parent {
            Some(pose) => Ray::new(
                pose.transform_point(self.position),
                pose.transform_direction(self.direction),
            ),
            None => Ray::new(self.position, self.direction.normalize_or_zero()),
        }
    }
}
