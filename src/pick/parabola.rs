//! Parabola pick shape parameters

use crate::core::types::{Quat, Vec3};
use crate::math::Parabola;
use crate::transform::Pose;

/// Local shape parameters of a parabola pick.
///
/// The arc is a projectile trajectory: launch point, launch direction and
/// speed, and a constant acceleration. The rotate/scale flags control how
/// the acceleration axis and magnitudes follow the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParabolaShape {
    pub position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub acceleration_axis: Vec3,
    pub rotate_acceleration_with_avatar: bool,
    pub rotate_acceleration_with_parent: bool,
    pub scale_with_parent: bool,
}

impl ParabolaShape {
    /// Place the arc in world space given this frame's anchor pose and the
    /// local avatar's orientation.
    pub fn to_world(&self, parent: Option<&Pose>, avatar_orientation: Option<Quat>) -> Parabola {
        let (origin, direction, scale) = match parent {
            Some(pose) => (
                pose.transform_point(self.position),
                pose.transform_direction(self.direction),
                if self.scale_with_parent { pose.scale } else { 1.0 },
            ),
            None => (self.position, self.direction.normalize_or_zero(), 1.0),
        };

        let acceleration = if self.rotate_acceleration_with_parent {
            match parent {
                Some(pose) => pose.orientation * self.acceleration_axis,
                None => self.acceleration_axis,
            }
        } else if self.rotate_acceleration_with_avatar {
            match avatar_orientation {
                Some(orientation) => orientation * self.acceleration_axis,
                None => self.acceleration_axis,
            }
        } else {
            self.acceleration_axis
        };

        Parabola::new(origin, direction * self.speed * scale, acceleration * scale)
    }
}
