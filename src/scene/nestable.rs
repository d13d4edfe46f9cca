//! Spatially nestable world objects
//!
//! Everything a pick can be anchored to (avatars, entities, overlays) is
//! reached through this trait. The registry only ever holds weak references
//! to nestables: anchoring a pick to an object must not keep that object
//! alive, and resolution degrades to "unresolved" once the target is gone.

use serde::Serialize;
use uuid::Uuid;

use crate::transform::Pose;

/// Category of a nestable world object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NestableType {
    Avatar,
    Entity,
    Overlay,
    Other,
}

/// A world object with a pose and optional skeleton joints.
///
/// Joint index 0 addresses the object as a whole; skeleton-bearing
/// implementations map higher indices to their joint table.
pub trait Nestable: Send + Sync {
    /// Stable identifier of this object.
    fn id(&self) -> Uuid;

    /// Which category of object this is.
    fn nestable_type(&self) -> NestableType;

    /// Current world pose of the object as a whole.
    fn world_pose(&self) -> Pose;

    /// Current world pose of a joint, or None if the index is out of range.
    ///
    /// Index 0 is the object itself.
    fn joint_pose(&self, joint_index: i32) -> Option<Pose> {
        if joint_index == 0 {
            Some(self.world_pose())
        } else {
            None
        }
    }

    /// Look up a joint index by name. Jointless objects know no names.
    fn joint_index(&self, _name: &str) -> Option<i32> {
        None
    }
}
