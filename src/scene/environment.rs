//! The injected engine environment picks resolve against
//!
//! Bundles the external capabilities the registry needs every frame: spatial
//! parent lookup, the local avatar and its skeleton, and the mouse and hand
//! controller poses. The embedding host implements this once and passes it
//! to [`crate::manager::PickManager::new`].

use std::sync::{Arc, Weak};

use uuid::Uuid;

use crate::scene::nestable::Nestable;
use crate::transform::Pose;

/// Reserved pseudo-joint index for the left hand controller.
pub const CONTROLLER_LEFT_HAND_INDEX: i32 = -2;
/// Reserved pseudo-joint index for the right hand controller.
pub const CONTROLLER_RIGHT_HAND_INDEX: i32 = -3;
/// Camera-relative variant of the left hand controller index.
pub const CAMERA_RELATIVE_CONTROLLER_LEFT_HAND_INDEX: i32 = -4;
/// Camera-relative variant of the right hand controller index.
pub const CAMERA_RELATIVE_CONTROLLER_RIGHT_HAND_INDEX: i32 = -5;

/// Reserved joint name for the left hand controller.
pub const CONTROLLER_LEFT_HAND_NAME: &str = "_CONTROLLER_LEFTHAND";
/// Reserved joint name for the right hand controller.
pub const CONTROLLER_RIGHT_HAND_NAME: &str = "_CONTROLLER_RIGHTHAND";
/// Camera-relative variant of the left hand controller joint name.
pub const CAMERA_RELATIVE_CONTROLLER_LEFT_HAND_NAME: &str = "_CAMERA_RELATIVE_CONTROLLER_LEFTHAND";
/// Camera-relative variant of the right hand controller joint name.
pub const CAMERA_RELATIVE_CONTROLLER_RIGHT_HAND_NAME: &str =
    "_CAMERA_RELATIVE_CONTROLLER_RIGHTHAND";

/// Which hand a stylus or controller pose belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
    Invalid,
}

impl HandSide {
    /// Map the loose `hand` property value: 0 = left, 1 = right.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => HandSide::Left,
            1 => HandSide::Right,
            _ => HandSide::Invalid,
        }
    }
}

/// External engine capabilities the pick registry depends on.
///
/// Every accessor is allowed to fail: a missing avatar, an unplugged
/// controller, or a torn-down object all surface as `None`, and the
/// affected pick simply keeps its previous result for the frame.
pub trait PickEnvironment: Send + Sync {
    /// Look up a nestable world object by id. Returns a weak reference;
    /// the registry never keeps the target alive.
    fn find_nestable(&self, id: Uuid) -> Option<Weak<dyn Nestable>>;

    /// The local user's avatar, if present.
    fn local_avatar(&self) -> Option<Arc<dyn Nestable>>;

    /// Session id of the local avatar, used to detect self-parenting.
    fn local_avatar_id(&self) -> Option<Uuid> {
        self.local_avatar().map(|a| a.id())
    }

    /// Current head pose of the local avatar.
    fn head_pose(&self) -> Option<Pose>;

    /// Current world pose projected under the mouse cursor.
    fn mouse_pose(&self) -> Option<Pose>;

    /// Current pose of a hand controller tip.
    fn hand_pose(&self, side: HandSide) -> Option<Pose>;
}
