//! Structured pick properties and their defaults
//!
//! The loosely-typed configuration bag of the script API becomes one struct
//! per pick kind, every field optional with a documented default. Parsing
//! and validation happen exactly once, at pick construction. Legacy aliases
//! (`posOffset`, `dirOffset`, `scaleWithAvatar`) remain separate fields with
//! explicit precedence so older property bags keep working.

use serde::Deserialize;
use uuid::Uuid;

use crate::core::types::{FORWARD, Quat, UP, Vec3};
use crate::pick::JointState;
use crate::pick::collision::{CollisionRegion, DEFAULT_COLLISION_GROUP, Shape};
use crate::pick::parabola::ParabolaShape;
use crate::pick::ray::RayShape;
use crate::pick::stylus::StylusShape;
use crate::scene::environment::{
    self, HandSide, PickEnvironment,
};

/// A pick's parent: either a nestable world object or another pick.
///
/// Property bags carry this loosely (a UUID string or a bare number); the
/// untagged union resolves which one at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParentId {
    Pick(u32),
    Object(Uuid),
}

/// Properties for creating a ray pick.
///
/// Defaults: disabled, filter 0 (match nothing), maxDistance 0 (unbounded),
/// position zero. Direction keeps the historical split: up when a `joint`
/// field is present, down otherwise.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RayPickProperties {
    pub enabled: bool,
    pub filter: u32,
    pub max_distance: f32,
    #[serde(rename = "parentID")]
    pub parent_id: Option<ParentId>,
    pub parent_joint_index: Option<i32>,
    pub joint: Option<String>,
    pub position: Option<Vec3>,
    /// Legacy joint-relative alias for `position`.
    pub pos_offset: Option<Vec3>,
    /// Converted to a direction via the fixed +Y reference axis.
    pub orientation: Option<Quat>,
    pub direction: Option<Vec3>,
    /// Legacy joint-relative alias for `direction`.
    pub dir_offset: Option<Vec3>,
}

impl RayPickProperties {
    /// Ray origin: `position` first, then the legacy offset field, then zero.
    pub fn origin(&self) -> Vec3 {
        self.position.or(self.pos_offset).unwrap_or(Vec3::ZERO)
    }

    /// Ray direction with precedence orientation > direction > dirOffset,
    /// defaulting up for joint-parented rays and down for absolute ones.
    pub fn resolved_direction(&self) -> Vec3 {
        if let Some(orientation) = self.orientation {
            orientation * UP
        } else if let Some(direction) = self.direction {
            direction
        } else if let Some(offset) = self.dir_offset {
            offset
        } else if self.joint.is_some() {
            UP
        } else {
            -UP
        }
    }

    /// Build the ray shape these properties describe.
    pub fn shape(&self) -> RayShape {
        RayShape {
            position: self.origin(),
            direction: self.resolved_direction(),
        }
    }
}

/// Properties for creating a parabola pick.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParabolaPickProperties {
    pub enabled: bool,
    pub filter: u32,
    pub max_distance: f32,
    #[serde(rename = "parentID")]
    pub parent_id: Option<ParentId>,
    pub parent_joint_index: Option<i32>,
    pub joint: Option<String>,
    pub position: Option<Vec3>,
    pub pos_offset: Option<Vec3>,
    pub orientation: Option<Quat>,
    pub direction: Option<Vec3>,
    pub dir_offset: Option<Vec3>,
    /// Initial projectile speed.
    pub speed: f32,
    /// Projectile acceleration, magnitude and direction.
    pub acceleration_axis: Vec3,
    pub rotate_acceleration_with_avatar: bool,
    pub rotate_acceleration_with_parent: bool,
    pub scale_with_parent: Option<bool>,
    /// Deprecated alias for `scaleWithParent`, honored when the primary
    /// field is absent.
    pub scale_with_avatar: Option<bool>,
}

impl Default for ParabolaPickProperties {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: 0,
            max_distance: 0.0,
            parent_id: None,
            parent_joint_index: None,
            joint: None,
            position: None,
            pos_offset: None,
            orientation: None,
            direction: None,
            dir_offset: None,
            speed: 1.0,
            acceleration_axis: -UP,
            rotate_acceleration_with_avatar: true,
            rotate_acceleration_with_parent: false,
            scale_with_parent: None,
            scale_with_avatar: None,
        }
    }
}

impl ParabolaPickProperties {
    /// Arc origin: `position` first, then the legacy offset field, then zero.
    pub fn origin(&self) -> Vec3 {
        self.position.or(self.pos_offset).unwrap_or(Vec3::ZERO)
    }

    /// Arc launch direction, defaulting backward (negated forward axis).
    pub fn resolved_direction(&self) -> Vec3 {
        if let Some(orientation) = self.orientation {
            orientation * UP
        } else if let Some(direction) = self.direction {
            direction
        } else if let Some(offset) = self.dir_offset {
            offset
        } else {
            -FORWARD
        }
    }

    /// Effective scale-with-parent flag, honoring the deprecated alias.
    pub fn scale_with_parent(&self) -> bool {
        self.scale_with_parent.or(self.scale_with_avatar).unwrap_or(false)
    }

    /// Build the parabola shape these properties describe.
    pub fn shape(&self) -> ParabolaShape {
        ParabolaShape {
            position: self.origin(),
            direction: self.resolved_direction(),
            speed: self.speed,
            acceleration_axis: self.acceleration_axis,
            rotate_acceleration_with_avatar: self.rotate_acceleration_with_avatar,
            rotate_acceleration_with_parent: self.rotate_acceleration_with_parent,
            scale_with_parent: self.scale_with_parent(),
        }
    }
}

/// Properties for creating a stylus pick.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylusPickProperties {
    pub enabled: bool,
    pub filter: u32,
    pub max_distance: f32,
    /// 0 = left, 1 = right, anything else is invalid.
    pub hand: Option<i64>,
}

impl StylusPickProperties {
    /// Which hand this stylus rides.
    pub fn side(&self) -> HandSide {
        self.hand.map(HandSide::from_index).unwrap_or(HandSide::Invalid)
    }

    /// Build the stylus shape these properties describe.
    pub fn shape(&self) -> StylusShape {
        StylusShape { side: self.side() }
    }
}

/// Properties for creating a collision volume pick.
///
/// `shape` is required; everything else defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollisionPickProperties {
    pub enabled: bool,
    pub filter: u32,
    pub max_distance: f32,
    #[serde(rename = "parentID")]
    pub parent_id: Option<ParentId>,
    pub parent_joint_index: Option<i32>,
    pub joint: Option<String>,
    pub shape: Option<Shape>,
    pub position: Vec3,
    pub orientation: Quat,
    pub threshold: f32,
    pub collision_group: u8,
}

impl Default for CollisionPickProperties {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: 0,
            max_distance: 0.0,
            parent_id: None,
            parent_joint_index: None,
            joint: None,
            shape: None,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            threshold: 0.0,
            collision_group: DEFAULT_COLLISION_GROUP,
        }
    }
}

impl CollisionPickProperties {
    /// Build the collision region, or `None` when the required shape is
    /// missing.
    pub fn region(&self) -> Option<CollisionRegion> {
        Some(CollisionRegion {
            shape: self.shape?,
            position: self.position,
            orientation: self.orientation,
            threshold: self.threshold,
            collision_group: self.collision_group,
        })
    }
}

/// Classify a pick's anchor as a hand, the mouse, or neither.
///
/// Hand-anchored picks get specialized fast paths elsewhere in the engine;
/// the classification is computed once at construction and is a pure
/// function of the parent description. A parent object id only counts when
/// it names the local user's own avatar and the joint index is one of the
/// reserved controller indices.
pub fn classify_joint_state(
    parent_id: Option<&ParentId>,
    parent_joint_index: Option<i32>,
    joint: Option<&str>,
    env: &dyn PickEnvironment,
) -> JointState {
    if let Some(parent) = parent_id {
        if let (ParentId::Object(id), Some(index)) = (parent, parent_joint_index) {
            if env.local_avatar_id() == Some(*id) {
                return match index {
                    environment::CONTROLLER_LEFT_HAND_INDEX
                    | environment::CAMERA_RELATIVE_CONTROLLER_LEFT_HAND_INDEX => {
                        JointState::LeftHand
                    }
                    environment::CONTROLLER_RIGHT_HAND_INDEX
                    | environment::CAMERA_RELATIVE_CONTROLLER_RIGHT_HAND_INDEX => {
                        JointState::RightHand
                    }
                    _ => JointState::None,
                };
            }
        }
        JointState::None
    } else if let Some(joint) = joint {
        match joint {
            "Mouse" => JointState::Mouse,
            environment::CONTROLLER_LEFT_HAND_NAME
            | environment::CAMERA_RELATIVE_CONTROLLER_LEFT_HAND_NAME => JointState::LeftHand,
            environment::CONTROLLER_RIGHT_HAND_NAME
            | environment::CAMERA_RELATIVE_CONTROLLER_RIGHT_HAND_NAME => JointState::RightHand,
            _ => JointState::None,
        }
    } else {
        JointState::None
    }
}
