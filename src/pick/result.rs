//! Pick evaluation results

use serde::Serialize;
use uuid::Uuid;

use crate::core::types::Vec3;
use crate::scene::nestable::NestableType;

/// A single contact point reported by a collision volume test.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contact {
    pub point: Vec3,
    pub normal: Vec3,
    pub depth: f32,
    pub object_id: Option<Uuid>,
}

/// The last computed outcome of a pick evaluation.
///
/// Serializable so embedding hosts can hand it to scripts as a loose map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PickResult {
    /// Whether anything was hit this evaluation.
    pub intersects: bool,
    /// The nearest hit object, if any.
    pub object_id: Option<Uuid>,
    /// Category of the hit object.
    pub object_type: Option<NestableType>,
    /// Distance (or arc length) to the hit.
    pub distance: f32,
    /// World-space hit point.
    pub intersection: Vec3,
    /// World-space surface normal at the hit point.
    pub surface_normal: Vec3,
    /// Contact points, populated by collision volume picks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
}

impl PickResult {
    /// The empty "no hit" result.
    pub fn none() -> Self {
        Self {
            intersects: false,
            object_id: None,
            object_type: None,
            distance: 0.0,
            intersection: Vec3::ZERO,
            surface_normal: Vec3::ZERO,
            contacts: Vec::new(),
        }
    }
}

impl Default for PickResult {
    fn default() -> Self {
        Self::none()
    }
}
