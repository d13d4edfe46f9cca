//! Pick queries: ids, kinds, shapes, properties, and results

pub mod filter;
pub mod result;
pub mod props;
pub mod ray;
pub mod parabola;
pub mod stylus;
pub mod collision;

pub use filter::PickFilter;
pub use result::{Contact, PickResult};
pub use props::{
    CollisionPickProperties, ParabolaPickProperties, ParentId, RayPickProperties,
    StylusPickProperties, classify_joint_state,
};
pub use ray::RayShape;
pub use parabola::ParabolaShape;
pub use stylus::StylusShape;
pub use collision::{CollisionRegion, DEFAULT_COLLISION_GROUP, Shape, ShapeType};

use uuid::Uuid;

use crate::transform::TransformNode;

/// Unique identifier for a live pick query.
///
/// Ids are allocated from a monotonic counter and never reused while the
/// registry lives; [`PickId::INVALID`] is the "no pick" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickId(pub u32);

impl PickId {
    /// The "invalid / no pick" sentinel.
    pub const INVALID: PickId = PickId(0);

    /// Whether this id could name a live pick.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// The four pick kinds.
///
/// Numeric values match the host-facing script API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickType {
    Ray = 0,
    Stylus = 1,
    Parabola = 2,
    Collision = 3,
}

impl PickType {
    /// Map a raw script-facing kind number, or `None` if unrecognized.
    pub fn from_u32(raw: u32) -> Option<PickType> {
        match raw {
            0 => Some(PickType::Ray),
            1 => Some(PickType::Stylus),
            2 => Some(PickType::Parabola),
            3 => Some(PickType::Collision),
            _ => None,
        }
    }
}

/// Classification of a pick's anchor, fixed at construction.
///
/// Hand- and mouse-anchored picks get dedicated fast paths elsewhere in
/// the engine, so the registry exposes this as a cheap lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JointState {
    #[default]
    None,
    LeftHand,
    RightHand,
    Mouse,
}

/// State shared by every pick kind.
pub struct PickCommon {
    /// Disabled picks are skipped entirely by the scheduler.
    pub enabled: bool,
    /// Scene-object categories eligible as targets.
    pub filter: PickFilter,
    /// Cutoff distance; 0 = unbounded. Negative values are accepted as-is
    /// (caller error, documented permissiveness).
    pub max_distance: f32,
    /// The anchor this pick's shape is relative to. Exclusively owned;
    /// dropped with the pick.
    pub parent: Option<TransformNode>,
    /// Anchor classification, fixed at construction.
    pub joint_state: JointState,
    /// Exact geometry vs. bounding proxies; delegated to the intersector.
    pub precision: bool,
    /// If non-empty, only these objects are eligible targets.
    pub include_items: Vec<Uuid>,
    /// Objects excluded from intersection.
    pub ignore_items: Vec<Uuid>,
}

impl PickCommon {
    /// Common state from the shared property fields.
    pub fn new(enabled: bool, filter: u32, max_distance: f32) -> Self {
        Self {
            enabled,
            filter: PickFilter::from_raw(filter),
            max_distance,
            parent: None,
            joint_state: JointState::None,
            precision: true,
            include_items: Vec::new(),
            ignore_items: Vec::new(),
        }
    }
}

/// Shape parameters, one variant per pick kind.
pub enum PickShape {
    Ray(RayShape),
    Parabola(ParabolaShape),
    Stylus(StylusShape),
    Collision(CollisionRegion),
}

/// A live pick query: shared state plus kind-specific shape.
pub struct Pick {
    pub common: PickCommon,
    pub shape: PickShape,
}

impl Pick {
    /// Which kind of pick this is.
    pub fn pick_type(&self) -> PickType {
        match self.shape {
            PickShape::Ray(_) => PickType::Ray,
            PickShape::Parabola(_) => PickType::Parabola,
            PickShape::Stylus(_) => PickType::Stylus,
            PickShape::Collision(_) => PickType::Collision,
        }
    }
}
