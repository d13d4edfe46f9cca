//! The black-box intersection capability
//!
//! The registry never performs ray-shape or volume-contact math itself; it
//! hands fully world-space shapes to an [`Intersector`] supplied by the
//! embedding engine and records whatever comes back. The scheduler measures
//! the wall-clock cost of each call for budget accounting.

use uuid::Uuid;

use crate::math::{Parabola, Ray};
use crate::pick::collision::CollisionRegion;
use crate::pick::filter::PickFilter;
use crate::pick::result::PickResult;
use crate::scene::environment::HandSide;
use crate::transform::Pose;

/// Per-call parameters shared by every intersection test.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionContext<'a> {
    /// Which scene-object categories are eligible targets.
    pub filter: PickFilter,
    /// Cutoff distance; 0 = unbounded.
    pub max_distance: f32,
    /// Exact geometry vs. bounding proxies.
    pub precision: bool,
    /// If non-empty, only these objects are eligible.
    pub include_items: &'a [Uuid],
    /// Objects excluded from the test.
    pub ignore_items: &'a [Uuid],
}

/// Scene intersection tests, implemented by the embedding engine.
pub trait Intersector: Send + Sync {
    /// Intersect a world-space ray against the scene.
    fn intersect_ray(&self, ray: &Ray, ctx: &IntersectionContext<'_>) -> PickResult;

    /// Intersect a world-space parabolic arc against the scene.
    fn intersect_parabola(&self, parabola: &Parabola, ctx: &IntersectionContext<'_>) -> PickResult;

    /// Find what a stylus tip at the given pose is touching.
    fn intersect_stylus(
        &self,
        tip: &Pose,
        side: HandSide,
        ctx: &IntersectionContext<'_>,
    ) -> PickResult;

    /// Find contacts between a world-space collision volume and the scene.
    fn intersect_volume(
        &self,
        region: &CollisionRegion,
        ctx: &IntersectionContext<'_>,
    ) -> PickResult;
}
