//! Raypick - a spatial pick query registry and time-budgeted scheduler
//!
//! Persistent pick queries (ray, parabola, stylus, collision volume) are
//! registered once and re-evaluated every frame against the scene, each
//! optionally anchored to a moving object: an avatar joint, a nestable
//! entity or overlay, the mouse cursor, or another pick's result. The
//! [`manager::PickManager`] drives the per-frame pass under a configurable
//! microsecond budget, rotating through the live set so no pick starves.

pub mod core;
pub mod math;
pub mod scene;
pub mod transform;
pub mod pick;
pub mod manager;
