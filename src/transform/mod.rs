//! Anchor poses and the transform node hierarchy

pub mod pose;
pub mod node;

pub use pose::Pose;
pub use node::{PickPoseSource, TransformNode};
