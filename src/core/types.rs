//! Core type aliases and re-exports

pub use glam::{Vec3, Mat4, Quat};

/// World up axis.
pub const UP: Vec3 = Vec3::Y;

/// World forward axis (right-handed, -Z forward).
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
