//! Parabola segment type and operations
//!
//! A parabola is the trajectory of a projectile: origin, initial velocity,
//! and constant acceleration. Pick evaluation intersects this curve against
//! the scene the same way a ray is intersected.

use crate::core::types::Vec3;

/// A parabolic arc defined by a projectile trajectory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parabola {
    pub origin: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

impl Parabola {
    /// Create a new parabola from origin, initial velocity, and acceleration
    pub fn new(origin: Vec3, velocity: Vec3, acceleration: Vec3) -> Self {
        Self {
            origin,
            velocity,
            acceleration,
        }
    }

    /// Get point along the trajectory at time t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.velocity * t + 0.5 * self.acceleration * t * t
    }
}
