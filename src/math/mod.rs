//! Mathematical utilities and data structures

pub mod ray;
pub mod parabola;

pub use ray::Ray;
pub use parabola::Parabola;
