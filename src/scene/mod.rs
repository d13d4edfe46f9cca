//! External collaborator interfaces: world objects, environment, intersection

pub mod nestable;
pub mod environment;
pub mod intersect;

#[cfg(test)]
pub(crate) mod mock;

pub use nestable::{Nestable, NestableType};
pub use environment::{HandSide, PickEnvironment};
pub use intersect::{IntersectionContext, Intersector};
