//! The pick registry and its per-frame scheduler

pub mod budget;
pub mod registry;

pub use budget::TimeBudget;
pub use registry::PickManager;
