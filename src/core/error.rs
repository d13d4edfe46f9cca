//! Error types for the pick registry

use thiserror::Error;

/// Main error type for the crate
///
/// Registry operations on unknown pick ids are silent no-ops rather than
/// errors, so the failures here are limited to construction-time parsing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pick properties: {0}")]
    Properties(#[from] serde_json::Error),

    #[error("invalid shape: {0}")]
    Shape(String),
}
