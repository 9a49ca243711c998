//! Recoverable error kinds.
//!
//! Only expected absence is reported through these types. Broken
//! preconditions (indexing past the end through `Index`, refcount
//! overflow, reentry into a table mid-probe) panic or abort instead.

use thiserror::Error;

/// Expected-absence failures returned by container operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// Index at or past the current length.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    /// Peek or pop on a container with no elements.
    #[error("collection is empty")]
    EmptyCollection,
    /// No stored element or key matches the probe.
    #[error("no matching element")]
    NotFound,
}

/// Rejected `LoadPolicy` parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum bucket count must be non-zero")]
    ZeroMinBuckets,
    #[error("fill bounds must satisfy 0 < min ({min}) < max ({max})")]
    FillBounds { min: u32, max: u32 },
    #[error("growth factor {0}% must exceed 100%")]
    Growth(u32),
    #[error("shrinking at the min fill would overshoot the max fill")]
    Oscillation,
}

pub type Result<T, E = CollectionError> = core::result::Result<T, E>;
