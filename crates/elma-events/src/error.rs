//! Event error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EventError>;

/// Failures of the structured value representation.
///
/// The event operations themselves never fail; these only come out of the
/// serde bridges that move typed Rust data in and out of an [`crate::Event`].
#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to encode event value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode event value: {0}")]
    Decode(#[source] serde_json::Error),
}
