//! Error types for pipeline construction.

use thiserror::Error;

/// Errors rejected when building a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Probability of false alarm must lie in (0, 1), got {0}")]
    InvalidPfa(f64),

    #[error("Input image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
