//! REST-specific error types.

use crate::clients::{HttpError, NormalizedError};
use thiserror::Error;

/// Error type for [`RestClient`](crate::clients::RestClient) operations.
///
/// # Example
///
/// ```rust
/// use zoho_inventory::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "/".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// assert_eq!(error.normalize().code, 400);
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The path that was provided.
        path: String,
    },

    /// An error from the request core.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl RestError {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::InvalidPath { .. } => 400,
            Self::Http(e) => e.code(),
        }
    }

    /// Collapses this error into a message and a numeric code.
    #[must_use]
    pub fn normalize(&self) -> NormalizedError {
        match self {
            Self::Http(e) => e.normalize(),
            other => NormalizedError::new(other.to_string(), other.code()),
        }
    }
}
