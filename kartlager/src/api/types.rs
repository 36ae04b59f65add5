//! API types and errors shared by the client modules.

use crate::coord::CoordError;
use std::fmt;

/// Errors that can occur when talking to the geodata APIs.
///
/// Every error is surfaced to the caller as-is; nothing is retried
/// internally. The only deliberate mapping is 404 → empty result on
/// search-style queries, which the individual clients perform themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Out-of-range or malformed coordinates or bounding boxes
    Validation(String),
    /// Missing or unusable local configuration (e.g. credentials)
    Configuration(String),
    /// The credential exchange itself was malformed or rejected
    Authentication(String),
    /// Non-success HTTP status from a token or data endpoint
    Upstream { status: u16, message: String },
    /// Transport-level HTTP failure (connect, timeout, body read)
    Http(String),
    /// Response body could not be decoded
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            ApiError::Upstream { status, message } => {
                write!(f, "Upstream API error: HTTP {}: {}", status, message)
            }
            ApiError::Http(msg) => write!(f, "HTTP error: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoordError> for ApiError {
    fn from(e: CoordError) -> Self {
        ApiError::Validation(e.to_string())
    }
}
