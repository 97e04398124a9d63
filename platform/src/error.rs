//! Error types for platform API operations.

use thiserror::Error;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur when talking to the backing platform.
///
/// HTTP status codes are folded into this taxonomy in exactly one place
/// (the REST backend), so callers never match on raw status codes.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A required configuration value was not set.
    #[error("Missing configuration value {0}")]
    MissingConfig(&'static str),

    /// HTTP request failed before a response was received.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed into the expected model.
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - missing or invalid credentials for this call.
    #[error("Unauthorized - missing or invalid credentials")]
    Unauthorized,

    /// Rate limited - too many requests.
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested resource does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Error message from the platform
        message: String,
    },

    /// Resource with the same identifier already exists.
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message from the platform
        message: String,
    },

    /// Platform returned an error not covered by a dedicated variant.
    #[error("Platform error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the platform
        message: String,
    },

    /// Internal error in a client-side component (lock poisoning, etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Returns `true` if retrying the same call may succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gatherly_platform::PlatformError;
    /// assert!(PlatformError::RateLimited.is_retryable());
    /// assert!(!PlatformError::Unauthorized.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::RateLimited)
    }

    /// Returns `true` if the caller's identity or key was rejected.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
