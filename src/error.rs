//! Error taxonomy for the IWLS client.
//!
//! Four categories cover every failure mode in the crate: bad input caught at
//! construction time, transport-level failures, resolver misses, and API
//! responses that do not have the expected shape. The crate performs no
//! retries and no silent recovery; every error aborts the in-flight
//! `resolve()`/`refresh()` call and leaves previously cached state untouched.

use thiserror::Error;

/// Main error type for IWLS operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed selector or configuration, detected before any network access
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// HTTP request failed (network, TLS, or protocol error)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Station resolution found zero or ambiguous matches
    #[error("not found: {0}")]
    NotFound(String),

    /// API response missing expected fields or event count
    #[error("unexpected response shape: {0}")]
    DataShape(String),
}

/// Type alias for Results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
