//! Error types for the pod-model crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - `#[from]` conversions so `?` works on serde_json errors
//! - Error messages carrying the position of the bad record

use thiserror::Error;

/// Errors that can occur while decoding pod records from the server.
#[derive(Error, Debug)]
pub enum PodModelError {
    /// The response body was not the expected JSON array
    #[error("Malformed pod list: {0}")]
    MalformedList(#[from] serde_json::Error),

    /// One element of the list could not be decoded into a pod
    ///
    /// The index lets the caller log which record was skipped
    #[error("Malformed pod record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// A pod document carried neither a string `_id` nor a string `id`
    #[error("Pod record has no _id or id")]
    MissingId,

    /// A coordinate was missing or not numeric
    #[error("Invalid coordinate for {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PodModelError>;
