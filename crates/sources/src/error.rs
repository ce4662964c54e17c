//! Error types for talking to the pod server and geocoder.

use pod_model::PodModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// The body could not be decoded into pods or tags
    #[error("Failed to decode response: {0}")]
    Decode(#[from] PodModelError),

    /// The body was not the JSON shape we expected
    #[error("Unexpected JSON from {endpoint}: {source}")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Geolocation could not be determined
    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
