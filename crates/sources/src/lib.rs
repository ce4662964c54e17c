//! # Sources Crate
//!
//! This crate implements the collaborators that feed the swipe deck.
//!
//! ## Components
//!
//! ### Pod server client
//! `HttpPodClient` implements `PodSource` over the pod server's JSON routes:
//! interests, candidate pods, attenders, and the decision endpoints.
//!
//! ### Geolocation
//! `GeolocationProvider` supplies the user's position once per deck load.
//! `FixedPosition` is the implementation used by the CLI and tests.
//!
//! ### Reverse geocoding
//! `ReverseGeocoder` turns a pod location into a town name for display.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{user_context::build_user_context, FixedPosition, HttpPodClient, PodSource};
//!
//! let client = HttpPodClient::new("http://localhost:3000")?;
//! let context = build_user_context(&client, &FixedPosition::at(44.97, -93.26), Some(5000.0)).await?;
//! let pods = client.get_pods().await?;
//! ```

// Public modules
pub mod client;
pub mod error;
pub mod geocode;
pub mod geolocation;
pub mod types;
pub mod user_context;

// Re-export commonly used types
pub use client::{HttpPodClient, PodSource};
pub use error::{Result, SourceError};
pub use geocode::{ReverseGeocoder, DEFAULT_GEOCODER_URL};
pub use geolocation::{FixedPosition, GeolocationProvider};
pub use types::{Attender, UserContext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_slash() {
        let client = HttpPodClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_fixed_position() {
        let provider = FixedPosition::at(10.0, 20.0);
        let position = provider.current_position().await.unwrap();
        assert_eq!(position, Some(pod_model::GeoPoint::new(10.0, 20.0)));

        let none = FixedPosition::unavailable().current_position().await.unwrap();
        assert!(none.is_none());
    }
}
