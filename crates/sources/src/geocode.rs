//! Reverse geocoding for card locations.
//!
//! Cards show the town a pod is in. The lookup goes to a Nominatim
//! instance (`/reverse?format=jsonv2`) and picks the most specific
//! settlement name available.

use crate::error::{Result, SourceError};
use pod_model::Location;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying user agent
const USER_AGENT: &str = concat!("podswipe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
}

impl Address {
    fn settlement(self) -> Option<String> {
        self.city.or(self.town).or(self.village).or(self.hamlet)
    }
}

/// Looks up the settlement name for a pod location.
#[derive(Clone, Debug)]
pub struct ReverseGeocoder {
    client: Client,
    base_url: String,
}

impl ReverseGeocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// City, town, village or hamlet for `location`, in that preference.
    ///
    /// Locations with non-numeric coordinates are logged and return
    /// `Ok(None)` without a request being made.
    pub async fn settlement_for(&self, location: &Location) -> Result<Option<String>> {
        let point = match location.geo_point() {
            Ok(point) => point,
            Err(e) => {
                warn!("Not geocoding invalid location {:?}: {}", location, e);
                return Ok(None);
            }
        };

        let url = format!("{}/reverse", self.base_url);
        debug!("Reverse geocoding {},{}", point.lat, point.lng);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                endpoint: "reverse".to_string(),
                status: status.as_u16(),
            });
        }

        let body: ReverseResponse = response.json().await?;
        Ok(body.address.and_then(Address::settlement))
    }
}
