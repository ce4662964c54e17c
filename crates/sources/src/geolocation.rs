//! Where is the user right now?

use crate::error::Result;
use async_trait::async_trait;
use pod_model::GeoPoint;

/// Supplies the user's current position once per deck load.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// `Ok(None)` means geolocation is unavailable or was declined.
    async fn current_position(&self) -> Result<Option<GeoPoint>>;
}

/// A provider that always reports the same position (or none).
///
/// Used by the CLI, where the position comes from flags, and by tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<GeoPoint>);

impl FixedPosition {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self(Some(GeoPoint::new(lat, lng)))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Option<GeoPoint>> {
        Ok(self.0)
    }
}
