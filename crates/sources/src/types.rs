//! Shared types for the candidate side of the deck.

use pod_model::{GeoPoint, Tag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Everything the filters need to know about the person swiping.
///
/// Built once per deck load; see `user_context::build_user_context`.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Interest tags the user picked on their profile
    pub interests: HashSet<Tag>,

    /// Current position, if geolocation was available
    pub position: Option<GeoPoint>,

    /// Maximum distance in meters from `position`; `None` disables the radius
    pub max_distance_m: Option<f64>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Tag>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_max_distance(mut self, meters: f64) -> Self {
        self.max_distance_m = Some(meters);
        self
    }

    /// The radius filter is only meaningful with both a position and a limit.
    pub fn search_radius(&self) -> Option<(GeoPoint, f64)> {
        Some((self.position?, self.max_distance_m?))
    }
}

/// Someone who joined a pod, as listed by `/pod/{id}/attenders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attender {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
