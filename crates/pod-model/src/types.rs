//! Core domain types for pods.
//!
//! This module defines the data structures shared by every crate in the
//! workspace. Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (PodId, Tag)
//! - `#[serde(untagged)]` enums for fields the server sends in two shapes
//! - `#[serde(flatten)]` to keep unknown fields when a pod is posted back

use crate::error::{PodModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a pod, as assigned by the pod server
pub type PodId = String;

/// Free-text label attached to pods and to user interests
pub type Tag = String;

// =============================================================================
// Location Types
// =============================================================================

/// A single latitude or longitude as it arrives over the wire.
///
/// Hosts create pods from a form, so coordinates are sometimes stored as
/// strings ("44.97") and sometimes as numbers (44.97). Any other JSON value
/// is kept as `Other` so the record still decodes and can be posted back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Coordinate {
    /// Interpret the coordinate as a finite number.
    pub fn value(&self, field: &'static str) -> Result<f64> {
        let parsed = match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse::<f64>().ok(),
            Coordinate::Other(_) => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(PodModelError::InvalidCoordinate {
                field,
                value: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Number(n) => write!(f, "{}", n),
            Coordinate::Text(s) => write!(f, "{:?}", s),
            Coordinate::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

/// Raw location of a pod. Either coordinate may be missing or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<Coordinate>,
}

impl Location {
    pub fn new(lat: impl Into<Coordinate>, lng: impl Into<Coordinate>) -> Self {
        Self {
            lat: Some(lat.into()),
            lng: Some(lng.into()),
        }
    }

    /// Validate both coordinates and produce a usable point.
    pub fn geo_point(&self) -> Result<GeoPoint> {
        Ok(GeoPoint {
            lat: coordinate_value(self.lat.as_ref(), "lat")?,
            lng: coordinate_value(self.lng.as_ref(), "lng")?,
        })
    }
}

fn coordinate_value(coordinate: Option<&Coordinate>, field: &'static str) -> Result<f64> {
    match coordinate {
        Some(c) => c.value(field),
        None => Err(PodModelError::InvalidCoordinate {
            field,
            value: "missing".to_string(),
        }),
    }
}

/// A validated position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// =============================================================================
// Pod
// =============================================================================

/// A discoverable event ("pod") shown as one card in the swipe deck.
///
/// Pods are immutable once fetched. Fields the deck does not interpret
/// (attendee lists, host ids, ...) are kept in `extra` so the decision sink
/// receives the record exactly as the server sent it.
///
/// Decoding goes through a private wire record: `_id` wins over `id`, and a
/// `location` that is not an object is kept in `extra` instead of failing
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PodRecord")]
pub struct Pod {
    #[serde(rename = "_id")]
    pub id: PodId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub event_description: String,
    /// Date of the event, usually `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_date: Option<String>,
    /// Start time as `HH:MM` (24-hour)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub upvotes: Vec<Value>,
    #[serde(default)]
    pub downvotes: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of a pod document before the id and location are resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<PodId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    event_description: String,
    #[serde(default)]
    formatted_date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    upvotes: Vec<Value>,
    #[serde(default)]
    downvotes: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<PodRecord> for Pod {
    type Error = PodModelError;

    fn try_from(record: PodRecord) -> Result<Self> {
        let mut extra = record.extra;

        // Documents with virtuals carry both `_id` and `id`; the latter stays in `extra`
        let id = match record.mongo_id {
            Some(id) => id,
            None => match extra.remove("id") {
                Some(Value::String(id)) => id,
                _ => return Err(PodModelError::MissingId),
            },
        };

        let location = match record.location {
            None | Some(Value::Null) => None,
            Some(raw) => match serde_json::from_value::<Location>(raw.clone()) {
                Ok(location) => Some(location),
                Err(e) => {
                    warn!("Pod {} has an unreadable location: {}", id, e);
                    extra.insert("location".to_string(), raw);
                    None
                }
            },
        };

        Ok(Pod {
            id,
            name: record.name,
            image: record.image,
            location,
            tags: record.tags,
            event_description: record.event_description,
            formatted_date: record.formatted_date,
            time: record.time,
            upvotes: record.upvotes,
            downvotes: record.downvotes,
            extra,
        })
    }
}

impl Pod {
    /// Create a pod with only an id and a name; everything else empty.
    pub fn new(id: impl Into<PodId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            location: None,
            tags: Vec::new(),
            event_description: String::new(),
            formatted_date: None,
            time: None,
            upvotes: Vec::new(),
            downvotes: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Tag>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_schedule(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.formatted_date = Some(date.into());
        self.time = Some(time.into());
        self
    }

    /// Position of the pod.
    ///
    /// Returns `Ok(None)` when the pod has no location at all and `Err` when
    /// a location is present but its coordinates are not numeric.
    pub fn position(&self) -> Result<Option<GeoPoint>> {
        self.location.as_ref().map(Location::geo_point).transpose()
    }

    /// True if at least one of the pod's tags is in `interests`.
    pub fn shares_tag_with(&self, interests: &HashSet<Tag>) -> bool {
        self.tags.iter().any(|tag| interests.contains(tag))
    }

    /// Net vote count (upvotes minus downvotes)
    pub fn score(&self) -> i64 {
        self.upvotes.len() as i64 - self.downvotes.len() as i64
    }
}
