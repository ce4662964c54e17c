//! Display annotations for the cards in a deck.
//!
//! This module computes the per-card text that sits under a pod's name:
//! how far away it is and when it happens.

use crate::geo::distance_meters;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use pod_model::{Pod, PodId};
use rayon::prelude::*;
use sources::UserContext;
use tracing::warn;

/// Annotations computed for each card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDetails {
    pub pod_id: PodId,

    // Location
    pub distance_m: Option<f64>,
    pub distance_label: Option<String>,

    // Schedule
    pub schedule_label: Option<String>,

    // Display helpers
    pub tags_label: String,
    pub score: i64,
}

impl CardDetails {
    /// Create CardDetails with nothing computed yet.
    pub fn new(pod_id: PodId) -> Self {
        Self {
            pod_id,
            distance_m: None,
            distance_label: None,
            schedule_label: None,
            tags_label: String::new(),
            score: 0,
        }
    }
}

/// Computes annotations for pods in parallel.
///
/// ## Performance Note
/// Uses Rayon for parallel computation. Decks are small, but annotation
/// runs on every load and the work is independent per card.
#[derive(Clone, Debug, Default)]
pub struct CardAnnotator;

impl CardAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate all pods in parallel.
    ///
    /// # Returns
    /// Vec of CardDetails, one per pod, in the same order
    pub fn annotate(&self, pods: &[Pod], context: &UserContext) -> Vec<CardDetails> {
        pods.par_iter()
            .map(|pod| self.annotate_single(pod, context))
            .collect()
    }

    fn annotate_single(&self, pod: &Pod, context: &UserContext) -> CardDetails {
        let mut details = CardDetails::new(pod.id.clone());

        // Distance (only when both ends are known)
        details.distance_m = match (context.position, pod.position()) {
            (Some(origin), Ok(Some(point))) => Some(distance_meters(origin, point)),
            (_, Err(e)) => {
                warn!("Invalid latitude or longitude for pod {}: {}", pod.id, e);
                None
            }
            _ => None,
        };
        details.distance_label = details.distance_m.map(format_distance);

        // Schedule
        details.schedule_label = pod
            .formatted_date
            .as_deref()
            .and_then(|date| format_schedule(date, pod.time.as_deref()));

        details.tags_label = pod.tags.join(", ");
        details.score = pod.score();
        details
    }
}

/// `"(1.2 km away)"` for a distance in meters.
pub fn format_distance(meters: f64) -> String {
    format!("({:.1} km away)", meters / 1000.0)
}

/// `"Jun 1 @ 7:15pm"` from a date and an optional `HH:MM` time.
///
/// ## Algorithm
/// - Date: `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS`
/// - Hours `>= 12` are pm; hours `> 12` have 12 subtracted
/// - Minutes are copied through as written
///
/// Returns `None` if the date cannot be parsed.
pub fn format_schedule(date: &str, time: Option<&str>) -> Option<String> {
    let Some(day) = parse_date(date) else {
        warn!("Unparseable pod date: {:?}", date);
        return None;
    };
    let date_part = format!("{} {}", day.format("%b"), day.day());

    match time.and_then(format_time) {
        Some(time_part) => Some(format!("{} @ {}", date_part, time_part)),
        None => Some(date_part),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn format_time(raw: &str) -> Option<String> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let mut hours: u32 = hours.parse().ok()?;
    let mut ampm = "am";
    if hours >= 12 {
        ampm = "pm";
        if hours > 12 {
            hours -= 12;
        }
    }
    Some(format!("{}:{}{}", hours, minutes, ampm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_model::{GeoPoint, Location};
    use serde_json::Value;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1234.0), "(1.2 km away)");
        assert_eq!(format_distance(0.0), "(0.0 km away)");
        assert_eq!(format_distance(15_960.0), "(16.0 km away)");
    }

    #[test]
    fn test_format_schedule_afternoon() {
        assert_eq!(
            format_schedule("2024-06-01", Some("19:05")).as_deref(),
            Some("Jun 1 @ 7:05pm")
        );
    }

    #[test]
    fn test_format_schedule_noon_and_morning() {
        assert_eq!(
            format_schedule("2024-12-25", Some("12:30")).as_deref(),
            Some("Dec 25 @ 12:30pm")
        );
        assert_eq!(
            format_schedule("2024-03-09", Some("09:00")).as_deref(),
            Some("Mar 9 @ 9:00am")
        );
    }

    #[test]
    fn test_format_schedule_other_date_shapes() {
        assert_eq!(
            format_schedule("2024-07-04T18:00:00.000Z", None).as_deref(),
            Some("Jul 4")
        );
        assert_eq!(
            format_schedule("2024-07-04T18:00:00", Some("bad")).as_deref(),
            Some("Jul 4")
        );
        assert!(format_schedule("next tuesday", Some("10:00")).is_none());
    }

    #[test]
    fn test_annotate_with_position() {
        let pods = vec![
            Pod::new("1", "Near")
                .with_tags(["art", "music"])
                .with_location(Location::new("0.01", "0"))
                .with_schedule("2024-06-01", "08:15"),
            Pod::new("2", "Broken").with_location(Location::new("x", "y")),
            Pod::new("3", "Unplaced"),
        ];
        let context = UserContext::new().with_position(GeoPoint::new(0.0, 0.0));

        let details = CardAnnotator::new().annotate(&pods, &context);
        assert_eq!(details.len(), 3);

        assert_eq!(details[0].pod_id, "1");
        assert!(details[0].distance_m.is_some());
        assert_eq!(details[0].distance_label.as_deref(), Some("(1.1 km away)"));
        assert_eq!(details[0].schedule_label.as_deref(), Some("Jun 1 @ 8:15am"));
        assert_eq!(details[0].tags_label, "art, music");

        assert_eq!(details[1].pod_id, "2");
        assert!(details[1].distance_m.is_none());
        assert!(details[1].distance_label.is_none());

        assert!(details[2].distance_m.is_none());
        assert!(details[2].schedule_label.is_none());
    }

    #[test]
    fn test_annotate_without_position() {
        let pods = vec![Pod::new("1", "Near").with_location(Location::new(1.0, 1.0))];
        let details = CardAnnotator::new().annotate(&pods, &UserContext::new());
        assert!(details[0].distance_m.is_none());
    }

    #[test]
    fn test_score_is_carried() {
        let mut pod = Pod::new("v", "Voted");
        pod.upvotes = vec![Value::from(1), Value::from(2)];
        let details = CardAnnotator::new().annotate(&[pod], &UserContext::new());
        assert_eq!(details[0].score, 2);
    }
}
