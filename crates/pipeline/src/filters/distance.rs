//! Optional filter for the user's search radius.
//!
//! Removes pods that are farther from the user than the configured
//! maximum distance.

use crate::geo::distance_meters;
use crate::traits::Filter;
use anyhow::Result;
use pod_model::Pod;
use sources::UserContext;
use tracing::warn;

/// Filters pods based on distance from the user's current position.
///
/// ## Algorithm
/// 1. If the context has no position or no maximum distance, keep all pods
/// 2. Otherwise keep pods within `max_distance_m` meters (inclusive)
/// 3. Pods whose location is missing or malformed are kept; they simply
///    cannot be placed, so they are logged and shown without a distance
pub struct DistanceFilter;

impl Filter for DistanceFilter {
    fn name(&self) -> &str {
        "DistanceFilter"
    }

    fn apply(&self, pods: Vec<Pod>, context: &UserContext) -> Result<Vec<Pod>> {
        let Some((origin, max_distance)) = context.search_radius() else {
            return Ok(pods);
        };

        let filtered: Vec<Pod> = pods
            .into_iter()
            .filter(|pod| match pod.position() {
                Ok(Some(point)) => distance_meters(origin, point) <= max_distance,
                Ok(None) => true,
                Err(e) => {
                    warn!("Pod {} has an invalid location: {}", pod.id, e);
                    true
                }
            })
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_M;
    use pod_model::{GeoPoint, Location};

    /// A pod due north of the origin at `meters` along the meridian
    fn pod_north_of_origin(id: &str, meters: f64) -> Pod {
        let degrees = meters / (EARTH_RADIUS_M * std::f64::consts::PI / 180.0);
        Pod::new(id, "Somewhere").with_location(Location::new(degrees, 0.0))
    }

    fn context(max_distance: f64) -> UserContext {
        UserContext::new()
            .with_position(GeoPoint::new(0.0, 0.0))
            .with_max_distance(max_distance)
    }

    #[test]
    fn test_within_radius_is_kept() {
        let pods = vec![pod_north_of_origin("near", 900.0)];
        let filtered = DistanceFilter.apply(pods, &context(1000.0)).unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_outside_radius_is_dropped() {
        let pods = vec![pod_north_of_origin("near", 900.0)];
        let filtered = DistanceFilter.apply(pods, &context(500.0)).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_no_radius_keeps_everything() {
        let pods = vec![
            pod_north_of_origin("a", 10.0),
            pod_north_of_origin("b", 10_000_000.0),
        ];
        let only_position = UserContext::new().with_position(GeoPoint::new(0.0, 0.0));
        let filtered = DistanceFilter.apply(pods, &only_position).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_malformed_and_missing_locations_are_kept() {
        let pods = vec![
            Pod::new("bad", "Bad").with_location(Location::new("abc", "1.0")),
            Pod::new("none", "Nowhere"),
            pod_north_of_origin("far", 50_000.0),
        ];
        let filtered = DistanceFilter.apply(pods, &context(1000.0)).unwrap();
        let ids: Vec<_> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["bad", "none"]);
    }

    #[test]
    fn test_null_and_partial_coordinates_are_kept() {
        let mut pods: Vec<Pod> = serde_json::from_str(
            r#"[
                {"_id":"null","location":{"lat":null,"lng":null}},
                {"_id":"half","location":{"lat":"0.5"}},
                {"_id":"bool","location":{"lat":true,"lng":0}}
            ]"#,
        )
        .unwrap();
        pods.push(pod_north_of_origin("far", 50_000.0));

        let filtered = DistanceFilter.apply(pods, &context(1000.0)).unwrap();
        let ids: Vec<_> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["null", "half", "bool"]);
    }

    #[test]
    fn test_string_coordinates_are_measured() {
        let pods = vec![Pod::new("s", "Stringy").with_location(Location::new("0.001", "0"))];
        // 0.001 degrees is about 111 m
        let filtered = DistanceFilter.apply(pods, &context(200.0)).unwrap();
        assert_eq!(filtered.len(), 1);
    }
}
