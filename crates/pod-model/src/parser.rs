//! Decoding of pod server responses.
//!
//! `getPods` answers with a JSON array whose elements are themselves
//! JSON-encoded strings (the server stringifies each document before
//! collecting them). Newer deployments send plain objects instead, so both
//! shapes are accepted element by element.

use crate::error::{PodModelError, Result};
use crate::types::{Pod, Tag};
use serde_json::Value;
use tracing::warn;

/// Decode a single element of the pod list.
///
/// # Arguments
/// * `index` - Position of the element in the list (for error messages)
/// * `value` - Either a JSON string holding a pod document or the document itself
pub fn parse_pod_record(index: usize, value: Value) -> Result<Pod> {
    let decoded = match value {
        Value::String(encoded) => serde_json::from_str::<Pod>(&encoded),
        Value::Object(_) => serde_json::from_value::<Pod>(value),
        other => {
            return Err(PodModelError::MalformedRecord {
                index,
                reason: format!("expected string or object, found {}", kind_of(&other)),
            });
        }
    };
    decoded.map_err(|e| PodModelError::MalformedRecord {
        index,
        reason: e.to_string(),
    })
}

/// Parse the body of a `getPods` response.
///
/// The body itself must be a JSON array; a non-array body is an error.
/// Individual records that fail to decode are logged and skipped so one bad
/// document does not hide the rest of the deck.
pub fn parse_pod_list(body: &str) -> Result<Vec<Pod>> {
    let records: Vec<Value> = serde_json::from_str(body)?;
    let total = records.len();

    let pods: Vec<Pod> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match parse_pod_record(index, value) {
            Ok(pod) => Some(pod),
            Err(e) => {
                warn!("Skipping pod record: {}", e);
                None
            }
        })
        .collect();

    if pods.len() != total {
        warn!("Decoded {} of {} pod records", pods.len(), total);
    }
    Ok(pods)
}

/// Parse the body of a `getUserInterests` response (a JSON array of tags).
pub fn parse_interests(body: &str) -> Result<Vec<Tag>> {
    Ok(serde_json::from_str(body)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stringified_records() {
        let body = serde_json::to_string(&vec![
            r#"{"_id":"1","name":"Jam session","tags":["music","art"],"location":{"lat":"44.97","lng":"-93.26"}}"#,
            r#"{"_id":"2","name":"Pickup soccer","tags":["sports"]}"#,
        ])
        .unwrap();

        let pods = parse_pod_list(&body).unwrap();
        assert_eq!(pods.len(), 2);
        assert_eq!(pods[0].id, "1");
        assert_eq!(pods[0].tags, vec!["music", "art"]);
        assert_eq!(pods[1].name, "Pickup soccer");
    }

    #[test]
    fn test_parse_object_records() {
        let body = r#"[{"_id":"9","name":"Book club","tags":["books"],"time":"18:30"}]"#;
        let pods = parse_pod_list(body).unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].time.as_deref(), Some("18:30"));
    }

    #[test]
    fn test_bad_records_are_skipped_in_order() {
        let body = r#"[
            "{\"_id\":\"1\",\"name\":\"first\"}",
            "{not json",
            42,
            {"_id":"4","name":"fourth"}
        ]"#;
        let pods = parse_pod_list(body).unwrap();
        let ids: Vec<_> = pods.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_parse_record_reports_index() {
        let err = parse_pod_record(3, Value::Bool(true)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("index 3"));
        assert!(message.contains("bool"));
    }

    #[test]
    fn test_malformed_coordinates_keep_the_record() {
        let body = r#"[
            {"_id":"a","tags":["art"],"location":{"lat":null,"lng":null}},
            {"_id":"b","tags":["art"],"location":{"lat":"44.9"}},
            {"_id":"c","tags":["art"],"location":{"lat":true,"lng":1.0}},
            {"_id":"d","tags":["art"],"location":{"lat":"abc","lng":"1"}}
        ]"#;
        let pods = parse_pod_list(body).unwrap();
        let ids: Vec<_> = pods.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(pods.iter().all(|p| p.position().is_err()));
    }

    #[test]
    fn test_record_with_both_id_keys() {
        let body = r#"[{"_id":"65f","id":"65f","name":"virtuals","tags":["art"]}]"#;
        let pods = parse_pod_list(body).unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].id, "65f");
    }

    #[test]
    fn test_record_without_id_is_skipped() {
        let body = r#"[{"name":"no id"},{"_id":"2","name":"has id"}]"#;
        let pods = parse_pod_list(body).unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].id, "2");
    }

    #[test]
    fn test_non_array_body_is_error() {
        assert!(parse_pod_list(r#"{"pods": []}"#).is_err());
        assert!(parse_pod_list("").is_err());
    }

    #[test]
    fn test_parse_interests() {
        let tags = parse_interests(r#"["art","sports"]"#).unwrap();
        assert_eq!(tags, vec!["art", "sports"]);
        assert!(parse_interests("[1,2]").is_err());
    }
}
