//! Runtime configuration read from the environment.

use anyhow::{anyhow, Result};
use sources::DEFAULT_GEOCODER_URL;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

pub const DEFAULT_POD_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_DATABASE_PATH: &str = "generativeai.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the pod server (`POD_SERVER_URL`)
    pub pod_server_url: String,
    /// Radius for the distance filter in meters (`POD_MAX_DISTANCE_M`); unset disables it
    pub max_distance_m: Option<f64>,
    /// Nominatim-compatible reverse geocoder (`GEOCODER_URL`)
    pub geocoder_url: String,
    /// SQLite file for users, categories and quizzes (`QUIZ_DATABASE_PATH`)
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pod_server_url: DEFAULT_POD_SERVER_URL.to_string(),
            max_distance_m: None,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Config {
    /// Load from process environment variables.
    ///
    /// Missing variables fall back to defaults; malformed values are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (the environment, a map in tests, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            pod_server_url: try_load(&lookup, "POD_SERVER_URL", DEFAULT_POD_SERVER_URL)?,
            max_distance_m: try_load_optional(&lookup, "POD_MAX_DISTANCE_M")?
                .map(|meters| check_distance("POD_MAX_DISTANCE_M", meters))
                .transpose()?,
            geocoder_url: try_load(&lookup, "GEOCODER_URL", DEFAULT_GEOCODER_URL)?,
            database_path: try_load(&lookup, "QUIZ_DATABASE_PATH", DEFAULT_DATABASE_PATH)?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: invalid {key}: {e}")
        })
}

fn try_load_optional<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>>
where
    T::Err: Display,
{
    match lookup(key).filter(|value| !value.trim().is_empty()) {
        None => {
            info!("{key} not set");
            Ok(None)
        }
        Some(value) => value.trim().parse().map(Some).map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: invalid {key}: {e}")
        }),
    }
}

/// A radius must be a finite, non-negative number of meters.
fn check_distance(key: &str, meters: f64) -> Result<f64> {
    if meters.is_finite() && meters >= 0.0 {
        Ok(meters)
    } else {
        warn!("Invalid {key} value: {meters}");
        Err(anyhow!(
            "Environment misconfigured: invalid {key}: {meters} is not a distance in meters"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pod_server_url, "http://localhost:3000");
        assert!(config.max_distance_m.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("POD_SERVER_URL", "http://pods.test"),
            ("POD_MAX_DISTANCE_M", "2500"),
            ("QUIZ_DATABASE_PATH", "/tmp/q.db"),
        ]))
        .unwrap();

        assert_eq!(config.pod_server_url, "http://pods.test");
        assert_eq!(config.max_distance_m, Some(2500.0));
        assert_eq!(config.database_path, PathBuf::from("/tmp/q.db"));
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_invalid_distance_is_an_error() {
        let result = Config::from_lookup(lookup(&[("POD_MAX_DISTANCE_M", "far")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_distance_is_unset() {
        let config = Config::from_lookup(lookup(&[("POD_MAX_DISTANCE_M", "  ")])).unwrap();
        assert!(config.max_distance_m.is_none());
    }

    #[test]
    fn test_nonsense_distances_are_rejected() {
        for value in ["NaN", "inf", "-1", "-0.5"] {
            let result = Config::from_lookup(lookup(&[("POD_MAX_DISTANCE_M", value)]));
            let err = result.unwrap_err();
            assert!(err.to_string().contains("POD_MAX_DISTANCE_M"), "{}", value);
        }

        let zero = Config::from_lookup(lookup(&[("POD_MAX_DISTANCE_M", "0")])).unwrap();
        assert_eq!(zero.max_distance_m, Some(0.0));
    }
}
