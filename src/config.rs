use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use thiserror::Error;

use crate::predict::{GroundStation, PassQuery, PredictError, DEFAULT_TRANSMIT_FREQUENCY_HZ};
use crate::tle::DEFAULT_OFFSETS_MINUTES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid station: {0}")]
    Station(#[from] PredictError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub tle: TleConfig,
    #[serde(default)]
    pub predict: PredictConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TleConfig {
    #[serde(default = "default_offsets")]
    pub offsets_minutes: Vec<u32>,
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            offsets_minutes: default_offsets(),
        }
    }
}

fn default_offsets() -> Vec<u32> {
    DEFAULT_OFFSETS_MINUTES.to_vec()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictConfig {
    #[serde(default = "default_passes")]
    pub passes: usize,
    #[serde(default = "default_frequency")]
    pub transmit_frequency_hz: f64,
    #[serde(
        default = "default_search_horizon",
        deserialize_with = "deserialize_horizon"
    )]
    pub search_horizon: Duration,
    #[serde(default)]
    pub min_elevation_deg: f64,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            transmit_frequency_hz: default_frequency(),
            search_horizon: default_search_horizon(),
            min_elevation_deg: 0.0,
        }
    }
}

impl PredictConfig {
    /// Query for `count` passes (or the configured number) starting at `start`.
    pub fn query(&self, start: DateTime<Utc>, count: Option<usize>) -> PassQuery {
        let mut query = PassQuery::new(start, count.unwrap_or(self.passes));
        query.horizon = self.search_horizon;
        query.min_elevation_deg = self.min_elevation_deg;
        query.transmit_frequency_hz = self.transmit_frequency_hz;
        query
    }
}

fn default_passes() -> usize {
    10
}

fn default_frequency() -> f64 {
    DEFAULT_TRANSMIT_FREQUENCY_HZ
}

fn default_search_horizon() -> Duration {
    Duration::days(30)
}

fn deserialize_horizon<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    let parsed = humantime::parse_duration(s).map_err(serde::de::Error::custom)?;
    let horizon = Duration::from_std(parsed).map_err(|_| {
        serde::de::Error::custom(format!("search_horizon '{}' is too long", s))
    })?;
    if horizon <= Duration::zero() {
        return Err(serde::de::Error::custom("search_horizon must be positive"));
    }
    Ok(horizon)
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.ground_station()?;
        Ok(config)
    }

    pub fn ground_station(&self) -> Result<GroundStation, PredictError> {
        GroundStation::from_coordinates(&self.station.coordinates, self.station.altitude_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FULL: &str = r#"
station:
  name: NTU Satellite Research Centre
  coordinates: "1.3568, 103.692"
  altitude_m: 23
catalog:
  path: ./catalog
tle:
  offsets_minutes: [0, 2, 10]
predict:
  passes: 5
  transmit_frequency_hz: 145800000
  search_horizon: 7days
  min_elevation_deg: 10
web:
  bind: 127.0.0.1:9000
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::from_yaml(FULL).unwrap();
        assert_eq!(
            config.station.name.as_deref(),
            Some("NTU Satellite Research Centre")
        );
        assert_eq!(config.catalog.path, PathBuf::from("./catalog"));
        assert_eq!(config.tle.offsets_minutes, vec![0, 2, 10]);
        assert_eq!(config.predict.passes, 5);
        assert_eq!(config.predict.search_horizon, Duration::days(7));
        assert_eq!(config.web.bind, "127.0.0.1:9000");

        let station = config.ground_station().unwrap();
        assert_eq!(station.altitude_m, 23.0);
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_yaml(
            "station:\n  coordinates: \"1.3568, 103.692\"\ncatalog:\n  path: gp.json\n",
        )
        .unwrap();
        assert_eq!(config.tle.offsets_minutes, vec![0, 4, 6, 8]);
        assert_eq!(config.predict.passes, 10);
        assert_eq!(config.predict.transmit_frequency_hz, 437.5e6);
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.station.altitude_m, 0.0);
    }

    #[test]
    fn builds_pass_query() {
        let config = Config::from_yaml(FULL).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let query = config.predict.query(start, None);
        assert_eq!(query.count, 5);
        assert_eq!(query.horizon, Duration::days(7));
        assert_eq!(query.min_elevation_deg, 10.0);
        assert_eq!(query.transmit_frequency_hz, 145.8e6);
        assert_eq!(config.predict.query(start, Some(2)).count, 2);
    }

    #[test]
    fn rejects_bad_station() {
        let err = Config::from_yaml("station:\n  coordinates: \"north\"\ncatalog:\n  path: x\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Station(_)));
    }

    #[test]
    fn example_config_is_valid() {
        let config = Config::from_yaml(include_str!("../config.example.yaml")).unwrap();
        assert_eq!(config.predict.search_horizon, Duration::days(30));
        assert_eq!(config.tle.offsets_minutes, DEFAULT_OFFSETS_MINUTES.to_vec());
    }

    #[test]
    fn rejects_unusable_search_horizon() {
        let base = "station:\n  coordinates: \"1.3568, 103.692\"\ncatalog:\n  path: x\npredict:\n";
        for horizon in ["1000000000years", "0s", "soon"] {
            let yaml = format!("{}  search_horizon: {}\n", base, horizon);
            assert!(
                matches!(Config::from_yaml(&yaml), Err(ConfigError::Yaml(_))),
                "{} was accepted",
                horizon
            );
        }
    }
}
