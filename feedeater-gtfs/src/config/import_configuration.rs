use std::path::Path;

use serde::{Deserialize, Serialize};

use super::OperatorInFeed;
use crate::import::{ImportError, ImportLevel};

/// configuration of one feed import, read from a `.toml` or `.json` file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportConfiguration {
    /// Onestop ID of the feed being imported
    pub feed_onestop_id: String,
    /// identifier of the feed version (for example, the archive's sha1)
    #[serde(default)]
    pub feed_version: Option<String>,
    /// agencies of the feed to import as operators
    pub operators_in_feed: Vec<OperatorInFeed>,
    /// 0: operators, 1: adds stops, routes and route stop patterns, 2: adds schedules
    #[serde(default = "defaults::import_level")]
    pub import_level: u8,
    /// maximum number of entities per change payload
    #[serde(default = "defaults::change_payload_max_entities")]
    pub change_payload_max_entities: usize,
    /// maximum number of stop times loaded by a single schedule chunk
    #[serde(default = "defaults::stop_times_max_load")]
    pub stop_times_max_load: usize,
    /// number of schedule chunks processed concurrently
    #[serde(default = "defaults::parallelism")]
    pub parallelism: usize,
    /// Douglas-Peucker tolerance for route geometries, in degrees
    #[serde(default = "defaults::simplify_tolerance")]
    pub simplify_tolerance: f64,
}

mod defaults {
    pub fn import_level() -> u8 {
        1
    }
    pub fn change_payload_max_entities() -> usize {
        1000
    }
    pub fn stop_times_max_load() -> usize {
        100_000
    }
    pub fn parallelism() -> usize {
        1
    }
    pub fn simplify_tolerance() -> f64 {
        feedeater_core::geometry::SIMPLIFY_TOLERANCE
    }
}

impl ImportConfiguration {
    /// a configuration with default settings that imports the given operators.
    pub fn new(feed_onestop_id: &str, operators_in_feed: Vec<OperatorInFeed>) -> ImportConfiguration {
        ImportConfiguration {
            feed_onestop_id: feed_onestop_id.to_string(),
            feed_version: None,
            operators_in_feed,
            import_level: defaults::import_level(),
            change_payload_max_entities: defaults::change_payload_max_entities(),
            stop_times_max_load: defaults::stop_times_max_load(),
            parallelism: defaults::parallelism(),
            simplify_tolerance: defaults::simplify_tolerance(),
        }
    }

    pub fn import_level(&self) -> Result<ImportLevel, ImportError> {
        ImportLevel::try_from(self.import_level)
    }

    /// rejects settings that would make an import fail part way through.
    pub fn validate(&self) -> Result<(), ImportError> {
        self.import_level()?;
        if self.change_payload_max_entities == 0 {
            return Err(ImportError::InvalidConfiguration(String::from(
                "change_payload_max_entities must be positive",
            )));
        }
        if self.stop_times_max_load == 0 {
            return Err(ImportError::InvalidConfiguration(String::from(
                "stop_times_max_load must be positive",
            )));
        }
        if self.parallelism == 0 {
            return Err(ImportError::InvalidConfiguration(String::from(
                "parallelism must be positive",
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for ImportConfiguration {
    type Error = ImportError;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        let path = Path::new(value);
        let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ImportConfiguration = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| {
                ImportError::InvalidConfiguration(format!("failure reading TOML file '{value}': {e}"))
            })?,
            Some("json") => serde_json::from_str(&contents).map_err(|e| {
                ImportError::InvalidConfiguration(format!("failure reading JSON file '{value}': {e}"))
            })?,
            _ => {
                return Err(ImportError::InvalidConfiguration(format!(
                    "unsupported configuration file type '{value}', expected .toml or .json"
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }
}
