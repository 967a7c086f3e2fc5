//! CLI configuration read from `<storage>/config.json`.

use std::path::Path;
use anyhow::{Context, Result};
use depot_core::FleetContext;
use serde::{Deserialize, Serialize};

/// File name looked up inside the storage directory.
pub const CONFIG_FILE: &str = "config.json";

/// Depot CLI configuration. Every field has a default, so a partial file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    /// Default fleet figures for reports
    pub fleet: FleetDefaults,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Cards generated for `--memory` runs
    pub sample_size: usize,
}

/// Fleet figures used when the command line does not give them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetDefaults {
    /// Fleet distance for the reporting period (km)
    pub total_fleet_kilometers: f64,

    /// Hours in the reporting period
    pub calendar_hours: f64,

    /// Trains in the fleet
    pub train_count: u32,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            fleet: FleetDefaults::default(),
            log_level: "info".to_string(),
            sample_size: 200,
        }
    }
}

impl Default for FleetDefaults {
    fn default() -> Self {
        Self {
            total_fleet_kilometers: 250_000.0,
            calendar_hours: 720.0,
            train_count: 24,
        }
    }
}

impl DepotConfig {
    /// Load the config from a storage directory, falling back to defaults when
    /// the file does not exist.
    pub fn load(storage: &Path) -> Result<Self> {
        let path = storage.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }

    /// Fleet context from config, with optional command-line overrides.
    pub fn fleet_context(&self, km: Option<f64>, service_hours: Option<f64>) -> Result<FleetContext> {
        let defaults = FleetContext::from_calendar(
            self.fleet.calendar_hours,
            self.fleet.train_count,
            self.fleet.total_fleet_kilometers,
        )?;
        Ok(FleetContext::new(
            km.unwrap_or(defaults.total_fleet_kilometers),
            service_hours.unwrap_or(defaults.total_possible_service_hours),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DepotConfig::load(dir.path()).unwrap(), DepotConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "fleet": { "train_count": 10 }, "log_level": "debug" }"#,
        )
        .unwrap();

        let config = DepotConfig::load(dir.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.fleet.train_count, 10);
        assert_eq!(config.fleet.calendar_hours, 720.0);
        assert_eq!(config.sample_size, 200);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();
        assert!(DepotConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_fleet_context_overrides() {
        let config = DepotConfig::default();
        let fleet = config.fleet_context(None, None).unwrap();
        assert_eq!(fleet.total_fleet_kilometers, 250_000.0);
        assert_eq!(fleet.total_possible_service_hours, 720.0 * 24.0);

        let fleet = config.fleet_context(Some(1_000.0), Some(50.0)).unwrap();
        assert_eq!(fleet.total_fleet_kilometers, 1_000.0);
        assert_eq!(fleet.total_possible_service_hours, 50.0);

        assert!(config.fleet_context(Some(-1.0), None).is_err());
    }
}
