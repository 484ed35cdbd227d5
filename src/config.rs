//! Controller configuration.
//!
//! Precedence, lowest first: built-in defaults, an optional JSON file named by
//! `INTERSECTION_CONFIG`, then individual `SIGNAL_*` environment overrides.

use crate::error::ConfigError;
use crate::global_variables::{
    DEFAULT_GREEN_SECS, DEFAULT_SIREN_COOLDOWN_SECS, DEFAULT_SIREN_POLL_INTERVAL_MS,
    DEFAULT_SIREN_TRIGGER_PROBABILITY, DEFAULT_TICK_INTERVAL_MS, DEFAULT_YELLOW_SECS,
    ENV_CONFIG_PATH, ENV_GREEN_SECS, ENV_SIREN_SIMULATION, ENV_TICK_MS, ENV_YELLOW_SECS,
};
use crate::models::mode::validate_duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub green_duration_secs: u32,
    pub yellow_duration_secs: u32,
    pub tick_interval_ms: u64,
    /// Run the random siren detector alongside the driver.
    pub siren_simulation: bool,
    pub siren_cooldown_secs: u64,
    pub siren_trigger_probability: f64,
    pub siren_poll_interval_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            green_duration_secs: DEFAULT_GREEN_SECS,
            yellow_duration_secs: DEFAULT_YELLOW_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            siren_simulation: false,
            siren_cooldown_secs: DEFAULT_SIREN_COOLDOWN_SECS,
            siren_trigger_probability: DEFAULT_SIREN_TRIGGER_PROBABILITY,
            siren_poll_interval_ms: DEFAULT_SIREN_POLL_INTERVAL_MS,
        }
    }
}

impl ControllerConfig {
    /// Loads from the file named by `INTERSECTION_CONFIG` (if set), then
    /// applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `SIGNAL_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_GREEN_SECS) {
            self.green_duration_secs = parse_override(ENV_GREEN_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_YELLOW_SECS) {
            self.yellow_duration_secs = parse_override(ENV_YELLOW_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_TICK_MS) {
            self.tick_interval_ms = parse_override(ENV_TICK_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_SIREN_SIMULATION) {
            self.siren_simulation = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_SIREN_SIMULATION.to_string(),
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_duration(i64::from(self.green_duration_secs))?;
        validate_duration(i64::from(self.yellow_duration_secs))?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }
        if self.siren_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "siren_poll_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.siren_trigger_probability) {
            return Err(ConfigError::InvalidValue {
                field: "siren_trigger_probability".to_string(),
                value: self.siren_trigger_probability.to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn siren_cooldown(&self) -> Duration {
        Duration::from_secs(self.siren_cooldown_secs)
    }

    pub fn siren_poll_interval(&self) -> Duration {
        Duration::from_millis(self.siren_poll_interval_ms)
    }
}

fn parse_override<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}
