//! TOML-based tracker configuration.
//!
//! Stores the tracker's standing state:
//! - Fallback closest-approach target and countdown label
//! - Countdown tick cadence
//! - Telemetry refresh cadence
//!
//! Configuration is stored at `~/.config/cometwatch/config.toml`. The
//! reference implementation kept the fallback target in a build-time
//! environment variable; here the config file is the authoritative home and
//! the environment variable survives only as a last-resort fallback.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::countdown::TimeTarget;
use crate::error::ConfigError;
use crate::telemetry::TelemetrySnapshot;

/// Environment variable supplying a deploy-time fallback target. A value in
/// the config file outranks it.
pub const CLOSEST_APPROACH_ENV: &str = "COMETWATCH_CLOSEST_APPROACH";

/// Countdown-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Fallback closest-approach timestamp for when telemetry carries none.
    #[serde(default)]
    pub closest_approach_fallback: Option<String>,
    /// Display label for the countdown.
    #[serde(default = "default_label")]
    pub label: String,
    /// Tick cadence of the countdown driver, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Telemetry refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Refresh prompt cadence in minutes. The reference feed republishes
    /// every 15 minutes.
    #[serde(default = "default_refresh_interval_min")]
    pub refresh_interval_min: u64,
}

/// Tracker configuration.
///
/// Serialized to/from TOML at `~/.config/cometwatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

// Default functions
fn default_label() -> String {
    "Closest approach".into()
}
fn default_tick_interval_ms() -> u64 {
    1_000
}
fn default_refresh_interval_min() -> u64 {
    15
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            closest_approach_fallback: None,
            label: default_label(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_min: default_refresh_interval_min(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            countdown: CountdownConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Returns `~/.config/cometwatch[-dev]/` based on COMETWATCH_ENV, or the
/// directory named by COMETWATCH_CONFIG_DIR when set.
///
/// Set COMETWATCH_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var("COMETWATCH_CONFIG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("COMETWATCH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cometwatch-dev")
            } else {
                base_dir.join("cometwatch")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl TrackerConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as number"),
                                })?
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the defaults when no file
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// Resolve the countdown target, most authoritative source first:
    /// the snapshot's closest-approach event, then the configured fallback,
    /// then [`CLOSEST_APPROACH_ENV`]. `None` means no source had one and the
    /// countdown reads `Unset`.
    pub fn resolve_target(&self, snapshot: Option<&TelemetrySnapshot>) -> Option<TimeTarget> {
        if let Some(target) = snapshot.and_then(TelemetrySnapshot::closest_approach) {
            return Some(target);
        }
        if let Some(raw) = &self.countdown.closest_approach_fallback {
            return Some(TimeTarget::new(raw.clone()));
        }
        std::env::var(CLOSEST_APPROACH_ENV)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(TimeTarget::new)
    }
}
