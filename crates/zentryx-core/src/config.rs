//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Focus cycle durations and long-break cadence
//! - Coach reply pacing
//! - Stopwatch tick resolution
//!
//! Configuration is stored at `~/.config/zentryx/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coach::DEFAULT_REPLY_DELAY_MS;
use crate::error::{ConfigError, Result};
use crate::timer::{CycleConfig, STOPWATCH_RESOLUTION_MS};

/// Coach configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

/// Tick resolutions the host drives the engines with.
///
/// Only the stopwatch is configurable: it adds its own resolution per tick.
/// The focus cycle and countdown always tick at
/// [`SECOND_TICK_MS`](crate::timer::SECOND_TICK_MS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    #[serde(default = "default_stopwatch_tick_ms")]
    pub stopwatch_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/zentryx/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub ticks: TickConfig,
}

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}
fn default_stopwatch_tick_ms() -> u64 {
    STOPWATCH_RESOLUTION_MS
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            stopwatch_ms: default_stopwatch_tick_ms(),
        }
    }
}

/// Returns `~/.config/zentryx[-dev]/` based on ZENTRYX_ENV.
///
/// Set ZENTRYX_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("ZENTRYX_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("zentryx-dev")
    } else {
        base_dir.join("zentryx")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot assign a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
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

    /// Set a config value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Cycle configuration clamped into the host's input bounds.
    pub fn cycle(&self) -> CycleConfig {
        self.cycle.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[cycle]\nfocus_minutes = 50\n").unwrap();
        assert_eq!(parsed.cycle.focus_minutes, 50);
        assert_eq!(parsed.cycle.short_break_minutes, 5);
        assert_eq!(parsed.coach.reply_delay_ms, 300);
        assert_eq!(parsed.ticks.stopwatch_ms, 100);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("cycle.focus_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("ticks.stopwatch_ms").as_deref(), Some("100"));
        assert!(cfg.get("cycle.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("cycle.cycles_before_long", "2").unwrap();
        assert_eq!(cfg.cycle.cycles_before_long, 2);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("cycle.nonexistent", "1").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
        assert!(cfg.set("nope", "1").is_err());
    }

    #[test]
    fn countdown_tick_period_is_not_configurable() {
        let mut cfg = Config::default();
        assert!(cfg.set("ticks.countdown_ms", "10").is_err());
        assert!(cfg.get("ticks.countdown_ms").is_none());

        // Files written before the key was dropped still load.
        let parsed: Config =
            toml::from_str("[ticks]\ncountdown_ms = 10\nstopwatch_ms = 100\n").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("cycle.focus_minutes", "lots").is_err());
        assert!(cfg.set("cycle.focus_minutes", "-5").is_err());
        assert!(cfg.set("cycle", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn cycle_is_clamped() {
        let mut cfg = Config::default();
        cfg.cycle.focus_minutes = 500;
        cfg.cycle.cycles_before_long = 0;
        let cycle = cfg.cycle();
        assert_eq!(cycle.focus_minutes, 90);
        assert_eq!(cycle.cycles_before_long, 1);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("coach.reply_delay_ms", "0").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().coach.reply_delay_ms, 0);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cycle = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Config(ConfigError::LoadFailed { .. })
        ));
    }
}
