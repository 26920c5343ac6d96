//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Session durations (work, short break, long break) in minutes
//! - Notification preferences
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{
    SessionType, Settings, DEFAULT_LONG_BREAK_MIN, DEFAULT_SHORT_BREAK_MIN, DEFAULT_WORK_MIN,
};

/// Session durations in minutes.
///
/// Values are kept as written; [`Config::settings`] sanitizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_work_duration")]
    pub work_duration: i64,
    #[serde(default = "default_short_break_duration")]
    pub short_break_duration: i64,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: i64,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Whether completion messages may be surfaced at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Show desktop notifications in addition to the log line.
    #[serde(default = "default_true")]
    pub desktop: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_work_duration() -> i64 {
    DEFAULT_WORK_MIN.into()
}
fn default_short_break_duration() -> i64 {
    DEFAULT_SHORT_BREAK_MIN.into()
}
fn default_long_break_duration() -> i64 {
    DEFAULT_LONG_BREAK_MIN.into()
}
fn default_true() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break_duration: default_short_break_duration(),
            long_break_duration: default_long_break_duration(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            desktop: true,
        }
    }
}

/// Accepted minute ranges for the duration keys, as offered by the settings form.
const DURATION_RANGES: [(&str, SessionType, RangeInclusive<i64>); 3] = [
    ("schedule.work_duration", SessionType::Work, 1..=60),
    ("schedule.short_break_duration", SessionType::ShortBreak, 1..=30),
    ("schedule.long_break_duration", SessionType::LongBreak, 1..=60),
];

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
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::DataDir(e.to_string()))
    }

    /// Load from the default location, writing defaults if no file exists yet.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or a duration lies outside its accepted range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.check_range(key)?;
        *self = updated;
        Ok(())
    }

    /// Set the duration for one session type. Does not persist.
    ///
    /// # Errors
    /// Returns an error if `minutes` lies outside the accepted range.
    pub fn set_minutes(&mut self, kind: SessionType, minutes: i64) -> Result<(), ConfigError> {
        self.set(duration_key(kind), &minutes.to_string())
    }

    /// Durations handed to the session scheduler.
    pub fn settings(&self) -> Settings {
        Settings::new(
            self.schedule.work_duration,
            self.schedule.short_break_duration,
            self.schedule.long_break_duration,
        )
    }

    /// Validate the duration stored under `key`, if `key` is a duration key.
    fn check_range(&self, key: &str) -> Result<(), ConfigError> {
        let Some((_, kind, range)) = DURATION_RANGES.iter().find(|(k, _, _)| *k == key) else {
            return Ok(());
        };
        let minutes = match kind {
            SessionType::Work => self.schedule.work_duration,
            SessionType::ShortBreak => self.schedule.short_break_duration,
            SessionType::LongBreak => self.schedule.long_break_duration,
        };
        if range.contains(&minutes) {
            return Ok(());
        }
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be between {} and {} minutes", range.start(), range.end()),
        })
    }
}

fn duration_key(kind: SessionType) -> &'static str {
    match kind {
        SessionType::Work => "schedule.work_duration",
        SessionType::ShortBreak => "schedule.short_break_duration",
        SessionType::LongBreak => "schedule.long_break_duration",
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
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.schedule.work_duration, 25);
        assert_eq!(cfg.schedule.short_break_duration, 5);
        assert_eq!(cfg.schedule.long_break_duration, 15);
        assert!(cfg.notifications.enabled);
        assert!(cfg.notifications.desktop);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = toml::from_str("[schedule]\nwork_duration = 40\n").unwrap();
        assert_eq!(cfg.schedule.work_duration, 40);
        assert_eq!(cfg.schedule.short_break_duration, 5);
        assert!(cfg.notifications.enabled);
    }

    #[test]
    fn non_positive_durations_sanitize_to_defaults() {
        let cfg: Config =
            toml::from_str("[schedule]\nwork_duration = 0\nshort_break_duration = -4\n").unwrap();
        assert_eq!(cfg.settings(), Settings::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("schedule.work_duration").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("schedule.missing_key").is_none());
        assert!(cfg.get("schedule").is_none());
    }

    #[test]
    fn set_updates_duration_and_settings() {
        let mut cfg = Config::default();
        cfg.set("schedule.work_duration", "10").unwrap();
        assert_eq!(cfg.schedule.work_duration, 10);
        assert_eq!(cfg.settings().session_duration(SessionType::Work), 600);
    }

    #[test]
    fn set_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.set("notifications.desktop", "false").unwrap();
        assert!(!cfg.notifications.desktop);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("schedule.nonexistent", "5"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "5"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("schedule", "5"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.enabled", "not_a_bool").is_err());
        assert!(cfg.set("schedule.work_duration", "ten").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_enforces_form_ranges() {
        let mut cfg = Config::default();
        assert!(cfg.set("schedule.work_duration", "61").is_err());
        assert!(cfg.set("schedule.short_break_duration", "31").is_err());
        assert!(cfg.set("schedule.long_break_duration", "0").is_err());
        assert!(cfg.set_minutes(SessionType::ShortBreak, 30).is_ok());
        assert_eq!(cfg.schedule.short_break_duration, 30);
    }

    #[test]
    fn out_of_range_file_values_do_not_block_other_keys() {
        let mut cfg: Config = toml::from_str("[schedule]\nwork_duration = 0\n").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        assert!(!cfg.notifications.enabled);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
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
        cfg.set_minutes(SessionType::LongBreak, 45).unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.schedule.long_break_duration, 45);
    }

    #[test]
    fn load_from_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "schedule = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
