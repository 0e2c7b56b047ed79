//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Work window and lunch break used by the timeline
//! - Local UTC offset the daily windows are expressed in
//! - Calendar providers feeding the timeline
//!
//! Configuration is stored at `~/.config/tasktrail/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::CalendarProvider;
use crate::error::{ConfigError, Result, ValidationError};
use crate::schedule::DailyWindow;
use crate::scheduler::DayPlan;

/// Timeline-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub work_window_enabled: bool,
    #[serde(default = "default_work_start")]
    pub work_start: String, // HH:mm
    #[serde(default = "default_work_end")]
    pub work_end: String, // HH:mm
    #[serde(default)]
    pub lunch_break_enabled: bool,
    #[serde(default = "default_lunch_start")]
    pub lunch_start: String, // HH:mm
    #[serde(default = "default_lunch_end")]
    pub lunch_end: String, // HH:mm
    /// Offset of local time from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Calendar provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub providers: Vec<CalendarProvider>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tasktrail/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

// Default functions
fn default_work_start() -> String {
    "09:00".into()
}
fn default_work_end() -> String {
    "17:00".into()
}
fn default_lunch_start() -> String {
    "13:00".into()
}
fn default_lunch_end() -> String {
    "14:00".into()
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            work_window_enabled: false,
            work_start: default_work_start(),
            work_end: default_work_end(),
            lunch_break_enabled: false,
            lunch_start: default_lunch_start(),
            lunch_end: default_lunch_end(),
            utc_offset_minutes: 0,
        }
    }
}

impl TimelineConfig {
    /// Daily windows for the scheduler; disabled windows are `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if an enabled window has a malformed time or the
    /// offset is out of range.
    pub fn day_plan(&self) -> Result<DayPlan, ValidationError> {
        let work_window = if self.work_window_enabled {
            Some(DailyWindow::parse(&self.work_start, &self.work_end)?)
        } else {
            None
        };
        let lunch_break = if self.lunch_break_enabled {
            Some(DailyWindow::parse(&self.lunch_start, &self.lunch_end)?)
        } else {
            None
        };
        Ok(DayPlan {
            work_window,
            lunch_break,
            utc_offset: self.utc_offset()?,
        })
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ValidationError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ValidationError::InvalidUtcOffset {
                minutes: self.utc_offset_minutes,
            })
    }
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
        if parts.peek().map_or(true, |part| part.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from a specific file, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
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

    /// Set a config value by key without saving. Returns error if key is
    /// unknown or the result is not a valid timeline configuration.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.timeline.day_plan()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Daily windows for the scheduler.
    pub fn day_plan(&self) -> Result<DayPlan> {
        Ok(self.timeline.day_plan()?)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
