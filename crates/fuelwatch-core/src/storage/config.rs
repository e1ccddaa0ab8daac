//! TOML-based application configuration.
//!
//! Stores:
//! - Report presentation (title, urgency threshold, message limit)
//! - The metadata row offset of the snapshot
//! - Webhook delivery settings
//! - Snapshot location and tracked entity names
//!
//! Configuration is stored at `~/.config/fuelwatch/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::report::{DEFAULT_HEADER_ROWS, DEFAULT_URGENT_DAYS, MAX_MESSAGE_LEN};

/// Report presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Leading snapshot rows treated as metadata and never reported.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    /// Lines with fewer whole days left than this are emphasised.
    #[serde(default = "default_urgent_days")]
    pub urgent_days: i64,
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

/// Webhook delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Where structure rows come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Snapshot file read by `report preview` / `report send`.
    #[serde(default)]
    pub snapshot_path: String,
    /// Entity names whose structures are tracked.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fuelwatch/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

fn default_title() -> String {
    "OPTM Fuel Status Update".into()
}
fn default_header_rows() -> usize {
    DEFAULT_HEADER_ROWS
}
fn default_urgent_days() -> i64 {
    DEFAULT_URGENT_DAYS
}
fn default_max_message_len() -> usize {
    MAX_MESSAGE_LEN
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            header_rows: default_header_rows(),
            urgent_days: default_urgent_days(),
            max_message_len: default_max_message_len(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
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
        let unknown = || ConfigError::MissingKey(key.to_string());
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
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as integer")));
                        }
                    }
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

    /// Default on-disk location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/fuelwatch"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// if its values fail [`Config::validate`], or if the default config
    /// cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
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

    /// Persist to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by key, keeping the existing value's type.
    ///
    /// Does not persist; call [`Config::save_to`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails [`Config::validate`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the report builder cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.max_message_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "report.max_message_len".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.report.max_message_len > MAX_MESSAGE_LEN {
            return Err(ConfigError::InvalidValue {
                key: "report.max_message_len".into(),
                message: format!("must not exceed the platform limit of {MAX_MESSAGE_LEN}"),
            });
        }
        if self.notify.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "notify.timeout_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
