use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::core::utils::{app_data_dir, config_file_in};
use crate::storage::{StorageConfig, StorageKind, DEFAULT_SEPARATOR};

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "storage",
    "data_file",
    "separator",
    "omdb_api_key",
    "site_dir",
    "template_dir",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
    #[error("Unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub separator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::Csv,
            data_file: None,
            separator: DEFAULT_SEPARATOR.into(),
            omdb_api_key: None,
            site_dir: None,
            template_dir: None,
        }
    }
}

impl Config {
    /// Resolves the backend selection. Without an explicit `data_file` the
    /// store lives in `data_dir` under the backend's default file name.
    pub fn storage_config(&self, data_dir: &Path) -> StorageConfig {
        let path = self
            .data_file
            .clone()
            .unwrap_or_else(|| data_dir.join(self.storage.default_file_name()));
        let config = StorageConfig::new(self.storage, path);
        match self.storage {
            StorageKind::Csv => config.with_separator(self.separator.clone()),
            StorageKind::Json => config,
        }
    }

    /// Applies a `config set` style assignment. A value of `-` clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional = |value: &str| {
            if value.is_empty() || value == "-" {
                None
            } else {
                Some(value.to_string())
            }
        };
        match key {
            "storage" => {
                self.storage = value.parse().map_err(|reason| ConfigError::InvalidValue {
                    key: key.into(),
                    reason,
                })?;
            }
            "separator" => {
                if value.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: key.into(),
                        reason: "separator must not be empty".into(),
                    });
                }
                self.separator = value.into();
            }
            "data_file" => self.data_file = optional(value).map(PathBuf::from),
            "omdb_api_key" => self.omdb_api_key = optional(value),
            "site_dir" => self.site_dir = optional(value).map(PathBuf::from),
            "template_dir" => self.template_dir = optional(value).map(PathBuf::from),
            other => return Err(ConfigError::UnknownKey(other.into())),
        }
        Ok(())
    }

    /// Display pairs for `config show`. The API key is masked.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path_or_default = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".into())
        };
        vec![
            ("storage", self.storage.to_string()),
            ("data_file", path_or_default(&self.data_file)),
            ("separator", self.separator.clone()),
            (
                "omdb_api_key",
                match &self.omdb_api_key {
                    Some(_) => "(set)".into(),
                    None => "(not set)".into(),
                },
            ),
            ("site_dir", path_or_default(&self.site_dir)),
            ("template_dir", path_or_default(&self.template_dir)),
        ]
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_base(base.into())
    }

    fn from_base(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
