//! TOML configuration file parsing and loading
//!
//! The configuration file is optional. When present, its values sit between
//! the command line (which wins) and the built-in defaults.

use super::args::{Args, LOG_FORMATS, LOG_LEVELS};
use crate::core::logging::DEFAULT_LOG_LEVEL;
use crate::core::validation::{validate_base_url, ValidationError};
use crate::service::DEFAULT_BASE_URL;
use crate::storage::paths::APP_DIR_NAME;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "vtdesk.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Error in configuration file {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Values read from the configuration file; unset keys stay `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    /// `Some(None)` when the file explicitly disables file logging
    pub log_file: Option<Option<PathBuf>>,
    pub color: Option<bool>,
}

impl FileConfig {
    /// `<config dir>/VirustotalDesktop/vtdesk.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration file
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present and an empty configuration otherwise.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No configuration file found");
                    return Ok(Self::default());
                }
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
        Self::parse(&contents, &path)
    }

    /// Parse configuration text; `path` is used for error reporting only
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let table = toml::from_str::<toml::Table>(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::default();
        config
            .apply_toml_values(&table)
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Apply recognised keys from a TOML table; unknown keys are ignored
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ValidationError> {
        if let Some(base_url) = string_value(config, "base-url")? {
            self.base_url = Some(validate_base_url(&base_url)?);
        }
        if let Some(data_dir) = string_value(config, "data-dir")? {
            self.data_dir = Some(PathBuf::from(data_dir));
        }
        if let Some(log_level) = string_value(config, "log-level")? {
            self.log_level = Some(one_of("log-level", &log_level, &LOG_LEVELS)?);
        }
        if let Some(log_format) = string_value(config, "log-format")? {
            self.log_format = Some(one_of("log-format", &log_format, &LOG_FORMATS)?);
        }
        if let Some(log_file) = string_value(config, "log-file")? {
            if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                self.log_file = Some(None);
            } else {
                self.log_file = Some(Some(PathBuf::from(log_file)));
            }
        }
        if let Some(value) = config.get("color") {
            let color = value
                .as_bool()
                .ok_or_else(|| ValidationError::new("'color' must be true or false"))?;
            self.color = Some(color);
        }
        Ok(())
    }
}

fn string_value(config: &toml::Table, key: &str) -> Result<Option<String>, ValidationError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ValidationError::new(&format!("'{}' must be a string", key))),
    }
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> Result<String, ValidationError> {
    let lowered = value.to_ascii_lowercase();
    if allowed.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(ValidationError::new(&format!(
            "Invalid {} '{}'. Expected one of: {}",
            key,
            value,
            allowed.join(", ")
        )))
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    /// `None` means the platform data directory
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl Settings {
    /// Combine command line, configuration file and defaults
    ///
    /// `terminal_color` is the fallback when neither source decides colour.
    pub fn resolve(
        args: &Args,
        file: FileConfig,
        terminal_color: bool,
    ) -> Result<Self, ValidationError> {
        let base_url = match &args.base_url {
            Some(url) => validate_base_url(url)?,
            None => file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        Ok(Self {
            base_url,
            data_dir: args.data_dir.clone().or(file.data_dir),
            log_level: args
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: args
                .log_format
                .clone()
                .or(file.log_format)
                .unwrap_or_else(|| "text".to_string()),
            log_file: args.log_file_override().or(file.log_file).flatten(),
            color: args
                .color_override()
                .or(file.color)
                .unwrap_or(terminal_color),
        })
    }
}
