//! Application Configuration
//! Optional JSON settings file with defaults for every field.

use crate::data::{DataSource, DEFAULT_MIN_QUERY_CHARS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "absentee_lookup.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("min_query_chars must be at least 1")]
    InvalidMinQueryChars,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path or http(s) URL of the district CSV
    pub data_source: String,
    pub min_query_chars: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub export_width: u32,
    pub export_height: u32,
    /// Open exported PNGs with the system viewer
    pub open_after_export: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: "district_data.csv".to_string(),
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            window_width: 1100.0,
            window_height: 760.0,
            export_width: 1000,
            export_height: 600,
            open_after_export: true,
        }
    }
}

impl AppConfig {
    /// Load from an explicit file, or from [`DEFAULT_CONFIG_FILE`] if present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_chars == 0 {
            return Err(ConfigError::InvalidMinQueryChars);
        }
        Ok(())
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.min_query_chars, 2);
        assert_eq!(
            config.data_source(),
            DataSource::File(PathBuf::from("district_data.csv"))
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_source": "https://example.org/d.csv", "export_width": 800}}"#)
            .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.data_source(),
            DataSource::Url("https://example.org/d.csv".into())
        );
        assert_eq!(config.export_width, 800);
        assert_eq!(config.export_height, 600);
        assert_eq!(config.min_query_chars, 2);
    }

    #[test]
    fn rejects_zero_min_query_chars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_query_chars": 0}}"#).unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::InvalidMinQueryChars)
        ));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/absentee.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
