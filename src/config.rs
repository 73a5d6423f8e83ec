use crate::report::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from the `--config` TOML file.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub min_count: u64,
    pub filter: Option<String>,
    pub limit: Option<usize>,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_count: 1,
            filter: None,
            limit: None,
            format: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Parse and validate config from TOML text. `path` is only used in errors.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.report.min_count == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "report.min_count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load the config file given with `--config`, or defaults when there is none.
///
/// Nothing is read implicitly: without an explicit path the run depends only
/// on the input file and the command line.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = explicit else {
        tracing::debug!("no config file given, using defaults");
        return Ok(AppConfig::default());
    };

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    AppConfig::from_toml(&contents, path)
}

/// Errors from loading the config file.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid {
        path: PathBuf,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            ConfigError::Invalid { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}
