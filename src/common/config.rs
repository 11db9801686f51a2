//! Configuration loading for the dlt-checker
//!
//! Layers, lowest first: built-in defaults, an optional TOML file, then
//! `DLT_*` environment variables. The result is validated before use.

use crate::config::{CheckerConfig, LogLevel};
use crate::errors::{ConfigurationError, DltResult};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> DltResult<CheckerConfig> {
        let mut config = match &self.config_path {
            Some(path) => self.load_from_file(path)?,
            None => CheckerConfig::default(),
        };

        self.apply_overrides(&mut config, |key| env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    fn load_from_file(&self, path: &Path) -> DltResult<CheckerConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into()
        })
    }

    /// Apply `DLT_*` overrides looked up through `lookup`
    fn apply_overrides<F>(
        &self,
        config: &mut CheckerConfig,
        lookup: F,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DLT_DEFAULT_NUM_DRAWS") {
            config.query.default_num_draws =
                parse_override("DLT_DEFAULT_NUM_DRAWS", value, "Invalid draw count")?;
        }
        if let Some(value) = lookup("DLT_PAGE_SIZE") {
            config.query.page_size =
                parse_override("DLT_PAGE_SIZE", value, "Invalid page size")?;
        }
        if let Some(value) = lookup("DLT_WORKER_THREADS") {
            config.query.worker_threads =
                parse_override("DLT_WORKER_THREADS", value, "Invalid thread count")?;
        }
        if let Some(value) = lookup("DLT_INCLUDE_ADDITIONAL") {
            config.query.include_additional =
                parse_override("DLT_INCLUDE_ADDITIONAL", value, "Invalid boolean value")?;
        }
        if let Some(value) = lookup("DLT_LOG_LEVEL") {
            config.logging.level =
                parse_override::<LogLevel>("DLT_LOG_LEVEL", value, "Invalid log level")?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, config: &CheckerConfig, path: P) -> DltResult<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string).map_err(|e| {
            let reason = format!("Failed to write to {}: {}", path.display(), e);
            ConfigurationError::SaveFailed(reason).into()
        })
    }
}

fn parse_override<T: FromStr>(
    field: &str,
    value: String,
    reason: &str,
) -> Result<T, ConfigurationError> {
    value.trim().parse().map_err(|_| ConfigurationError::InvalidValue {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    })
}

/// Generate a sample configuration file
pub fn generate_sample_config<P: AsRef<Path>>(path: P) -> DltResult<()> {
    ConfigLoader::new().save(&CheckerConfig::default(), path)
}
