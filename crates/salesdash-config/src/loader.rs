//! Configuration loading utilities

use crate::Config;
use salesdash_common::DashError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "SALESDASH_CONFIG";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "salesdash.yaml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |var| std::env::var(var).ok())
    }

    /// Load configuration from a YAML file, reading overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "Parsed configuration file");

        Self::apply_overrides_from(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the explicit path, `SALESDASH_CONFIG`, or
    /// `salesdash.yaml`, falling back to defaults when none exists
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        Self::load_with(explicit, |var| std::env::var(var).ok())
    }

    /// Same as [`ConfigLoader::load`] with an injectable environment
    pub fn load_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::resolve_path(explicit, &lookup) {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                Self::load_config_with(path, lookup)
            }
            None => {
                info!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_overrides_from(&mut config, lookup)?;
                config.validate_all()?;
                Ok(config)
            }
        }
    }

    /// Pick the configuration file to read, if any
    pub fn resolve_path<F>(explicit: Option<&Path>, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| std::env::var(var).ok())
    }

    /// Apply overrides, reading variables through `lookup`
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("SALESDASH_LOCALE") {
            config.data.locale = locale;
        }

        if let Some(level) = lookup("SALESDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(directory) = lookup("SALESDASH_OUTPUT_DIR") {
            config.output.directory = PathBuf::from(directory);
        }

        if let Some(delimiter) = lookup("SALESDASH_CSV_DELIMITER") {
            config.data.delimiter = Some(parse_delimiter(&delimiter).ok_or_else(|| {
                ConfigError::EnvParseError {
                    var: "SALESDASH_CSV_DELIMITER".to_string(),
                    source: format!("expected a single character, got '{delimiter}'").into(),
                }
            })?);
        }

        if let Some(day_first) = lookup("SALESDASH_DAY_FIRST") {
            config.data.day_first =
                day_first
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::EnvParseError {
                        var: "SALESDASH_DAY_FIRST".to_string(),
                        source: Box::new(e),
                    })?;
        }

        Ok(())
    }
}

fn parse_delimiter(value: &str) -> Option<char> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Some('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(
            &mut config,
            env(&[
                ("SALESDASH_LOCALE", "en-US"),
                ("SALESDASH_LOG_LEVEL", "debug"),
                ("SALESDASH_OUTPUT_DIR", "/tmp/charts"),
                ("SALESDASH_CSV_DELIMITER", "tab"),
                ("SALESDASH_DAY_FIRST", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.data.locale, "en-US");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.directory, PathBuf::from("/tmp/charts"));
        assert_eq!(config.data.delimiter, Some('\t'));
        assert!(config.data.day_first);
    }

    #[test]
    fn test_bad_override_names_the_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(&mut config, env(&[("SALESDASH_DAY_FIRST", "sim")]))
            .unwrap_err();
        assert!(err.to_string().contains("SALESDASH_DAY_FIRST"));

        let err = ConfigLoader::apply_overrides_from(&mut config, env(&[("SALESDASH_CSV_DELIMITER", ";;")]))
            .unwrap_err();
        assert!(err.to_string().contains("SALESDASH_CSV_DELIMITER"));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Some(';'));
        assert_eq!(parse_delimiter("\\t"), Some('\t'));
        assert_eq!(parse_delimiter(""), None);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = ConfigLoader::resolve_path(
            Some(Path::new("custom.yaml")),
            env(&[(CONFIG_PATH_ENV, "other.yaml")]),
        );
        assert_eq!(path, Some(PathBuf::from("custom.yaml")));

        let path = ConfigLoader::resolve_path(None, env(&[(CONFIG_PATH_ENV, "other.yaml")]));
        assert_eq!(path, Some(PathBuf::from("other.yaml")));
    }

    #[test]
    fn test_config_error_converts() {
        let err = ConfigError::EnvParseError {
            var: "X".to_string(),
            source: "bad".into(),
        };
        let dash: DashError = err.into();
        assert!(dash.to_string().starts_with("Configuration error"));
    }
}
