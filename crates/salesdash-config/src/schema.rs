//! Configuration schema definitions with serde and validator derives.

use salesdash_common::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Input parsing and presentation of the loaded data
    #[validate(nested)]
    pub data: DataConfig,

    /// Chart sizes and look
    #[validate(nested)]
    pub charts: ChartsConfig,

    /// Memo cache capacities
    #[validate(nested)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[validate(custom(function = "crate::validation::validate_logging"))]
    pub logging: LoggingConfig,

    /// Where exported charts are written
    #[validate(nested)]
    pub output: OutputConfig,
}

/// Input parsing and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// UI and weekday-name locale, e.g. `pt-BR`
    #[validate(custom(
        function = "crate::validation::validate_locale",
        message = "Locale must be one of: pt-BR, en-US"
    ))]
    pub locale: String,

    /// Field delimiter; sniffed from the header when absent
    #[validate(custom(
        function = "crate::validation::validate_delimiter",
        message = "Delimiter must be one of: ',', ';', tab, '|'"
    ))]
    pub delimiter: Option<char>,

    /// Read `03/04/2024` as 3 April instead of March 4
    pub day_first: bool,

    /// Symbol printed before monetary amounts
    #[validate(length(min = 1, max = 8, message = "Currency symbol must be 1 to 8 characters"))]
    pub currency_symbol: String,

    /// Number of filtered records shown in the preview table
    #[validate(range(min = 1, max = 1000, message = "Preview rows must be between 1 and 1000"))]
    pub preview_rows: usize,
}

/// Chart dimensions and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Width of every chart in pixels
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub width: u32,

    /// Height of the monthly sales and growth charts
    #[validate(range(min = 150, max = 4000, message = "Height must be between 150 and 4000 pixels"))]
    pub height: u32,

    /// Height of the combined dual-axis chart
    #[validate(range(min = 150, max = 4000, message = "Height must be between 150 and 4000 pixels"))]
    pub combined_height: u32,

    /// Fixed look of all charts
    #[validate(nested)]
    pub style: StyleConfig,
}

/// Fonts, grid and colors shared by the three charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StyleConfig {
    /// Font family for captions and labels
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Caption font size
    #[validate(range(min = 8, max = 96, message = "Title size must be between 8 and 96"))]
    pub title_size: u32,

    /// Axis label font size
    #[validate(range(min = 6, max = 72, message = "Label size must be between 6 and 72"))]
    pub label_size: u32,

    /// Whether to draw grid lines
    pub grid: bool,

    /// Grid line opacity
    #[validate(range(min = 0.0, max = 1.0, message = "Grid opacity must be between 0 and 1"))]
    pub grid_opacity: f64,

    /// Background color
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub background: String,

    /// Monthly sales line color
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub line_color: String,

    /// Monthly total bar color in the combined chart
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub bar_color: String,

    /// Opacity of the monthly total bars
    #[validate(range(min = 0.0, max = 1.0, message = "Bar opacity must be between 0 and 1"))]
    pub bar_opacity: f64,

    /// Growth bar color for non-negative months
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub positive_color: String,

    /// Growth bar color for negative months
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub negative_color: String,

    /// Opacity of the growth bars
    #[validate(range(min = 0.0, max = 1.0, message = "Growth bar opacity must be between 0 and 1"))]
    pub growth_bar_opacity: f64,

    /// Growth line color in the combined chart
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub growth_line_color: String,
}

/// Memo cache capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CacheConfig {
    /// Parsed uploads kept by content digest
    #[validate(range(min = 1, max = 64, message = "Max datasets must be between 1 and 64"))]
    pub max_datasets: u64,

    /// Metrics reports kept by selection fingerprint
    #[validate(range(min = 1, max = 10000, message = "Max reports must be between 1 and 10000"))]
    pub max_reports: u64,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the exported PNG files
    #[validate(custom(function = "crate::validation::validate_directory"))]
    pub directory: PathBuf,
}

impl Config {
    /// Validate the whole configuration tree.
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, crate::ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Serialize to YAML, e.g. to write a starter file.
    pub fn to_yaml(&self) -> Result<String, crate::ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::logging::LogFormat;
    use salesdash_common::test_utils::config_fixtures;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = Config::from_yaml(config_fixtures::MINIMAL_YAML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_yaml() {
        let config = Config::from_yaml(config_fixtures::FULL_YAML).unwrap();
        assert_eq!(config.data.locale, "en-US");
        assert_eq!(config.data.delimiter, Some(';'));
        assert!(config.data.day_first);
        assert_eq!(config.data.currency_symbol, "US$");
        assert_eq!(config.data.preview_rows, 5);
        assert_eq!(config.charts.width, 800);
        assert_eq!(config.charts.combined_height, 500);
        assert!(!config.charts.style.grid);
        assert_eq!(config.cache.max_reports, 32);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        // not in the file
        assert!((config.charts.style.bar_opacity - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        config.charts.width = 50;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.charts.style.grid_opacity = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.data.preview_rows = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.data.currency_symbol = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nested_errors_name_the_field() {
        let mut config = Config::default();
        config.charts.style.line_color = "blue".to_string();
        let errors = config.validate().unwrap_err();
        let rendered = errors.to_string();
        assert!(rendered.contains("line_color"), "{rendered}");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }
}
