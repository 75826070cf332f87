//! Default values for every configuration section.
//!
//! The chart defaults reproduce the fixed look of the dashboard: DejaVu Sans,
//! a light grid, a blue trend line, sky-blue total bars and orange growth.

use crate::schema::{CacheConfig, ChartsConfig, Config, DataConfig, OutputConfig, StyleConfig};
use salesdash_common::logging::LoggingConfig;
use std::path::PathBuf;

/// Locale used when nothing is configured.
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Default chart width shared by all charts.
pub const DEFAULT_CHART_WIDTH: u32 = 1200;

/// Default height of the single-series charts.
pub const DEFAULT_CHART_HEIGHT: u32 = 500;

/// Default height of the combined chart.
pub const DEFAULT_COMBINED_HEIGHT: u32 = 600;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            charts: ChartsConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            delimiter: None,
            day_first: false,
            currency_symbol: "R$".to_string(),
            preview_rows: 5,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            combined_height: DEFAULT_COMBINED_HEIGHT,
            style: StyleConfig::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            title_size: 22,
            label_size: 16,
            grid: true,
            grid_opacity: 0.3,
            background: "#ffffff".to_string(),
            line_color: "#0000ff".to_string(),
            bar_color: "#87ceeb".to_string(),
            bar_opacity: 0.7,
            positive_color: "#008000".to_string(),
            negative_color: "#ff0000".to_string(),
            growth_bar_opacity: 0.8,
            growth_line_color: "#ffa500".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_datasets: 8,
            max_reports: 256,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
