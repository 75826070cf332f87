//! Command-line arguments

use crate::controls::FilterControls;
use chrono::NaiveDate;
use clap::Parser;
use salesdash_config::Config;
use std::path::PathBuf;

/// Sales growth dashboard: monthly metrics and charts from a CSV export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file with Data, Produto and Venda_Total columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// YAML configuration file
    #[arg(short, long, env = "SALESDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Product to keep; repeat for several, omit for all
    #[arg(short, long = "product")]
    pub products: Vec<String>,

    /// First day kept (YYYY-MM-DD); defaults to the earliest sale
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day kept (YYYY-MM-DD); defaults to the latest sale
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Directory the chart PNGs are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Keep running and refresh whenever the CSV or the configuration changes
    #[arg(short, long)]
    pub watch: bool,

    /// Log filter directive, e.g. `debug` or `salesdash_data=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn controls(&self) -> FilterControls {
        FilterControls::new(self.products.clone(), self.start, self.end)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Settings given on the command line; they win over the file and the
/// environment, also after a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(directory) = &self.output_dir {
            config.output.directory.clone_from(directory);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
