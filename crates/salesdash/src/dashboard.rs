//! The command-line dashboard: reads the input, prints the view, saves charts

use crate::cli::ConfigOverrides;
use crate::controls::FilterControls;
use crate::output::{download_label_id, save_charts};
use crate::session::{DashboardOutcome, DashboardSession};
use salesdash_common::{DashError, Result};
use salesdash_config::{Config, ConfigCache};
use salesdash_i18n::fluent_args;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A session bound to one input file and one optional config file.
#[derive(Debug)]
pub struct Dashboard {
    session: DashboardSession,
    config: ConfigCache,
    controls: FilterControls,
    overrides: ConfigOverrides,
    input: PathBuf,
    config_path: Option<PathBuf>,
}

impl Dashboard {
    /// `config` must already carry `overrides`
    pub fn new(
        config: Config,
        input: PathBuf,
        config_path: Option<PathBuf>,
        controls: FilterControls,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        Ok(Self {
            session: DashboardSession::new(config.clone())?,
            config: ConfigCache::new(config),
            controls,
            overrides,
            input,
            config_path,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub const fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Live configuration
    pub fn config(&self) -> std::sync::Arc<Config> {
        self.config.get()
    }

    /// Run the pipeline once and print the outcome to `out`.
    ///
    /// Returns whether the run succeeded; processing errors are printed,
    /// never returned.
    #[instrument(skip_all, fields(input = %self.input.display()))]
    pub fn run_once<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let outcome = match std::fs::read(&self.input) {
            Ok(bytes) => self.session.run(&bytes, &self.controls),
            Err(e) => self.session.failure(&DashError::from(e)),
        };

        let view = match outcome {
            DashboardOutcome::Ready(view) => view,
            DashboardOutcome::Failed { message } => {
                writeln!(out, "{message}")?;
                return Ok(false);
            }
        };

        write!(out, "{view}")?;
        writeln!(out)?;

        let localizer = self.session.localizer();
        let directory = &self.session.config().output.directory;
        match save_charts(&view.charts, directory) {
            Ok(paths) => {
                for (chart, path) in view.charts.iter().zip(&paths) {
                    let saved = localizer.message_with(
                        "chart-saved",
                        &fluent_args!["path" => path.display().to_string()],
                    );
                    writeln!(out, "{}: {saved}", localizer.message(download_label_id(chart.kind)))?;
                }
                info!(charts = paths.len(), "Dashboard refreshed");
                Ok(true)
            }
            Err(e) => {
                if let DashboardOutcome::Failed { message } = self.session.failure(&e) {
                    writeln!(out, "{message}")?;
                }
                Ok(false)
            }
        }
    }

    /// Re-read the configuration file and apply it to the session.
    ///
    /// A broken file is reported and the previous configuration stays live.
    #[instrument(skip_all)]
    pub fn reload_config<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let Some(path) = self.config_path.clone() else {
            return Ok(false);
        };

        match self.apply_reload(&path) {
            Ok(()) => {
                writeln!(out, "{}", self.session.localizer().message("watch-reloaded"))?;
                Ok(true)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Configuration reload rejected");
                self.config.update(self.session.config().clone());
                if let DashboardOutcome::Failed { message } = self.session.failure(&e) {
                    writeln!(out, "{message}")?;
                }
                Ok(false)
            }
        }
    }

    fn apply_reload(&mut self, path: &Path) -> Result<()> {
        let fresh = self.config.reload_from(path)?;
        let mut config = (*fresh).clone();
        self.overrides.apply(&mut config);
        self.session.reconfigure(config.clone())?;
        self.config.update(config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{create_temp_dir, csv_fixtures};

    fn dashboard(dir: &Path, csv: &str) -> Dashboard {
        let input = dir.join("vendas.csv");
        std::fs::write(&input, csv).unwrap();
        let mut config = Config::default();
        config.output.directory = dir.join("out");
        Dashboard::new(
            config,
            input,
            None,
            FilterControls::default(),
            ConfigOverrides::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_input_is_reported() {
        let temp = create_temp_dir();
        let mut dashboard = dashboard(temp.path(), csv_fixtures::THREE_MONTHS);
        std::fs::remove_file(dashboard.input()).unwrap();

        let mut out = Vec::new();
        assert!(!dashboard.run_once(&mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Erro ao processar o arquivo: "));
    }

    #[test]
    fn test_reload_without_config_file_is_noop() {
        let temp = create_temp_dir();
        let mut dashboard = dashboard(temp.path(), csv_fixtures::THREE_MONTHS);

        let mut out = Vec::new();
        assert!(!dashboard.reload_config(&mut out).unwrap());
        assert!(out.is_empty());
    }
}
