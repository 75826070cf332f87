//! Main entry point for the sales dashboard.

use anyhow::Context;
use clap::Parser;
use salesdash::{watch, Args, Dashboard};
use salesdash_common::logging::init_logging;
use salesdash_config::ConfigLoader;
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config_path = ConfigLoader::resolve_path(args.config.as_deref(), |var| std::env::var(var).ok());
    let overrides = args.overrides();
    let mut config = ConfigLoader::load(config_path.as_deref()).context("Failed to load configuration")?;
    overrides.apply(&mut config);
    config
        .validate_all()
        .context("Invalid configuration after command-line overrides")?;

    // Keep the guard alive so the log file is flushed on exit
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting salesdash");

    let mut dashboard = Dashboard::new(config, args.input.clone(), config_path, args.controls(), overrides)
        .context("Failed to start the dashboard")?;

    let mut stdout = std::io::stdout();
    let succeeded = dashboard.run_once(&mut stdout)?;

    if args.watch {
        watch(&mut dashboard, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    }

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Processing failed");
        Ok(ExitCode::FAILURE)
    }
}
