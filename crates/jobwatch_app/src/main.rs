//! `jobwatch`: one scrape-diff-notify pass, meant to be started by a scheduler.
mod settings;

use std::process::ExitCode;

use anyhow::{Context, Result};
use jobwatch_engine::{RunError, RunReport, WatchConfig, Watcher};
use jobwatch_logging::{watch_error, watch_info};

use crate::settings::LogSettings;

fn main() -> ExitCode {
    // A .env file is optional; real deployments set the variables directly.
    let dotenv = dotenvy::dotenv();

    let log_settings = match LogSettings::from_lookup(env_lookup) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    jobwatch_logging::initialize(log_settings.level, log_settings.file.as_deref());
    if let Ok(path) = dotenv {
        watch_info!("Loaded environment from {:?}", path);
    }

    match run() {
        Ok(report) => {
            watch_info!(
                "Run complete: {} found, {} new, {} listed, state saved: {}",
                report.found,
                report.fresh,
                report.listed,
                report.state_saved
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<RunError>() {
                Some(run_err) => watch_error!("Run failed ({}): {err:#}", run_err.kind()),
                None => watch_error!("Run failed: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunReport> {
    let config = WatchConfig::from_lookup(env_lookup);
    let watcher = Watcher::from_config(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(watcher.run_once())?;
    Ok(report)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
