#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use launch_core::install_dir::{WINDOWS_SEPARATORS, invocation_path};
use launch_core::{InstallDir, LaunchProfile, bitness, exec, launch};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "lionheart-launcher.log";

fn main() {
    // Release builds have no console, so failures also go to a log file.
    let log_file = if cfg!(all(windows, not(debug_assertions))) {
        open_log_file(&std::env::temp_dir())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_file.map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file))))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            error!("launch failed: {err:#}");
            exec::LAUNCH_FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let profile = LaunchProfile::bundled().context("Failed to load bundled launch profile")?;
    let invocation = invocation_path()?;

    let install_dir = InstallDir::from_invocation(&invocation, WINDOWS_SEPARATORS);
    debug!(%invocation, ?install_dir, "resolved install directory");

    let bitness = bitness::detect_or_default(bitness::detect());
    info!(%bitness, "selected runtime bitness");

    let launch = launch::derive_windows_launch(&profile, &install_dir, bitness)?;
    debug!(command = %launch.command, "launch command");

    let status = exec::spawn_plan(&launch.plan)
        .with_context(|| format!("Failed to launch {}", profile.application.name))?;
    Ok(exec::exit_code(status))
}

fn open_log_file(dir: &Path) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .ok()
}
