use anyhow::Result;
use launch_core::exec;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
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

#[cfg(unix)]
fn run() -> Result<i32> {
    use anyhow::Context;
    use launch_core::install_dir::{UNIX_SEPARATORS, invocation_path};
    use launch_core::{InstallDir, LaunchProfile, launch};
    use tracing::debug;

    let profile = LaunchProfile::bundled().context("Failed to load bundled launch profile")?;
    let invocation = invocation_path()?;

    let install_dir = InstallDir::from_invocation(&invocation, UNIX_SEPARATORS);
    debug!(%invocation, ?install_dir, "resolved install directory");

    exec::ensure_runtime(&launch::posix_runtime_path(&profile, &install_dir))?;
    let command = launch::derive_posix_command(&profile, &install_dir)?;

    let status = exec::run_shell(&command)
        .with_context(|| format!("Failed to launch {}", profile.application.name))?;
    Ok(exec::exit_code(status))
}

#[cfg(not(unix))]
fn run() -> Result<i32> {
    anyhow::bail!("the shell launcher only runs on unix hosts; use lionheart-launcher-win")
}
