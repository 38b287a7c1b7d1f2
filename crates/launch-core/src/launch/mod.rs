use std::path::PathBuf;

use tracing::debug;

use crate::bitness::Bitness;
use crate::errors::LaunchError;
use crate::install_dir::InstallDir;
use crate::profile::{ArchiveMode, LaunchProfile};
use crate::shell::{
    POSIX_MAX_COMMAND, WINDOWS_MAX_COMMAND, check_length, ensure_explicit_relative, quote,
};

mod plan;
pub use plan::LaunchPlan;

#[cfg(test)]
mod tests;

/// Shell command run by the path-resolving launcher:
/// `cd <install dir>/data; <runtime> <flags> -jar <archive>`.
pub fn derive_posix_command(
    profile: &LaunchProfile,
    install_dir: &InstallDir,
) -> Result<String, LaunchError> {
    let mut data_dir = install_dir.join(profile.data_dir());
    if data_dir.starts_with('-') {
        // `cd -x/data` would parse the directory as an option.
        data_dir = ensure_explicit_relative(&data_dir);
    }

    let mut runtime = profile.unix_runtime();
    if profile.unix.explicit_relative && !runtime.starts_with('/') {
        runtime = ensure_explicit_relative(&runtime);
    }

    let mut words = vec![runtime];
    words.extend(profile.jvm_args());
    words.extend(profile.archive_args(ArchiveMode::Jar, profile.unix_archive()));
    let invocation = words
        .iter()
        .map(|word| quote(word))
        .collect::<Vec<_>>()
        .join(" ");

    let command = format!("cd {}; {invocation}", quote(&data_dir));
    check_length(command.len(), POSIX_MAX_COMMAND)?;
    debug!(%command, "derived shell command");
    Ok(command)
}

/// Where the POSIX command expects the bundled runtime to be.
pub fn posix_runtime_path(profile: &LaunchProfile, install_dir: &InstallDir) -> PathBuf {
    install_dir
        .to_path()
        .join(profile.data_dir())
        .join(profile.unix_runtime())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsLaunch {
    /// `start "" /d data /b "<runtime>" ...`, the shell form of `plan`.
    pub command: String,
    pub plan: LaunchPlan,
}

/// Launch for the architecture-selecting launcher. Both bitness variants share
/// flags and archive reference; only the runtime path differs.
pub fn derive_windows_launch(
    profile: &LaunchProfile,
    install_dir: &InstallDir,
    bitness: Bitness,
) -> Result<WindowsLaunch, LaunchError> {
    let runtime = profile.windows_runtime(bitness);
    let mut argv = vec![runtime.clone()];
    argv.extend(profile.jvm_args());
    argv.extend(profile.archive_args(
        profile.windows.archive_mode,
        profile.windows_archive(bitness),
    ));

    let plan = LaunchPlan {
        cwd: install_dir.to_path().join(profile.data_dir()),
        argv,
    };

    let data_dir = to_backslashes(&install_dir.join(profile.data_dir()));
    let mut command = format!(
        "start \"\" /d {} /b \"{}\"",
        cmd_quote(&data_dir),
        to_backslashes(&runtime)
    );
    for arg in plan.args() {
        command.push(' ');
        command.push_str(&cmd_quote(arg));
    }

    check_length(command.encode_utf16().count(), WINDOWS_MAX_COMMAND)?;

    debug!(%command, %bitness, "derived windows launch");
    Ok(WindowsLaunch { command, plan })
}

fn to_backslashes(path: &str) -> String {
    path.replace('/', "\\")
}

fn cmd_quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains([' ', '\t', '&', '|', '^', '<', '>', '(', ')']) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}
