use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::info;

use crate::errors::LaunchError;
use crate::launch::LaunchPlan;
use crate::shell::{WINDOWS_MAX_COMMAND, check_length, command_line_len};

/// Exit code reported when the launcher fails before a child exists.
pub const LAUNCH_FAILURE: i32 = 1;

/// Runs `command` through `/bin/sh` and waits for it.
#[cfg(unix)]
pub fn run_shell(command: &str) -> Result<ExitStatus, LaunchError> {
    let mut shell = shell_command(command);
    info!(%command, "starting shell command");
    shell
        .status()
        .map_err(|err| LaunchError::spawn(shell.get_program(), err))
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("/bin/sh");
    shell.arg("-c").arg(command);
    scrub_shell_env(&mut shell);
    shell
}

/// `CDPATH` would let a relative `cd` land outside the install directory.
#[cfg(unix)]
fn scrub_shell_env(shell: &mut Command) {
    shell.env_remove("CDPATH");
}

/// Starts the plan's program directly and waits for it.
///
/// The command line, with the program made absolute, must fit the Windows
/// `CreateProcessW` limit on every host.
pub fn spawn_plan(plan: &LaunchPlan) -> Result<ExitStatus, LaunchError> {
    let cwd = absolutize(&plan.cwd)?;
    let program = plan
        .argv
        .first()
        .map(|program| cwd.join(program))
        .ok_or(LaunchError::EmptyPlan)?;
    check_length(command_line_len(&program, plan.args()), WINDOWS_MAX_COMMAND)?;
    ensure_runtime(&program)?;

    let mut command = Command::new(&program);
    command.args(plan.args()).current_dir(&cwd);
    hide_console(&mut command);

    info!(program = %program.display(), cwd = %cwd.display(), "starting runtime");
    command
        .status()
        .map_err(|err| LaunchError::spawn(&program, err))
}

#[cfg(windows)]
fn hide_console(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console(_command: &mut Command) {}

pub fn ensure_runtime(path: &Path) -> Result<(), LaunchError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LaunchError::MissingRuntime(path.to_path_buf()))
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, LaunchError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| LaunchError::io("resolving the current directory", err))?;
    Ok(cwd.join(path))
}

/// The child's exit code, or `128 + signal` for a child killed by a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    LAUNCH_FAILURE
}
