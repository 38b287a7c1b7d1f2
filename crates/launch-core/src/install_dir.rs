use std::path::PathBuf;

use crate::errors::LaunchError;

pub const UNIX_SEPARATORS: &[char] = &['/'];
pub const WINDOWS_SEPARATORS: &[char] = &['\\', '/'];

/// Directory holding the launcher, inferred from the invocation path.
///
/// `None` means the launcher was started from the current directory, either
/// by bare name or as `./name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallDir(Option<String>);

impl InstallDir {
    pub fn current() -> Self {
        Self(None)
    }

    /// Resolves the install directory from `argv[0]`.
    ///
    /// The directory is everything before the last separator, minus a leading
    /// `./` (double-click runs). A launcher at the filesystem root keeps the
    /// root itself.
    pub fn from_invocation(invocation: &str, separators: &[char]) -> Self {
        let Some(last) = invocation.rfind(separators) else {
            return Self::current();
        };
        if last == 0 {
            return Self(Some(invocation[..1].to_string()));
        }

        let start = if invocation.starts_with('.') && invocation[1..].starts_with(separators) {
            2
        } else {
            0
        };

        if last > start {
            Self(Some(invocation[start..last].to_string()))
        } else {
            Self::current()
        }
    }

    pub fn is_current(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// `<dir>/<child>`, or just `child` for the current directory.
    pub fn join(&self, child: &str) -> String {
        match self.0.as_deref() {
            None => child.to_string(),
            Some(dir) if dir.ends_with(['/', '\\']) => format!("{dir}{child}"),
            Some(dir) => format!("{dir}/{child}"),
        }
    }

    pub fn to_path(&self) -> PathBuf {
        match self.0.as_deref() {
            None => PathBuf::from("."),
            Some(dir) => PathBuf::from(dir),
        }
    }
}

/// `argv[0]` of the running process.
pub fn invocation_path() -> Result<String, LaunchError> {
    let arg = std::env::args_os()
        .next()
        .ok_or(LaunchError::MissingInvocation)?;
    arg.into_string()
        .map_err(|raw| LaunchError::NonUtf8Invocation(raw.to_string_lossy().into_owned()))
}
