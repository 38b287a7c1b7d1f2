use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no invocation path (argv[0]) was provided")]
    MissingInvocation,

    #[error("invocation path is not valid UTF-8: {0}")]
    NonUtf8Invocation(String),

    #[error("invalid launch profile: {0}")]
    Profile(String),

    #[error("launch command is {len} long, limit is {max}")]
    CommandTooLong { len: usize, max: usize },

    #[error("bundled runtime not found at {}", .0.display())]
    MissingRuntime(PathBuf),

    #[error("launch plan has no program to run")]
    EmptyPlan,

    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile(message.into())
    }
}

impl From<toml::de::Error> for LaunchError {
    fn from(err: toml::de::Error) -> Self {
        LaunchError::Profile(err.message().to_string())
    }
}
