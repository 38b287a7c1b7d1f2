use serde::Deserialize;

use crate::bitness::Bitness;
use crate::errors::LaunchError;

const BUNDLED_PROFILE: &str = include_str!("../profiles/lionheart.toml");

/// Everything the launchers need to know about the bundled application.
/// Baked into the binary at build time; packaging edits the TOML, not the code.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchProfile {
    pub application: ApplicationConfig,
    pub unix: UnixConfig,
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    pub splash: String,
    pub archive: String,
    #[serde(default)]
    pub entry_class: Option<String>,
    #[serde(default)]
    pub jvm_flags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnixConfig {
    pub runtime: String,
    #[serde(default = "default_unix_arch")]
    pub arch: String,
    /// Force `./` on the program segment so the shell never searches PATH.
    #[serde(default = "default_true")]
    pub explicit_relative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowsConfig {
    pub runtime_x64: String,
    pub runtime_x86: String,
    #[serde(default)]
    pub archive_mode: ArchiveMode,
}

/// How the archive is handed to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveMode {
    /// `-jar <archive>`
    #[default]
    Jar,
    /// `-cp <archive> <entry-class>`
    Classpath,
}

pub fn parse_profile(contents: &str) -> Result<LaunchProfile, LaunchError> {
    let profile: LaunchProfile = toml::from_str(contents)?;
    profile.validate()?;
    Ok(profile)
}

impl LaunchProfile {
    pub fn bundled() -> Result<Self, LaunchError> {
        parse_profile(BUNDLED_PROFILE)
    }

    pub fn data_dir(&self) -> &str {
        &self.application.data_dir
    }

    pub fn unix_runtime(&self) -> String {
        self.render(&self.unix.runtime, &self.unix.arch)
    }

    pub fn unix_archive(&self) -> String {
        self.render(&self.application.archive, &self.unix.arch)
    }

    pub fn windows_runtime(&self, bitness: Bitness) -> String {
        let template = match bitness {
            Bitness::Bits64 => &self.windows.runtime_x64,
            Bitness::Bits32 => &self.windows.runtime_x86,
        };
        self.render(template, bitness.arch())
    }

    pub fn windows_archive(&self, bitness: Bitness) -> String {
        self.render(&self.application.archive, bitness.arch())
    }

    /// Runtime arguments shared by every template, up to and excluding the
    /// archive reference.
    pub fn jvm_args(&self) -> Vec<String> {
        let mut args = self.application.jvm_flags.clone();
        args.push(format!("-splash:{}", self.application.splash));
        args
    }

    /// Archive reference for `mode`, e.g. `["-jar", "app.jar"]`.
    pub fn archive_args(&self, mode: ArchiveMode, archive: String) -> Vec<String> {
        match mode {
            ArchiveMode::Jar => vec!["-jar".to_string(), archive],
            ArchiveMode::Classpath => vec![
                "-cp".to_string(),
                archive,
                self.application.entry_class.clone().unwrap_or_default(),
            ],
        }
    }

    fn render(&self, template: &str, arch: &str) -> String {
        substitute(
            template,
            &[("VERSION", self.application.version.as_str()), ("ARCH", arch)],
        )
    }

    fn validate(&self) -> Result<(), LaunchError> {
        let app = &self.application;
        for (field, value) in [
            ("application.name", &app.name),
            ("application.version", &app.version),
            ("application.data_dir", &app.data_dir),
            ("application.splash", &app.splash),
            ("application.archive", &app.archive),
            ("unix.runtime", &self.unix.runtime),
            ("unix.arch", &self.unix.arch),
            ("windows.runtime_x64", &self.windows.runtime_x64),
            ("windows.runtime_x86", &self.windows.runtime_x86),
        ] {
            if value.trim().is_empty() {
                return Err(LaunchError::profile(format!("{field} must not be empty")));
            }
        }

        if self.windows.archive_mode == ArchiveMode::Classpath
            && app.entry_class.as_deref().is_none_or(|class| class.trim().is_empty())
        {
            return Err(LaunchError::profile(
                "application.entry_class is required when windows.archive_mode = \"classpath\"",
            ));
        }

        let rendered = [
            self.unix_runtime(),
            self.unix_archive(),
            self.windows_runtime(Bitness::Bits64),
            self.windows_runtime(Bitness::Bits32),
            self.windows_archive(Bitness::Bits64),
        ];
        let unresolved = unresolved_tokens(&rendered);
        if !unresolved.is_empty() {
            return Err(LaunchError::profile(format!(
                "unknown placeholders: {}",
                unresolved.join(", ")
            )));
        }

        Ok(())
    }
}

/// Expands `${KEY}` for known keys; unknown or unterminated tokens stay
/// verbatim so validation can report them.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("${") {
        output.push_str(&rest[..open]);
        let token = &rest[open..];
        let Some(close) = token.find('}') else {
            break;
        };
        let key = &token[2..close];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&token[..=close]),
        }
        rest = &token[close + 1..];
    }
    if let Some(open) = rest.find("${") {
        // only reached for an unterminated token
        output.push_str(&rest[open..]);
    } else {
        output.push_str(rest);
    }
    output
}

fn unresolved_tokens(values: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for value in values {
        let mut cursor = 0usize;
        while let Some(start_rel) = value[cursor..].find("${") {
            let start = cursor + start_rel + 2;
            let token = match value[start..].find('}') {
                Some(end_rel) => {
                    cursor = start + end_rel + 1;
                    value[start..start + end_rel].to_string()
                }
                None => {
                    cursor = value.len();
                    value[start..].to_string()
                }
            };
            if !out.contains(&token) {
                out.push(token);
            }
        }
    }
    out.sort();
    out
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_unix_arch() -> String {
    std::env::consts::ARCH.to_string()
}

fn default_true() -> bool {
    true
}
