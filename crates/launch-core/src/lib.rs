pub mod errors;

pub mod bitness;
pub mod exec;
pub mod install_dir;
pub mod launch;
pub mod profile;
pub mod shell;

pub use bitness::{Bitness, BitnessError};
pub use errors::LaunchError;
pub use install_dir::InstallDir;
pub use launch::{LaunchPlan, WindowsLaunch};
pub use profile::LaunchProfile;
