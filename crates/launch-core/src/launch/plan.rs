use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub cwd: PathBuf,       // <install dir>/data, possibly relative to our cwd
    pub argv: Vec<String>,  // e.g. ["jre/bin/javaw.exe","-server","-jar","app.jar"]
}

impl LaunchPlan {
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }
}
