use std::sync::OnceLock;

/// Node package runner shipped with the Windows installer.
pub const WINDOWS_NPX: &str = r"C:\Program Files\nodejs\npx.cmd";

/// Elsewhere `npx` is found through `PATH` when the server is launched.
pub const UNIX_NPX: &str = "npx";

/// Executable every transformed server is launched through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    path: String,
}

impl Launcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Package runner for the platform this binary was built for.
    pub fn detect() -> Self {
        static DETECTED: OnceLock<Launcher> = OnceLock::new();
        DETECTED
            .get_or_init(|| Self::for_os(std::env::consts::OS))
            .clone()
    }

    pub fn for_os(os: &str) -> Self {
        match os {
            "windows" => Self::new(WINDOWS_NPX),
            _ => Self::new(UNIX_NPX),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::detect()
    }
}
