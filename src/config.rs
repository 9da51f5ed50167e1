use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;

use crate::error::{Error, Result};
use crate::mcp::Launcher;

const APP_DIR: &str = "systemprompt-mcp";
const CONFIG_FILE: &str = "config.json";

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub launcher: Option<String>,
}

impl ConfigFile {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Cannot determine config directory"))?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load `path`, or `Ok(None)` when there is no file there.
    pub async fn load_from(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cfg = serde_json::from_str::<Self>(&content).map_err(|e| {
            Error::config(format!("{}: {e}", path.display()))
        })?;
        Ok(Some(cfg))
    }
}

/// Values explicitly given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub launcher: Option<String>,
}

/// Fully resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub launcher: Launcher,
}

impl Settings {
    /// Overrides beat the config file; a missing API key means an empty one.
    pub fn resolve(overrides: Overrides, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let base_url = overrides
            .base_url
            .or(file.base_url)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                Error::config("no API base URL configured (use --base-url or SYSTEMPROMPT_API_URL)")
            })?;
        let api_key = overrides.api_key.or(file.api_key).unwrap_or_default();
        let launcher = overrides
            .launcher
            .or(file.launcher)
            .map(Launcher::new)
            .unwrap_or_else(Launcher::detect);

        Ok(Self {
            base_url,
            api_key,
            launcher,
        })
    }
}
