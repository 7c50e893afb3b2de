use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::config::types::Config;

pub fn load_config() -> Result<Config> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            debug!("no config directory on this platform, using built-in defaults");
            Ok(Config::default())
        }
    }
}

/// A missing file is not an error: the built-in defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using built-in defaults");
        return Ok(Config::default());
    }

    debug!(path = %path.display(), "loading config file");
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codefixer").join("config.toml"))
}
