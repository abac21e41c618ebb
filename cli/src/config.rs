use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Optional `config.toml`. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub color: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Effective settings after merging flags, environment, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub color: bool,
}

impl Settings {
    /// `api_url` is the flag-or-env value clap already merged. Color needs a
    /// terminal and can be switched off by either the flag or the file.
    pub fn resolve(api_url: Option<String>, no_color: bool, file: &FileConfig, is_terminal: bool) -> Self {
        let api_url = api_url
            .or_else(|| file.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let color = is_terminal && !no_color && file.color.unwrap_or(true);
        Self { api_url, color }
    }
}

/// Load the config file named on the command line, or the per-user one if
/// it exists. An explicit path that cannot be read is an error; a missing
/// per-user file is not.
pub fn load_file_config(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    if let Some(path) = explicit {
        info!(config = %path.display(), "loading config");
        return FileConfig::load(path);
    }
    match default_config_path().filter(|path| path.is_file()) {
        Some(path) => {
            info!(config = %path.display(), "loading config");
            FileConfig::load(&path)
        }
        None => {
            debug!("no config file found; using defaults");
            Ok(FileConfig::default())
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasks").join("config.toml"))
}
