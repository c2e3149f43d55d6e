//! Settings for the embedded catalog client
//!
//! A single optional TOML file; every field has a default so a missing file
//! or a partial file both work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rickmorty_core::{Error, Result};

/// Application settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

/// Remote catalog endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the catalog API (must end with a trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Search input settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Quiescence window after the last keystroke before a search fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Favourites persistence settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Explicit favourites file path; platform data dir when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    /// Resolve the favourites file path, falling back to the platform data
    /// dir.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => {
                let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
                base.join("rickmorty").join("favourites.json")
            }
        }
    }
}

fn default_base_url() -> String {
    rickmorty_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    500
}

/// Load settings from a TOML file; a missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(Error::config(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("invalid settings file {}: {e}", path.display())))
}
