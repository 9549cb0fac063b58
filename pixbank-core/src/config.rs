//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:3000/v1" }
//! }
//! ```
//! Fields the client doesn't manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000/v1";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "PIXBANK_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Effective API base URL, without trailing slash
    pub api_url: String,
    /// True when `PIXBANK_API_URL` supplied `api_url`
    pub api_url_from_env: bool,
    /// URL stored in settings.json, if any
    saved_api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_url_from_env: false,
            saved_api_url: None,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The API URL comes from, in order: `PIXBANK_API_URL`, settings.json,
    /// the built-in default.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with_override(data_dir, std::env::var(API_URL_ENV).ok())
    }

    /// Same as [`Config::load`] with the environment override passed in
    pub fn load_with_override(data_dir: &Path, env_url: Option<String>) -> Result<Self> {
        let raw = read_settings(data_dir)?;
        let saved_api_url = raw.api.base_url.clone();

        let (api_url, api_url_from_env) = match env_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => (normalize_api_url(&url)?, true),
            None => match &saved_api_url {
                Some(url) => (normalize_api_url(url)?, false),
                None => (DEFAULT_API_URL.to_string(), false),
            },
        };

        Ok(Self {
            api_url,
            api_url_from_env,
            saved_api_url,
        })
    }

    /// Save config to the data directory, preserving unmanaged settings
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;
        settings.api.base_url = self.saved_api_url.clone();

        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }

    /// Set and remember the API base URL
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let url = normalize_api_url(url)?;
        self.saved_api_url = Some(url.clone());
        if !self.api_url_from_env {
            self.api_url = url;
        }
        Ok(())
    }

    /// Forget the saved API URL, falling back to the default
    pub fn reset_api_url(&mut self) {
        self.saved_api_url = None;
        if !self.api_url_from_env {
            self.api_url = DEFAULT_API_URL.to_string();
        }
    }

    pub fn saved_api_url(&self) -> Option<&str> {
        self.saved_api_url.as_deref()
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

/// Validate an http(s) URL and drop the trailing slash
pub fn normalize_api_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", trimmed, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::Config(format!(
                "Invalid API URL '{}': unsupported scheme '{}'",
                trimmed, other
            )))
        }
    }
    if parsed.host_str().is_none() {
        return Err(Error::Config(format!("Invalid API URL '{}': missing host", trimmed)));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
