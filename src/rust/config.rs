use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = "config.json";
const HOME_ENV: &str = "FEEDBACK_TRIAGE_HOME";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for the model-backed classification path.
///
/// Every field has a default, so a config file only needs the keys it changes.
/// With no `api_key` the HTTP client refuses to call out and every
/// classification takes the keyword fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Output budget for one judgment; the JSON payload is short
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads the config file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// used when present. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve(path, |key| env::var(key).ok())
    }

    fn resolve(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_dir_with(&lookup).join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    log::debug!("Loading config from {:?}", default_path);
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_overrides(lookup))
    }

    /// Returns the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir_with(|key| env::var(key).ok()).join(CONFIG_FILE_NAME)
    }

    fn default_config_dir_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        // 1. Check environment variable
        if let Some(path) = lookup(HOME_ENV) {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific config directory
        if let Some(config_dir) = dirs::config_dir() {
            return config_dir.join("feedback-triage");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".config").join("feedback-triage");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("feedback-triage")
    }

    /// Applies `ANTHROPIC_API_KEY` and the `FEEDBACK_TRIAGE_*` variables on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("FEEDBACK_TRIAGE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("FEEDBACK_TRIAGE_MODEL") {
            self.model = model;
        }
        if let Some(raw) = lookup("FEEDBACK_TRIAGE_MAX_TOKENS") {
            match raw.parse() {
                Ok(max_tokens) => self.max_tokens = max_tokens,
                Err(_) => log::warn!("Ignoring invalid FEEDBACK_TRIAGE_MAX_TOKENS={:?}", raw),
            }
        }
        self
    }

    /// Drops the API key so every classification takes the keyword fallback.
    pub fn offline(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
