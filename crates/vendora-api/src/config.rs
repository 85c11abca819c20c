//! # API Configuration
//!
//! Where the remote API lives and where the session token is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENDORA_API_URL=https://api.shop.test                              │
//! │     VENDORA_TIMEOUT_SECS=15                                            │
//! │     VENDORA_TOKEN_PATH=/var/lib/vendora/token                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vendora-admin/vendora.toml (Linux)                       │
//! │     ~/Library/Application Support/com.vendora.admin/vendora.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000, 30s timeout, token in the data dir          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # vendora.toml
//! base_url = "https://api.shop.test"
//! timeout_secs = 15
//! token_path = "/var/lib/vendora/token"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiClientError, ApiResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "vendora.toml";

const TOKEN_FILE_NAME: &str = "token";

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_token_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(TOKEN_FILE_NAME))
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "vendora", "admin")
}

// =============================================================================
// Api Configuration
// =============================================================================

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Where the bearer token is persisted. `None` keeps it in memory only.
    #[serde(default = "default_token_path")]
    pub token_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            token_path: default_token_path(),
        }
    }
}

impl ApiConfig {
    /// A config pointing at `base_url` with an in-memory token.
    pub fn for_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            token_path: None,
            ..ApiConfig::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (vendora.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.base_url)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiClientError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ApiClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("VENDORA_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.base_url = url;
        }

        if let Ok(timeout) = std::env::var("VENDORA_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric VENDORA_TIMEOUT_SECS"),
            }
        }

        if let Ok(path) = std::env::var("VENDORA_TOKEN_PATH") {
            self.token_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Base URL with any trailing slash removed.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
