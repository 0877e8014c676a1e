//! Client configuration.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file,
//! then `CARE_DASHBOARD_*` environment variables. The binary applies CLI
//! flags on top.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "care-dashboard.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CARE_DASHBOARD";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Provider display name for the greeting
    pub provider_name: Option<String>,
    /// How long the update success banner stays up
    pub success_display_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            api_token: None,
            provider_name: None,
            success_display_secs: 3,
        }
    }
}

impl ClientConfig {
    /// Load from defaults, file and environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let loaded: ClientConfig = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {}",
                url
            )));
        }
        if self.success_display_secs == 0 {
            return Err(ConfigError::Invalid(
                "success_display_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_secs(self.success_display_secs)
    }
}
