use blog_api::DEFAULT_BASE_URL;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl Settings {
    /// Layer the optional config file and `BLOGDESK_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = std::env::var("BLOGDESK_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(default_config_path);

        let mut builder = Config::builder();
        if let Some(path) = config_path {
            tracing::debug!("Reading config from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.api_base)
    }
}

/// `BLOGDESK_API_BASE` style overrides; `__` separates nested keys.
fn environment() -> Environment {
    Environment::with_prefix("BLOGDESK")
        .prefix_separator("_")
        .separator("__")
}

/// `<config dir>/blogdesk/config.toml`
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("blogdesk").join("config.toml"))
}

pub fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::Invalid("api_base is required".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Invalid(
            "api_base must be a valid HTTP(S) URL".to_string(),
        ));
    }
    Ok(())
}
