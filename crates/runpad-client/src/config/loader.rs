//! Configuration loader for YAML files and environment resolution

use std::env;
use std::path::Path;
use tokio::fs;

use crate::config::types::ClientConfig;
use crate::errors::SubmissionError;

pub const API_URL_ENV: &str = "COMPILER_API_URL";
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";
pub const API_HOST_ENV: &str = "RAPIDAPI_HOST";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig, SubmissionError> {
        let config = Self::resolve(Some(path.as_ref())).await?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_str(content: &str) -> Result<ClientConfig, SubmissionError> {
        let mut config = Self::parse(content)?;
        Self::resolve_environment(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from environment variables alone
    pub fn from_env() -> Result<ClientConfig, SubmissionError> {
        let mut config = ClientConfig::default();
        Self::resolve_environment(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an optional file plus the environment,
    /// without validating it. Callers layer their own overrides on top and
    /// then call [`ClientConfig::validate`].
    pub async fn resolve(path: Option<&Path>) -> Result<ClientConfig, SubmissionError> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).await.map_err(|e| {
                    SubmissionError::Config(format!(
                        "Failed to read config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::parse(&content)?
            }
            None => ClientConfig::default(),
        };

        Self::resolve_environment(&mut config);
        Ok(config)
    }

    fn parse(content: &str) -> Result<ClientConfig, SubmissionError> {
        serde_yaml::from_str(content)
            .map_err(|e| SubmissionError::Config(format!("Failed to parse YAML config: {}", e)))
    }

    fn resolve_environment(config: &mut ClientConfig) {
        if let Some(env_var) = &config.api_key_env {
            if let Ok(api_key) = env::var(env_var) {
                config.api_key = Some(api_key);
            }
        }

        if let Some(env_var) = &config.api_host_env {
            if let Ok(api_host) = env::var(env_var) {
                config.api_host = Some(api_host);
            }
        }

        // Well-known variables only fill in what the file left unset
        if config.base_url.trim().is_empty() {
            if let Some(base_url) = non_empty_var(API_URL_ENV) {
                config.base_url = base_url;
            }
        }

        if config.api_key.is_none() && config.api_key_env.is_none() {
            config.api_key = non_empty_var(API_KEY_ENV);
        }

        if config.api_host.is_none() && config.api_host_env.is_none() {
            config.api_host = non_empty_var(API_HOST_ENV);
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
