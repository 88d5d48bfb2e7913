use anyhow::Result;
use clap::Args;
use runpad_client::{ClientConfig, ConfigLoader};
use std::path::Path;

/// Command-line values that take precedence over the config file and the
/// environment
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    #[clap(long, global = true, help = "Execution service base URL [default: $COMPILER_API_URL]")]
    pub api_url: Option<String>,

    #[clap(long, global = true, help = "Value of the X-RapidAPI-Key header [default: $RAPIDAPI_KEY]")]
    pub api_key: Option<String>,

    #[clap(long, global = true, help = "Value of the X-RapidAPI-Host header [default: $RAPIDAPI_HOST]")]
    pub api_host: Option<String>,

    #[clap(long, global = true, help = "Per-request timeout in seconds (no timeout when unset)")]
    pub timeout_secs: Option<u64>,

    #[clap(
        long,
        global = true,
        help = "Re-fetch a queued or processing result up to this many times"
    )]
    pub poll_attempts: Option<u32>,

    #[clap(long, global = true, help = "Delay between re-fetches in milliseconds")]
    pub poll_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(api_url) = &self.api_url {
            config.base_url = api_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(api_host) = &self.api_host {
            config.api_host = Some(api_host.clone());
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        if let Some(max_attempts) = self.poll_attempts {
            config.poll.max_attempts = max_attempts;
        }
        if let Some(interval_ms) = self.poll_interval_ms {
            config.poll.interval_ms = interval_ms;
        }
    }
}

/// Resolve file and environment configuration, apply overrides, validate
pub async fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ClientConfig> {
    let mut config = ConfigLoader::resolve(path).await?;
    overrides.apply(&mut config);
    config.validate()?;
    log::debug!("Using execution service at {}", config.endpoint());
    Ok(config)
}
