use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::SubmissionError;

/// Connection settings for the remote execution service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable to read the API key from
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub api_host: Option<String>,
    /// Environment variable to read the API host from
    #[serde(default)]
    pub api_host_env: Option<String>,
    /// Per-request transport timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub poll: PollSettings,
}

/// Re-fetching of results the service still reports as queued or processing.
/// Disabled unless `max_attempts` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default)]
    pub max_attempts: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PollSettings {
    pub fn enabled(&self) -> bool {
        self.max_attempts > 0
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_poll(mut self, max_attempts: u32, interval_ms: u64) -> Self {
        self.poll = PollSettings {
            max_attempts,
            interval_ms,
        };
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without surrounding whitespace or a trailing slash
    pub fn endpoint(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), SubmissionError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(SubmissionError::Config(
                "API base URL is not set (use COMPILER_API_URL, a config file or --api-url)"
                    .to_string(),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SubmissionError::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        if let Err(e) = reqwest::Url::parse(self.endpoint()) {
            return Err(SubmissionError::Config(format!(
                "API base URL '{}' is not a valid URL: {}",
                base_url, e
            )));
        }

        if self.poll.enabled() && self.poll.interval_ms == 0 {
            return Err(SubmissionError::Config(
                "poll.interval_ms must be greater than zero when polling is enabled".to_string(),
            ));
        }

        Ok(())
    }
}
