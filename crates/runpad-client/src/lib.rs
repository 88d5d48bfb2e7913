//! Client SDK for Judge0-style remote code execution services
//!
//! A submission is a short, strictly sequential round trip: the draft is
//! base64-encoded and posted, the returned token is used to fetch the result,
//! and the decoded result is rendered for display. [`SubmissionClient`] covers
//! the two HTTP calls; [`Session`] drives them and owns the display state that
//! [`render`] turns into text.

use async_trait::async_trait;

pub mod config;
pub mod encoding;
pub mod errors;
pub mod http_client;
pub mod languages;
pub mod render;
pub mod session;
pub mod types;

pub use config::{ClientConfig, ConfigLoader, PollSettings};
pub use errors::SubmissionError;
pub use http_client::HttpSubmissionClient;
pub use languages::{find_language, LanguageOption, DEFAULT_LANGUAGE_ID, DEFAULT_SOURCE, LANGUAGES};
pub use render::render;
pub use session::{Outcome, Phase, Session, SessionState};
pub use types::*;

/// SubmissionClient trait for communicating with an execution service
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Encode the draft and create a submission.
    ///
    /// Returns `Ok(None)` when the service accepted the submission without
    /// handing out a token.
    async fn submit(&self, draft: &SubmissionDraft) -> Result<Option<Token>, SubmissionError>;

    /// Fetch and decode the result of a submission
    async fn fetch_result(&self, token: &Token) -> Result<SubmissionResult, SubmissionError>;
}

/// Factory for creating SubmissionClient instances
pub struct SubmissionClientFactory;

impl SubmissionClientFactory {
    /// Create an HTTP client for the configured service
    pub fn create_http_client(
        config: ClientConfig,
    ) -> Result<Box<dyn SubmissionClient>, SubmissionError> {
        Ok(Box::new(HttpSubmissionClient::new(config)?))
    }
}
