use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response, Url};

use crate::config::ClientConfig;
use crate::errors::SubmissionError;
use crate::types::{
    CreatedSubmission, SubmissionDraft, SubmissionRequest, SubmissionResponse, SubmissionResult,
    Token,
};
use crate::SubmissionClient;

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

const SUBMISSION_QUERY: [(&str, &str); 2] = [("base64_encoded", "true"), ("fields", "*")];

/// HTTP client for a Judge0-compatible submissions API
pub struct HttpSubmissionClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpSubmissionClient {
    pub fn new(config: ClientConfig) -> Result<Self, SubmissionError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SubmissionError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/submissions`, or `{base}/submissions/{token}` with the token
    /// as a single escaped path segment
    pub fn submissions_url(&self, token: Option<&Token>) -> Result<Url, SubmissionError> {
        let invalid = || {
            SubmissionError::Config(format!(
                "API base URL '{}' cannot carry a path",
                self.config.endpoint()
            ))
        };

        let mut url = Url::parse(self.config.endpoint())
            .map_err(|e| SubmissionError::Config(format!("Invalid API base URL: {}", e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty().push("submissions");
            if let Some(token) = token {
                segments.push(token.as_str());
            }
        }
        Ok(url)
    }

    fn with_credentials(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(api_key) = self.config.api_key.as_deref().filter(|v| !v.is_empty()) {
            request = request.header(API_KEY_HEADER, api_key);
        }
        if let Some(api_host) = self.config.api_host.as_deref().filter(|v| !v.is_empty()) {
            request = request.header(API_HOST_HEADER, api_host);
        }
        request
    }

    async fn check_status(response: Response) -> Result<Response, SubmissionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Execution service returned HTTP {}: {}", status, body);
        Err(SubmissionError::Service {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, draft: &SubmissionDraft) -> Result<Option<Token>, SubmissionError> {
        let url = self.submissions_url(None)?;
        let payload = SubmissionRequest::from_draft(draft);
        debug!(
            "Creating submission at {} (language_id={}, {} bytes of source)",
            url,
            payload.language_id,
            draft.source.len()
        );

        let request = self
            .client
            .post(url)
            .query(&SUBMISSION_QUERY)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);

        let response = self.with_credentials(request).send().await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let token = CreatedSubmission::from_body(&body).into_token();
        debug!("Submission created, token: {:?}", token);

        Ok(token)
    }

    async fn fetch_result(&self, token: &Token) -> Result<SubmissionResult, SubmissionError> {
        let url = self.submissions_url(Some(token))?;
        debug!("Fetching submission result from {}", url);

        let request = self
            .client
            .get(url)
            .query(&SUBMISSION_QUERY)
            .header(CONTENT_TYPE, "application/octet-stream");

        let response = self.with_credentials(request).send().await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let raw: SubmissionResponse = serde_json::from_str(&body)?;
        debug!(
            "Submission {} reported status {} ({})",
            token, raw.status.id, raw.status.description
        );

        raw.decode()
    }
}
