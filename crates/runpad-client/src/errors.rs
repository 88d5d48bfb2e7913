//! Error types for submission round trips
//!
//! Every failure a submission can meet is classified by where it happened:
//! the transport, the remote service, or the decoding of what the service sent
//! back. The session flattens all of them into a single display string, so the
//! messages here are written to be read by the person who pressed "run".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Execution service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },
    #[error("Submission was accepted but the service returned no token")]
    MissingToken,
    #[error("Invalid response from execution service: {0}")]
    InvalidResponse(String),
    #[error("Could not decode base64 field '{field}': {message}")]
    Decode { field: &'static str, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmissionError::InvalidResponse(err.to_string())
        } else {
            SubmissionError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::InvalidResponse(err.to_string())
    }
}
