use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding;
use crate::errors::SubmissionError;
use crate::languages::{DEFAULT_LANGUAGE_ID, DEFAULT_SOURCE};

/// Opaque identifier the execution service hands out for a submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Returns `None` for an empty token, which the service uses to mean "none"
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text form input a submission is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub source: String,
    pub language_id: i64,
    pub stdin: String,
}

impl SubmissionDraft {
    pub fn new(source: impl Into<String>, language_id: i64) -> Self {
        Self {
            source: source.into(),
            language_id,
            stdin: String::new(),
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = stdin.into();
        self
    }
}

impl Default for SubmissionDraft {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_LANGUAGE_ID)
    }
}

/// Create-submission request body, with text fields base64-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub language_id: i64,
    pub source_code: String,
    pub stdin: String,
}

impl SubmissionRequest {
    pub fn from_draft(draft: &SubmissionDraft) -> Self {
        Self {
            language_id: draft.language_id,
            source_code: encoding::encode(&draft.source),
            stdin: encoding::encode(&draft.stdin),
        }
    }
}

/// Create-submission response; only the token is of interest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedSubmission {
    #[serde(default)]
    pub token: Option<String>,
}

impl CreatedSubmission {
    /// Read a successful create response body. A body that is empty or not
    /// a JSON object carries no token.
    pub fn from_body(body: &str) -> Self {
        let token = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("token")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            });
        Self { token }
    }

    pub fn into_token(self) -> Option<Token> {
        self.token.and_then(Token::new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub id: i64,
    pub description: String,
}

impl SubmissionStatus {
    pub const IN_QUEUE: i64 = 1;
    pub const PROCESSING: i64 = 2;
    pub const ACCEPTED: i64 = 3;

    /// The service has not finished running the submission yet
    pub fn is_pending(&self) -> bool {
        matches!(self.id, Self::IN_QUEUE | Self::PROCESSING)
    }
}

/// Get-submission response as it arrives with `base64_encoded=true`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub wall_time: Option<String>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub exit_code: Option<i64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl SubmissionResponse {
    /// Decode the base64 fields into a displayable result
    pub fn decode(self) -> Result<SubmissionResult, SubmissionError> {
        Ok(SubmissionResult {
            stdout: encoding::decode_optional("stdout", self.stdout)?,
            stderr: encoding::decode_optional("stderr", self.stderr)?,
            compile_output: encoding::decode_optional("compile_output", self.compile_output)?,
            message: encoding::decode_optional("message", self.message)?,
            time: self.time,
            wall_time: self.wall_time,
            memory: self.memory,
            exit_code: self.exit_code,
            token: self.token.unwrap_or_default(),
            status: self.status,
        })
    }
}

/// Decoded outcome of a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub time: Option<String>,
    pub wall_time: Option<String>,
    pub memory: Option<i64>,
    pub exit_code: Option<i64>,
    pub token: String,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_encodes_source_and_stdin() {
        let draft = SubmissionDraft::new("puts(\"Hello World!\");", 52).with_stdin("42\n");
        let request = SubmissionRequest::from_draft(&draft);

        assert_eq!(request.language_id, 52);
        assert_eq!(request.source_code, "cHV0cygiSGVsbG8gV29ybGQhIik7");
        assert_eq!(request.stdin, "NDIK");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "language_id": 52,
                "source_code": "cHV0cygiSGVsbG8gV29ybGQhIik7",
                "stdin": "NDIK"
            })
        );
    }

    #[test]
    fn test_default_draft_uses_c_hello_world() {
        let draft = SubmissionDraft::default();
        assert_eq!(draft.language_id, 52);
        assert!(draft.source.contains("puts(\"Hello World!\");"));
        assert!(draft.stdin.is_empty());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let created: CreatedSubmission = serde_json::from_value(json!({"token": ""})).unwrap();
        assert!(created.into_token().is_none());

        let created: CreatedSubmission = serde_json::from_value(json!({})).unwrap();
        assert!(created.into_token().is_none());

        let created: CreatedSubmission =
            serde_json::from_value(json!({"token": "d85cd024-1548-4165-96c7-7bc88673f194"}))
                .unwrap();
        assert_eq!(
            created.into_token().unwrap().as_str(),
            "d85cd024-1548-4165-96c7-7bc88673f194"
        );
    }

    #[test]
    fn test_created_body_without_object_has_no_token() {
        for body in ["", "   ", "null", "\"queued\"", "[]", "not json", "{\"token\": 7}"] {
            assert!(
                CreatedSubmission::from_body(body).into_token().is_none(),
                "body {:?} should carry no token",
                body
            );
        }

        let created = CreatedSubmission::from_body(r#"{"token":"d85cd024"}"#);
        assert_eq!(created.into_token().unwrap().as_str(), "d85cd024");
    }

    #[test]
    fn test_response_decodes_encoded_fields_only() {
        let response: SubmissionResponse = serde_json::from_value(json!({
            "stdout": "SGVsbG8gV29ybGQhCg==\n",
            "stderr": null,
            "compile_output": "d2FybmluZw==",
            "message": null,
            "time": "0.01",
            "memory": 3320,
            "token": "abc",
            "status": {"id": 3, "description": "Accepted"},
            "language": {"id": 52, "name": "C"}
        }))
        .unwrap();

        let result = response.decode().unwrap();
        assert_eq!(result.stdout.as_deref(), Some("Hello World!\n"));
        assert_eq!(result.stderr, None);
        assert_eq!(result.compile_output.as_deref(), Some("warning"));
        assert_eq!(result.time.as_deref(), Some("0.01"));
        assert_eq!(result.memory, Some(3320));
        assert_eq!(result.token, "abc");
        assert_eq!(result.status.description, "Accepted");
    }

    #[test]
    fn test_pending_statuses() {
        let queued = SubmissionStatus {
            id: SubmissionStatus::IN_QUEUE,
            description: "In Queue".to_string(),
        };
        let accepted = SubmissionStatus {
            id: SubmissionStatus::ACCEPTED,
            description: "Accepted".to_string(),
        };
        assert!(queued.is_pending());
        assert!(!accepted.is_pending());
    }
}
