use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// How the mock answers `POST /submissions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreateBehavior {
    /// Hand out a fresh token
    #[default]
    Token,
    /// Accept the submission but return no token
    NoToken,
    /// Accept the submission with an empty body
    EmptyBody,
    /// Reject the submission with an HTTP error
    Fail { status: u16, body: String },
}

/// Result served for every token, in plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFixture {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub exit_code: Option<i64>,
    pub status_id: i64,
    pub status_description: String,
}

impl Default for ResultFixture {
    fn default() -> Self {
        Self {
            stdout: Some("Hello World!\n".to_string()),
            stderr: None,
            compile_output: None,
            message: None,
            time: Some("0.01".to_string()),
            memory: Some(3320),
            exit_code: Some(0),
            status_id: 3,
            status_description: "Accepted".to_string(),
        }
    }
}

impl ResultFixture {
    /// Wire form of the result with `base64_encoded=true`
    pub fn to_response(&self, token: &str) -> Value {
        json!({
            "token": token,
            "stdout": self.stdout.as_deref().map(encode_wrapped),
            "stderr": self.stderr.as_deref().map(encode_wrapped),
            "compile_output": self.compile_output.as_deref().map(encode_wrapped),
            "message": self.message.as_deref().map(encode_wrapped),
            "time": self.time,
            "wall_time": self.time,
            "memory": self.memory,
            "exit_code": self.exit_code,
            "status": {
                "id": self.status_id,
                "description": self.status_description,
            },
            "language": { "id": 52, "name": "C" },
        })
    }

    /// Wire form of a submission the service has not finished yet
    pub fn pending_response(token: &str) -> Value {
        json!({
            "token": token,
            "stdout": null,
            "stderr": null,
            "compile_output": null,
            "message": null,
            "time": null,
            "memory": null,
            "status": { "id": 1, "description": "In Queue" },
        })
    }
}

/// Full behaviour of the mock service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFixture {
    #[serde(default)]
    pub create: CreateBehavior,
    #[serde(default)]
    pub result: ResultFixture,
    /// Number of fetches per token answered with "In Queue" before the result
    #[serde(default)]
    pub pending_fetches: u32,
    /// Answer every fetch with this HTTP status instead of a result
    #[serde(default)]
    pub fetch_failure: Option<u16>,
}

impl ServiceFixture {
    pub fn from_yaml(yaml_content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    pub fn create_test_fixture() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, result: ResultFixture) -> Self {
        self.result = result;
        self
    }

    pub fn with_create(mut self, create: CreateBehavior) -> Self {
        self.create = create;
        self
    }

    pub fn with_pending_fetches(mut self, pending_fetches: u32) -> Self {
        self.pending_fetches = pending_fetches;
        self
    }

    pub fn with_fetch_failure(mut self, status: u16) -> Self {
        self.fetch_failure = Some(status);
        self
    }
}

/// Base64 with a line break every 60 characters, the way the real service
/// encodes its output
pub fn encode_wrapped(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / 60 + 1);
    for chunk in encoded.as_bytes().chunks(60) {
        // base64 output is ASCII
        wrapped.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        wrapped.push('\n');
    }
    wrapped
}
