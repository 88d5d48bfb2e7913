//! Base64 transport encoding for submission fields.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::SubmissionError;

pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 field returned by the execution service.
///
/// The service wraps its encoded output every 60 characters, so ASCII
/// whitespace is stripped before decoding. Output that is not valid UTF-8 is
/// converted lossily; programs are free to print arbitrary bytes.
pub fn decode(field: &'static str, encoded: &str) -> Result<String, SubmissionError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SubmissionError::Decode {
            field,
            message: e.to_string(),
        })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn decode_optional(
    field: &'static str,
    encoded: Option<String>,
) -> Result<Option<String>, SubmissionError> {
    encoded.map(|value| decode(field, &value)).transpose()
}
