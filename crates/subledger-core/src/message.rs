//! Input messages handed over by the mail collaborator.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::headers::Headers;

/// A decoded message ready for extraction.
///
/// `text` is the subject, snippet and body already concatenated and decoded
/// to readable text. Headers are already parsed into name/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    /// Mail-provider message identifier.
    pub id: String,
    /// Decoded subject, snippet and body.
    pub text: String,
    /// Parsed headers.
    #[serde(default)]
    pub headers: Headers,
}

impl InputMessage {
    /// Creates a new input message.
    pub fn new(id: impl Into<String>, text: impl Into<String>, headers: Headers) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            headers,
        }
    }

    /// Returns the first `From` header value, if any.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.headers.get("from")
    }
}

/// Parses a JSON array of messages.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of messages.
pub fn parse_batch(json: &str) -> Result<Vec<InputMessage>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a JSON array of messages from a reader.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not a JSON array of
/// messages.
pub fn read_batch(reader: impl Read) -> Result<Vec<InputMessage>> {
    Ok(serde_json::from_reader(reader)?)
}
