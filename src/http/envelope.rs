//! Response classification
//!
//! Every response is decoded once into an [`ApiOutcome`]. An application
//! error code in the body wins over the HTTP status; a non-success status
//! without such a code is a transport failure.

use super::client::RawResponse;
use crate::error::{Error, Result};
use serde_json::Value;

/// Decoded result of a single API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// Success status and a JSON body
    Success(Value),
    /// Body carried a recognised error code
    Application { code: String, message: String },
    /// Non-success status without a recognised error code
    Transport { status: u16, message: String },
    /// Success status but the body was not JSON
    Malformed { message: String },
}

impl ApiOutcome {
    /// Classify a raw response
    ///
    /// `error_code_prefix` is matched as a plain string prefix of the body's
    /// `code` field.
    pub fn classify(response: RawResponse, error_code_prefix: &str) -> Self {
        let RawResponse { status, body } = response;

        if let Some((code, message)) = body
            .as_ref()
            .and_then(|b| application_error(b, error_code_prefix))
        {
            return Self::Application { code, message };
        }

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(body_message)
                .map(str::to_string)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Self::Transport {
                status: status.as_u16(),
                message,
            };
        }

        match body {
            Some(value) => Self::Success(value),
            None => Self::Malformed {
                message: format!("expected a JSON body with status {}", status.as_u16()),
            },
        }
    }

    /// Turn the outcome into the payload or a typed error
    pub fn into_result(self) -> Result<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Application { code, message } => Err(Error::application(code, message)),
            Self::Transport { status, message } => Err(Error::transport(status, message)),
            Self::Malformed { message } => Err(Error::decode(message)),
        }
    }
}

/// `message` field of an object body
pub(crate) fn body_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

fn application_error(body: &Value, prefix: &str) -> Option<(String, String)> {
    let code = body.get("code").and_then(Value::as_str)?;
    if !code.starts_with(prefix) {
        return None;
    }
    let message = body_message(body).unwrap_or("Unknown API error");
    Some((code.to_string(), message.to_string()))
}
