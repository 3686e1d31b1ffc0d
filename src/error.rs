//! Error types for the fees client
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! The four variants that describe a failed call (`Validation`,
//! `Application`, `Transport`, `NotFound`) are the ones callers usually
//! match on; the rest wrap lower-level failures.

use thiserror::Error;

/// The main error type for the fees client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Call Errors
    // ============================================================================
    /// A client-side precondition failed; no request was issued
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The server embedded a recognised error code in the response body
    #[error("{code}: {message}")]
    Application { code: String, message: String },

    /// Non-success HTTP status without a recognised error code
    #[error("HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    /// A looked-up resource does not exist
    #[error("{resource} not found: {detail}")]
    NotFound { resource: String, detail: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport / Decoding Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an application error
    pub fn application(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Application {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Result type alias for the fees client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
