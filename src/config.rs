//! Client configuration
//!
//! `ClientConfig` carries everything a `FeesClient` needs: where the API
//! lives, the key to send, transport timeouts and how multi-page fetches are
//! paced. It can be built in code, loaded from YAML, and overridden from the
//! environment.
//!
//! ```yaml
//! base_url: https://xmlb-8xh6-ww1h.n7e.xano.io/api:public
//! api_key: nga_...
//! timeout_secs: 30
//! pacing:
//!   type: rate_limit
//!   quota: 100
//!   period: hour
//!   burst_size: 10
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Public endpoint of the fees API
pub const DEFAULT_BASE_URL: &str = "https://xmlb-8xh6-ww1h.n7e.xano.io/api:public";

/// Prefix of the `code` field the API uses to flag application errors
pub const DEFAULT_ERROR_CODE_PREFIX: &str = "ERROR_CODE";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "NGA_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "NGA_BASE_URL";

/// Default page size for single-page listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// Pacing
// ============================================================================

/// How the client spaces out its requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PacingConfig {
    /// Issue pages back to back
    None,
    /// Sleep a fixed delay between the pages of a full fetch
    FixedDelay {
        /// Delay in milliseconds
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
    },
    /// Token bucket every request the client makes draws from
    RateLimit(RateLimiterConfig),
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::FixedDelay {
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    100
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for a fees client
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto
    pub base_url: String,
    /// Static API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Prefix identifying application error codes in response bodies
    pub error_code_prefix: String,
    /// Page size used when the caller does not pick one
    pub default_page_size: u32,
    /// Page size used by full-collection fetches, and the upper bound for callers
    pub max_page_size: u32,
    /// Pacing between pages of a full-collection fetch
    pub pacing: PacingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            user_agent: format!("ng-fees/{}", env!("CARGO_PKG_VERSION")),
            error_code_prefix: DEFAULT_ERROR_CODE_PREFIX.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            pacing: PacingConfig::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("error_code_prefix", &self.error_code_prefix)
            .field("default_page_size", &self.default_page_size)
            .field("max_page_size", &self.max_page_size)
            .field("pacing", &self.pacing)
            .finish()
    }
}

impl ClientConfig {
    /// Default configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a YAML document; missing fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Apply `NGA_API_KEY` / `NGA_BASE_URL` from the process environment
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides read through `lookup`
    #[must_use]
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Check the config is usable
    ///
    /// The API key is not checked here because the key generation and docs
    /// endpoints work without one; keyed calls go through
    /// [`ClientConfig::require_api_key`].
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.error_code_prefix.is_empty() {
            return Err(Error::config("error_code_prefix must not be empty"));
        }
        if self.max_page_size == 0 {
            return Err(Error::config("max_page_size must be at least 1"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(Error::config(format!(
                "default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// The API key, or an error when none is configured
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        Ok(key)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Show only the first few characters of a secret
fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

/// Builder for client config
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the request timeout
    ///
    /// The config holds whole seconds, so a fractional timeout is rounded
    /// up: 500ms becomes 1s and 1500ms becomes 2s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the application error code prefix
    pub fn error_code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.error_code_prefix = prefix.into();
        self
    }

    /// Set the default page size
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.config.default_page_size = size;
        self
    }

    /// Set the maximum page size
    pub fn max_page_size(mut self, size: u32) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Set pacing
    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Disable pacing
    pub fn no_pacing(mut self) -> Self {
        self.config.pacing = PacingConfig::None;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
