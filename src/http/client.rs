//! HTTP transport
//!
//! Thin wrapper over reqwest that joins resource paths onto the base URL,
//! sends the request once, and reads the body as JSON whatever the status.
//! Classification of the body happens in [`super::envelope`].

use super::query::QueryParams;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Status and decoded body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Body parsed as JSON, `None` when empty or not JSON
    pub body: Option<Value>,
}

impl RawResponse {
    /// Create a raw response
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// `message` field of the body, if any
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref().and_then(super::envelope::body_message)
    }
}

/// HTTP client bound to one base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET request
    pub async fn get(&self, path: &str, query: &QueryParams) -> Result<RawResponse> {
        let url = self.build_url(path);
        debug!("GET {}?{}", url, query.describe());

        let mut req = self.client.request(Method::GET, &url);
        if !query.is_empty() {
            req = req.query(query.as_map());
        }
        self.send(req).await
    }

    /// Issue a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse> {
        let url = self.build_url(path);
        debug!("POST {}", url);

        let req = self
            .client
            .request(Method::POST, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body);
        self.send(req).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<RawResponse> {
        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;

        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };
        debug!("Response {} ({} bytes)", status.as_u16(), text.len());

        Ok(RawResponse { status, body })
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
