//! Fees API client
//!
//! Every keyed call goes through [`FeesClient::fetch_page`], which injects
//! the API key, sends a single GET and classifies the response. Multi-page
//! fetches reuse it through [`crate::pagination::collect_all`]. Every
//! request, keyed or not, first waits on [`Pacer::acquire`].

use super::types::{
    find_category, ApiKeyGrant, Category, CategoryFees, Docs, Fee, FeeFilter, Metadata,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{
    pacer_for, ApiOutcome, HttpClient, Pacer, QueryParams, RawResponse, API_KEY_PARAM,
};
use crate::pagination::{collect_all, Page, PageRequest};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Resource paths
pub mod paths {
    pub const FEES: &str = "fees";
    pub const FEE_SEARCH: &str = "fees/search";
    pub const CATEGORIES: &str = "categories";
    pub const METADATA: &str = "metadata";
    pub const DOCS: &str = "docs";
    pub const GENERATE_KEY: &str = "api_key/generate";
}

/// Shortest search text the API accepts, after trimming
pub const MIN_SEARCH_LEN: usize = 2;

/// Client for the fees API
#[derive(Clone)]
pub struct FeesClient {
    http: HttpClient,
    config: ClientConfig,
    pacer: Arc<dyn Pacer>,
}

impl FeesClient {
    /// Create a client; the pacer is built from `config.pacing`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let pacer = pacer_for(&config.pacing);
        Self::with_pacer(config, pacer)
    }

    /// Create a client with an explicit pacer
    pub fn with_pacer(config: ClientConfig, pacer: Arc<dyn Pacer>) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http,
            config,
            pacer,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========================================================================
    // Generic resource access
    // ========================================================================

    /// GET a resource with the API key injected and return the decoded body
    ///
    /// An application error code in the body fails the call whatever the
    /// HTTP status; otherwise a non-2xx status fails it.
    pub async fn fetch_page(&self, path: &str, query: QueryParams) -> Result<Value> {
        self.fetch_outcome(path, query)
            .await
            .and_then(ApiOutcome::into_result)
    }

    /// Fetch every page of a paged listing
    ///
    /// Pages are requested with the maximum page size, strictly in order,
    /// with [`Pacer::pause`] between pages. One failing page fails the
    /// whole fetch.
    pub async fn fetch_all<T>(&self, path: &str, base_query: &QueryParams) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let per_page = self.config.max_page_size;
        let items = collect_all(self.pacer.as_ref(), |page| {
            let mut query = base_query.clone();
            PageRequest::new(page, per_page).apply(&mut query);
            async move {
                let body = self.fetch_page(path, query).await?;
                decode::<Page<T>>(path, body)
            }
        })
        .await
        .inspect_err(|e| error!("Error fetching all of {path}: {e}"))?;

        debug!("Retrieved all {} items from {path}", items.len());
        Ok(items)
    }

    async fn fetch_outcome(&self, path: &str, mut query: QueryParams) -> Result<ApiOutcome> {
        let key = self.config.require_api_key()?;
        query.insert(API_KEY_PARAM, key);

        let response = self.get(path, &query).await?;
        Ok(ApiOutcome::classify(
            response,
            &self.config.error_code_prefix,
        ))
    }

    // ========================================================================
    // Fees
    // ========================================================================

    /// One page of fees
    pub async fn list_fees(&self, filter: &FeeFilter, page: PageRequest) -> Result<Page<Fee>> {
        let result = match self.check_page_request(page) {
            Ok(()) => {
                let mut query = filter.to_query();
                page.apply(&mut query);
                self.fetch_page(paths::FEES, query)
                    .await
                    .and_then(|body| decode::<Page<Fee>>(paths::FEES, body))
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(fees) => {
                info!(
                    "Retrieved {} fees (Page {} of {})",
                    fees.len(),
                    fees.meta.page,
                    fees.meta.page_total
                );
                info!("Total: {} fees", fees.meta.total);
                Ok(fees)
            }
            Err(e) => {
                error!("Error fetching fees: {e}");
                Err(e)
            }
        }
    }

    fn check_page_request(&self, page: PageRequest) -> Result<()> {
        if page.page == 0 {
            return Err(Error::validation("page numbers start at 1"));
        }
        if page.per_page == 0 || page.per_page > self.config.max_page_size {
            return Err(Error::validation(format!(
                "per_page must be between 1 and {}",
                self.config.max_page_size
            )));
        }
        Ok(())
    }

    /// A single fee with its relationships
    ///
    /// A 404 is reported as [`Error::NotFound`] with the server's message.
    pub async fn get_fee(&self, id: u64) -> Result<Fee> {
        let path = format!("{}/{id}", paths::FEES);
        let result = self.fetch_fee(&path).await;

        match result {
            Ok(fee) => {
                info!("Fee: {}", fee.name);
                info!("Amount: {}", fee.amount_display());
                if fee.subcategory.is_some() {
                    info!("Category: {}", fee.category_name().unwrap_or("N/A"));
                    info!("Subcategory: {}", fee.subcategory_name().unwrap_or("N/A"));
                }
                if fee.source.is_some() {
                    info!("Agency: {}", fee.agency_name().unwrap_or("N/A"));
                }
                Ok(fee)
            }
            Err(e) => {
                error!("Error fetching fee: {e}");
                Err(e)
            }
        }
    }

    async fn fetch_fee(&self, path: &str) -> Result<Fee> {
        let key = self.config.require_api_key()?;
        let query = QueryParams::new().param(API_KEY_PARAM, key);
        let response = self.get(path, &query).await?;

        if response.status == StatusCode::NOT_FOUND {
            let detail = response.message().unwrap_or("Unknown error").to_string();
            return Err(Error::not_found("Fee", detail));
        }

        let body = ApiOutcome::classify(response, &self.config.error_code_prefix).into_result()?;
        decode(path, body)
    }

    /// Search fees by name and description
    ///
    /// The text is trimmed and must be at least two characters long; shorter
    /// input fails before any request is made.
    pub async fn search_fees(&self, text: &str) -> Result<Vec<Fee>> {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_SEARCH_LEN {
            let err = Error::validation("Search query must be at least 2 characters long");
            error!("Error searching fees: {err}");
            return Err(err);
        }

        let query = QueryParams::new().param("q", trimmed);
        let result = self
            .fetch_page(paths::FEE_SEARCH, query)
            .await
            .and_then(|body| decode::<Vec<Fee>>(paths::FEE_SEARCH, body));

        match result {
            Ok(fees) => {
                info!("Found {} fees matching \"{}\"", fees.len(), text);
                Ok(fees)
            }
            Err(e) => {
                error!("Error searching fees: {e}");
                Err(e)
            }
        }
    }

    /// Every fee matching `filter`, across all pages
    pub async fn all_fees(&self, filter: &FeeFilter) -> Result<Vec<Fee>> {
        let fees = self.fetch_all::<Fee>(paths::FEES, &filter.to_query()).await?;
        info!("Retrieved all {} fees", fees.len());
        Ok(fees)
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// All categories with their fee counts
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let result = self
            .fetch_page(paths::CATEGORIES, QueryParams::new())
            .await
            .and_then(|body| decode::<Vec<Category>>(paths::CATEGORIES, body));

        match result {
            Ok(categories) => {
                info!("Found {} categories", categories.len());
                for category in &categories {
                    info!("  - {}: {} fees", category.display_name, category.fee_count);
                }
                Ok(categories)
            }
            Err(e) => {
                error!("Error fetching categories: {e}");
                Err(e)
            }
        }
    }

    /// Find a category by display name (case-insensitive) or id
    pub async fn resolve_category(&self, identifier: &str) -> Result<Category> {
        let categories = self.categories().await?;
        match find_category(&categories, identifier) {
            Some(category) => Ok(category.clone()),
            None => {
                let err = Error::not_found("Category", format!("\"{identifier}\""));
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// A category and the first page (up to the maximum size) of its fees
    ///
    /// Failures are logged by the lookup or listing that hit them.
    pub async fn fees_by_category(&self, identifier: &str) -> Result<CategoryFees> {
        let category = self.resolve_category(identifier).await?;
        info!("Fetching fees for category: {}", category.display_name);

        let filter = FeeFilter::new().category(identifier);
        let page = self
            .list_fees(&filter, PageRequest::first(self.config.max_page_size))
            .await?;

        Ok(CategoryFees {
            category,
            total: page.meta.total,
            fees: page.items,
        })
    }

    // ========================================================================
    // Metadata, docs, keys
    // ========================================================================

    /// API statistics and version
    pub async fn metadata(&self) -> Result<Metadata> {
        let result = self
            .fetch_page(paths::METADATA, QueryParams::new())
            .await
            .and_then(|body| decode::<Metadata>(paths::METADATA, body));

        match result {
            Ok(metadata) => {
                info!("API Metadata:");
                info!("  Version: {}", metadata.api_version);
                info!("  Total Fees: {}", metadata.statistics.total_fees);
                info!("  Total Categories: {}", metadata.statistics.total_categories);
                info!("  Total Agencies: {}", metadata.statistics.total_agencies);
                if let Some(updated) = metadata.last_database_update {
                    info!("  Last Update: {}", updated.to_rfc3339());
                }
                Ok(metadata)
            }
            Err(e) => {
                error!("Error fetching metadata: {e}");
                Err(e)
            }
        }
    }

    /// Documentation links; no API key needed
    pub async fn docs(&self) -> Result<Docs> {
        match self.fetch_unkeyed::<Docs>(paths::DOCS).await {
            Ok(docs) => {
                info!("Documentation links:");
                info!("  Repository: {}", docs.repository);
                info!("  API Reference: {}", docs.main_documentation.api_reference);
                info!("  Quick Start: {}", docs.main_documentation.quick_start);
                Ok(docs)
            }
            Err(e) => {
                error!("Error fetching docs: {e}");
                Err(e)
            }
        }
    }

    /// Generate a new API key, optionally tied to an email address
    pub async fn generate_api_key(&self, email: Option<&str>) -> Result<ApiKeyGrant> {
        let body = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => json!({ "user_email": email }),
            None => json!({}),
        };

        match self.post_unkeyed::<ApiKeyGrant>(paths::GENERATE_KEY, &body).await {
            Ok(grant) => {
                info!("API key generated");
                if let Some(message) = &grant.message {
                    info!("Message: {message}");
                }
                warn!("Save this key now, it cannot be retrieved later");
                Ok(grant)
            }
            Err(e) => {
                error!("Error generating API key: {e}");
                Err(e)
            }
        }
    }

    async fn fetch_unkeyed<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path, &QueryParams::new()).await?;
        let body = ApiOutcome::classify(response, &self.config.error_code_prefix).into_result()?;
        decode(path, body)
    }

    async fn post_unkeyed<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.pacer.acquire().await;
        let response = self.http.post_json(path, body).await?;
        let body = ApiOutcome::classify(response, &self.config.error_code_prefix).into_result()?;
        decode(path, body)
    }

    async fn get(&self, path: &str, query: &QueryParams) -> Result<RawResponse> {
        self.pacer.acquire().await;
        self.http.get(path, query).await
    }
}

impl std::fmt::Debug for FeesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeesClient")
            .field("config", &self.config)
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

/// Deserialize a response body, naming the resource on failure
fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| Error::decode(format!("unexpected response from {path}: {e}")))
}
