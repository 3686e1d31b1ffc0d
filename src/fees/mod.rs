//! Fees module
//!
//! Typed access to the fees API.
//!
//! # Endpoints
//!
//! - `GET /fees` - paged fee listing with category/state/search filters
//! - `GET /fees/{id}` - a single fee
//! - `GET /fees/search` - free-text search
//! - `GET /categories` - categories with fee counts
//! - `GET /metadata` - statistics and version
//! - `GET /docs` - documentation links (no key)
//! - `POST /api_key/generate` - new API key (no key)

mod client;
mod types;

pub use client::{paths, FeesClient, MIN_SEARCH_LEN};
pub use types::{
    find_category, Agency, ApiKeyGrant, Category, CategoryFees, CategoryRef, Docs, Fee,
    FeeFilter, MainDocumentation, Metadata, Source, Statistics, Subcategory,
};
