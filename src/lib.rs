// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # ng-fees
//!
//! A typed async client for the Nigerian Government Fees lookup API.
//!
//! ## Features
//!
//! - **Typed resources**: fees, categories, metadata, docs and key generation
//! - **Envelope classification**: application error codes win over HTTP status
//! - **Full-collection fetch**: walks every page in order with pluggable pacing
//! - **Client-side lookups**: category resolution by name or id
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ng_fees::{ClientConfig, FeeFilter, FeesClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = FeesClient::new(ClientConfig::new("nga_your_api_key_here"))?;
//!
//!     let metadata = client.metadata().await?;
//!     println!("{} fees tracked", metadata.statistics.total_fees);
//!
//!     let identity = client.all_fees(&FeeFilter::new().category("identity")).await?;
//!     for fee in &identity {
//!         println!("{}: {}", fee.name, fee.amount_display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          FeesClient                          │
//! │  list_fees  get_fee  search_fees  categories  metadata  ...  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴─────────────┬──────────────────┐
//! │     HTTP      │         Envelope          │    Pagination    │
//! ├───────────────┼───────────────────────────┼──────────────────┤
//! │ GET / POST    │ Application error code    │ collect_all      │
//! │ api_key query │ HTTP status               │ Pacer: delay /   │
//! │ JSON body     │ Success payload           │   token bucket   │
//! └───────────────┴───────────────────────────┴──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// HTTP transport, response classification and pacing
pub mod http;

/// Paged envelopes and the full-collection fetch
pub mod pagination;

/// Resource models and the API client
pub mod fees;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, PacingConfig};
pub use error::{Error, Result};
pub use fees::{Category, CategoryFees, Fee, FeeFilter, FeesClient, Metadata};
pub use pagination::{Page, PageMeta, PageRequest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
