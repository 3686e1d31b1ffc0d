//! CLI module
//!
//! Command-line interface for the fees API.
//!
//! # Commands
//!
//! - `fees` - One page of fees, with filters
//! - `fee` - A single fee by id
//! - `search` - Free-text search
//! - `categories` - Categories with fee counts
//! - `metadata` - API statistics
//! - `docs` - Documentation links
//! - `generate-key` - Request a new API key
//! - `all` - Every fee across all pages
//! - `by-category` - Resolve a category and list its fees
//! - `workflow` - Guided walkthrough of the endpoints

mod commands;
pub mod render;
mod runner;

pub use commands::{Cli, Commands, FilterArgs, OutputFormat};
pub use runner::Runner;
