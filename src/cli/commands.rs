//! CLI commands and argument parsing

use crate::fees::FeeFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Nigerian Government Fees API client
#[derive(Parser, Debug)]
#[command(name = "ng-fees")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides NGA_API_KEY and the config file)
    #[arg(short = 'k', long, global = true)]
    pub api_key: Option<String>,

    /// Base URL (overrides NGA_BASE_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of fees
    Fees {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Results per page (max 100)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Show a single fee
    Fee {
        /// Fee id
        id: u64,
    },

    /// Search fees by name and description
    Search {
        /// Search text (at least 2 characters)
        query: String,
    },

    /// List categories with fee counts
    Categories,

    /// Show API statistics and version
    Metadata,

    /// Show documentation links
    Docs,

    /// Generate a new API key
    GenerateKey {
        /// Email address to associate with the key
        #[arg(long)]
        email: Option<String>,
    },

    /// Fetch every fee across all pages
    All {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Resolve a category by name or id and list its fees
    ByCategory {
        /// Category display name or id
        category: String,
    },

    /// Run the metadata → categories → search → details → category walkthrough
    Workflow,
}

/// Fee listing filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Category name or slug
    #[arg(long)]
    pub category: Option<String>,

    /// State
    #[arg(long)]
    pub state: Option<String>,

    /// Free-text filter on name and description
    #[arg(long)]
    pub search: Option<String>,
}

impl From<&FilterArgs> for FeeFilter {
    fn from(args: &FilterArgs) -> Self {
        FeeFilter {
            category: args.category.clone(),
            state: args.state.clone(),
            search: args.search.clone(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
