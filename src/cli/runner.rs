//! CLI runner - executes commands

use super::render;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::fees::{Category, CategoryFees, Fee, FeeFilter, FeesClient, Metadata};
use crate::pagination::PageRequest;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Search text used by the workflow walkthrough
const WORKFLOW_SEARCH: &str = "NIN";

/// Category used by the workflow walkthrough
const WORKFLOW_CATEGORY: &str = "identity";

/// Page size used by the workflow walkthrough
const WORKFLOW_PAGE_SIZE: u32 = 5;

/// Everything the workflow gathered, for JSON output
#[derive(Debug, Default, Serialize)]
struct WorkflowReport {
    metadata: Option<Metadata>,
    categories: Vec<Category>,
    search_results: Vec<Fee>,
    fee_details: Option<Fee>,
    category_fees: Vec<Fee>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?;
        let mut stdout = std::io::stdout().lock();
        self.execute(&client, &mut stdout).await
    }

    /// Resolve the client config: file, then environment, then flags
    pub fn build_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.apply_env();

        if let Some(key) = &self.cli.api_key {
            config.api_key = key.clone();
        }
        if let Some(url) = &self.cli.base_url {
            config.base_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a client from the resolved config
    pub fn client(&self) -> Result<FeesClient> {
        FeesClient::new(self.build_config()?)
    }

    /// Execute the command against `client`, writing results to `out`
    pub async fn execute(&self, client: &FeesClient, out: &mut dyn Write) -> Result<()> {
        match &self.cli.command {
            Commands::Fees {
                filter,
                page,
                per_page,
            } => {
                let per_page = per_page.unwrap_or(client.config().default_page_size);
                let fees = client
                    .list_fees(&FeeFilter::from(filter), PageRequest::new(*page, per_page))
                    .await?;
                self.emit(out, &fees, render::fee_page)
            }
            Commands::Fee { id } => {
                let fee = client.get_fee(*id).await?;
                self.emit(out, &fee, render::fee_detail)
            }
            Commands::Search { query } => {
                let fees = client.search_fees(query).await?;
                self.emit(out, &fees, |fees| render::search_results(query, fees))
            }
            Commands::Categories => {
                let categories = client.categories().await?;
                self.emit(out, &categories, |c| render::categories(c))
            }
            Commands::Metadata => {
                let metadata = client.metadata().await?;
                self.emit(out, &metadata, render::metadata)
            }
            Commands::Docs => {
                let docs = client.docs().await?;
                self.emit(out, &docs, render::docs)
            }
            Commands::GenerateKey { email } => {
                let grant = client.generate_api_key(email.as_deref()).await?;
                self.emit(out, &grant, render::api_key)
            }
            Commands::All { filter } => {
                let fees = client.all_fees(&FeeFilter::from(filter)).await?;
                self.emit(out, &fees, |fees| {
                    format!("Retrieved all {} fees\n{}", fees.len(), render::fee_lines(fees))
                })
            }
            Commands::ByCategory { category } => {
                let result: CategoryFees = client.fees_by_category(category).await?;
                self.emit(out, &result, render::category_fees)
            }
            Commands::Workflow => self.workflow(client, out).await,
        }
    }

    /// Write a value as JSON or through its pretty renderer
    fn emit<T, F>(&self, out: &mut dyn Write, value: &T, pretty: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self.cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Pretty => {
                write!(out, "{}", pretty(value))?;
            }
        }
        Ok(())
    }

    async fn workflow(&self, client: &FeesClient, out: &mut dyn Write) -> Result<()> {
        let pretty = self.cli.format == OutputFormat::Pretty;
        let mut report = WorkflowReport::default();

        let result = self
            .workflow_steps(client, out, pretty, &mut report)
            .await;

        match result {
            Ok(()) => {
                if pretty {
                    writeln!(out, "=== Workflow Complete ===")?;
                } else {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                }
                info!("Workflow complete");
                Ok(())
            }
            Err(e) => {
                if pretty {
                    writeln!(out, "Workflow failed: {e}")?;
                }
                Err(e)
            }
        }
    }

    async fn workflow_steps(
        &self,
        client: &FeesClient,
        out: &mut dyn Write,
        pretty: bool,
        report: &mut WorkflowReport,
    ) -> Result<()> {
        if pretty {
            writeln!(out, "=== Nigerian Government Fees API - Complete Workflow ===\n")?;
            writeln!(out, "Step 1: Getting API metadata...")?;
        }
        let metadata = client.metadata().await?;
        if pretty {
            writeln!(out, "{}", render::metadata(&metadata))?;
            writeln!(out, "Step 2: Getting all categories...")?;
        }
        report.metadata = Some(metadata);

        report.categories = client.categories().await?;
        if pretty {
            writeln!(out, "{}", render::categories(&report.categories))?;
            writeln!(out, "Step 3: Searching for \"{WORKFLOW_SEARCH}\" fees...")?;
        }

        report.search_results = client.search_fees(WORKFLOW_SEARCH).await?;
        if pretty {
            writeln!(
                out,
                "{}",
                render::search_results(WORKFLOW_SEARCH, &report.search_results)
            )?;
        }

        if let Some(id) = report.search_results.first().and_then(|fee| fee.id) {
            if pretty {
                writeln!(out, "Step 4: Getting details of first result...")?;
            }
            let fee = client.get_fee(id).await?;
            if pretty {
                writeln!(out, "{}", render::fee_detail(&fee))?;
            }
            report.fee_details = Some(fee);
        }

        if pretty {
            writeln!(
                out,
                "Step 5: Getting fees by category \"{WORKFLOW_CATEGORY}\"..."
            )?;
        }
        let filter = FeeFilter::new().category(WORKFLOW_CATEGORY);
        let page = client
            .list_fees(&filter, PageRequest::first(WORKFLOW_PAGE_SIZE))
            .await?;
        if pretty {
            writeln!(out, "{}", render::fee_page(&page))?;
        }
        report.category_fees = page.items;

        Ok(())
    }
}
