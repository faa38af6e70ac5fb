use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use pricing_core::calculations::{InvoiceDraft, SelectionBuilder, calculate_breakdown};
use pricing_core::CatalogRepository;
use pricing_data::{InMemoryCatalog, ProposalFile, QuoteReport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Price a saved proposal against the package and service catalog.
///
/// Reads the catalog from a directory containing `packages.csv` and
/// `services.csv`, reads the proposal settings from a TOML file, and prints
/// the price breakdown.
#[derive(Debug, Parser)]
#[command(name = "proposal-quote")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding `packages.csv` and `services.csv`.
    #[arg(short, long, default_value = "catalog")]
    catalog: PathBuf,

    /// Proposal settings file (TOML).
    #[arg(short, long)]
    proposal: PathBuf,

    /// Also draft an invoice with this number (e.g. INV-2026-0001).
    #[arg(short, long)]
    invoice: Option<String>,

    /// Invoice issue date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    issue_date: Option<NaiveDate>,

    /// Print the report as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let file = ProposalFile::load(&cli.proposal)
        .with_context(|| format!("Failed to load proposal: {}", cli.proposal.display()))?;

    debug!("opening catalog at {}", cli.catalog.display());
    let catalog = InMemoryCatalog::load_dir(&cli.catalog)
        .with_context(|| format!("Failed to open catalog: {}", cli.catalog.display()))?;
    let repo: &dyn CatalogRepository = &catalog;

    let selection = SelectionBuilder::resolve(repo, &file.proposal, file.pricing.tax_rate)
        .await
        .context("Failed to resolve proposal against catalog")?;
    let breakdown = calculate_breakdown(&selection);

    let invoice = match &cli.invoice {
        Some(number) => {
            let issue_date = cli.issue_date.unwrap_or_else(|| Local::now().date_naive());
            let draft = InvoiceDraft::from_breakdown(
                number,
                &file.proposal.client_name,
                issue_date,
                file.pricing.payment_terms_days,
                &breakdown,
                &file.pricing.currency,
            )
            .context("Failed to draft invoice")?;
            info!(number = %draft.number, due = %draft.due_date, "Drafted invoice");
            Some(draft)
        }
        None => None,
    };

    let report = QuoteReport {
        client_name: file.proposal.client_name.clone(),
        currency: file.pricing.currency.clone(),
        breakdown,
        invoice,
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else {
        println!("{report}");
    }

    Ok(())
}
