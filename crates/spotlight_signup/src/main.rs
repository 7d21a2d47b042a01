//! Spotlight Signup - Unified CLI
//!
//! Interactive and headless registration for the themed game campaign.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use spotlight_signup::{
    CampaignConfig, Cli, Command, EligibilityReport, WalkRequest, load_catalog_or_sample, tui, walk,
};
use spotlight_wizard::Catalog;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if !matches!(cli.command, Command::Tui { .. }) {
        initialize_tracing();
    }

    let campaign = CampaignConfig::load_or_default(&cli.config)?;
    let catalog = load_campaign_catalog(&campaign, cli.command.catalog())?;

    match cli.command {
        Command::Tui { .. } => tui::run_tui(campaign, catalog),
        Command::Walk {
            phone,
            wechat,
            game,
            theme,
            description,
            ..
        } => run_walk(
            &campaign,
            catalog,
            WalkRequest::new(phone, wechat, game, theme, description),
        ),
        Command::Catalog { .. } => run_catalog(&campaign, &catalog),
    }
}

/// Loads the catalog the command line, environment or config points at.
#[instrument(skip(campaign))]
fn load_campaign_catalog(campaign: &CampaignConfig, cli_catalog: Option<&Path>) -> Result<Catalog> {
    let path = campaign.resolve_catalog_path(cli_catalog);
    let catalog = load_catalog_or_sample(path.as_deref())?;
    Ok(catalog)
}

/// Runs the wizard headless and prints the final snapshot.
#[instrument(skip_all)]
fn run_walk(campaign: &CampaignConfig, catalog: Catalog, request: WalkRequest) -> Result<()> {
    let snapshot = walk(catalog, campaign.rules().clone(), &request).context("Wizard rejected the input")?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    println!("{}", json);
    Ok(())
}

/// Prints the eligibility report.
#[instrument(skip_all)]
fn run_catalog(campaign: &CampaignConfig, catalog: &Catalog) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let status = if campaign.is_open_on(today) { "open" } else { "closed" };
    println!("{} ({}, {})", campaign.title(), campaign.period_label(), status);
    println!("Themes: {}", campaign.rules().themes().join(", "));
    println!();
    println!("{}", EligibilityReport::build(catalog));
    info!(games = catalog.len(), "Catalog report printed");
    Ok(())
}

/// Logs to stderr so stdout stays clean for JSON output.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,spotlight_signup=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
