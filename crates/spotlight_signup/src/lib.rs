//! Spotlight Signup library - campaign config, catalogs and the wizard TUI
//!
//! Wraps the pure [`spotlight_wizard`] state machine with everything an
//! application needs around it.
//!
//! # Architecture
//!
//! - **Config**: campaign title, period, theme rules and catalog path (TOML)
//! - **Catalog source**: game catalogs from `.toml` or `.json` files
//! - **Report**: eligibility of every game in a catalog
//! - **Headless**: a scripted pass through the wizard
//! - **TUI**: one ratatui screen per wizard step

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog_source;
mod cli;
mod config;
mod headless;
mod report;

pub mod tui;

// Crate-level exports - Configuration
pub use config::{CATALOG_ENV, CampaignConfig, ConfigError, DEFAULT_CONFIG_PATH};

// Crate-level exports - Catalog loading
pub use catalog_source::{CatalogFormat, load_catalog, load_catalog_or_sample, parse_catalog};

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Reports and headless runs
pub use headless::{WalkRequest, walk};
pub use report::{EligibilityReport, ReportRow};
