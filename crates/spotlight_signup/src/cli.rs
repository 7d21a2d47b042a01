//! Command-line interface for spotlight_signup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Spotlight Signup - register games for a themed creation campaign
#[derive(Parser, Debug)]
#[command(name = "spotlight_signup")]
#[command(about = "Register your games for a themed creation campaign", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Campaign config file (defaults are used if it does not exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive wizard
    Tui {
        /// Catalog file (.toml or .json); overrides SPOTLIGHT_CATALOG and the config
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Run the wizard without a terminal UI and print the final state as JSON
    Walk {
        /// Mobile number
        #[arg(long)]
        phone: String,

        /// WeChat account id
        #[arg(long)]
        wechat: String,

        /// Game id to register; without it the run stops at game registration
        #[arg(long)]
        game: Option<String>,

        /// Theme to register the game under
        #[arg(long, requires = "game")]
        theme: Option<String>,

        /// How the game expresses the theme
        #[arg(long, requires = "game")]
        description: Option<String>,

        /// Catalog file (.toml or .json)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print every catalog game with its eligibility
    Catalog {
        /// Catalog file (.toml or .json)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

impl Command {
    /// Catalog path given on the command line, if any.
    pub fn catalog(&self) -> Option<&std::path::Path> {
        match self {
            Self::Tui { catalog } | Self::Walk { catalog, .. } | Self::Catalog { catalog } => catalog.as_deref(),
        }
    }
}
