//! Campaign configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use spotlight_wizard::{CatalogError, RegistrationRules};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the catalog path.
pub const CATALOG_ENV: &str = "SPOTLIGHT_CATALOG";

/// Default location of the campaign file.
pub const DEFAULT_CONFIG_PATH: &str = "spotlight.toml";

/// Campaign settings: title, open period, registration rules and catalog.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Campaign title shown in the header.
    #[serde(default = "default_title")]
    title: String,

    /// First day submissions are accepted.
    #[serde(default = "default_starts_on")]
    starts_on: NaiveDate,

    /// Last day submissions are accepted.
    #[serde(default = "default_ends_on")]
    ends_on: NaiveDate,

    /// Theme set and description minimum.
    #[serde(default)]
    rules: RegistrationRules,

    /// Catalog file to load instead of the built-in sample.
    #[serde(default)]
    catalog: Option<PathBuf>,
}

fn default_title() -> String {
    "Spotlight Themed Game Creation Call #1".to_string()
}

fn default_starts_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 28).unwrap_or_default()
}

fn default_ends_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 26).unwrap_or_default()
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            starts_on: default_starts_on(),
            ends_on: default_ends_on(),
            rules: RegistrationRules::default(),
            catalog: None,
        }
    }
}

impl CampaignConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading campaign config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(title = %config.title, "Campaign config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise uses the built-in campaign.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ends_on < self.starts_on {
            return Err(ConfigError::new(format!(
                "Campaign ends on {} before it starts on {}",
                self.ends_on, self.starts_on
            )));
        }
        if self.rules.themes().is_empty() {
            return Err(ConfigError::new("Campaign offers no themes"));
        }
        Ok(())
    }

    /// Submission period, e.g. `2025-07-28 to 2025-10-26`.
    pub fn period_label(&self) -> String {
        format!("{} to {}", self.starts_on, self.ends_on)
    }

    /// Whether submissions are open on the given day (both ends inclusive).
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && date <= self.ends_on
    }

    /// Picks the catalog file: command line, then environment, then config.
    #[instrument(skip(self, cli))]
    pub fn resolve_catalog_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        let env = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
        pick_catalog_path(cli, env, self.catalog.as_deref())
    }
}

fn pick_catalog_path(cli: Option<&Path>, env: Option<PathBuf>, config: Option<&Path>) -> Option<PathBuf> {
    let picked = cli
        .map(Path::to_path_buf)
        .or(env.filter(|p| !p.as_os_str().is_empty()))
        .or_else(|| config.map(Path::to_path_buf));
    debug!(catalog = ?picked, "Catalog path resolved");
    picked
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<CatalogError> for ConfigError {
    #[track_caller]
    fn from(err: CatalogError) -> Self {
        Self::new(format!("Invalid catalog: {}", err))
    }
}
