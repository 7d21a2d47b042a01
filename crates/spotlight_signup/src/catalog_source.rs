//! Catalog loading from `.toml` or `.json` files.

use std::path::Path;

use serde::Deserialize;
use spotlight_wizard::{Catalog, GameRecord};
use tracing::{info, instrument};

use crate::ConfigError;

/// TOML catalog layout: one `[[games]]` table per game.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    games: Vec<GameRecord>,
}

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CatalogFormat {
    /// `[[games]]` tables.
    #[display("toml")]
    Toml,
    /// A JSON array of game records.
    #[display("json")]
    Json,
}

impl CatalogFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::new(format!(
                "Unsupported catalog format: {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }
}

/// Parses catalog text in the given format.
#[instrument(skip(content))]
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog, ConfigError> {
    let games = match format {
        CatalogFormat::Toml => {
            toml::from_str::<CatalogFile>(content)
                .map_err(|e| ConfigError::new(format!("Failed to parse catalog: {}", e)))?
                .games
        }
        CatalogFormat::Json => serde_json::from_str::<Vec<GameRecord>>(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse catalog: {}", e)))?,
    };
    Ok(Catalog::new(games)?)
}

/// Loads a catalog file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, ConfigError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read catalog {}: {}", path.display(), e)))?;
    let catalog = parse_catalog(&content, format)?;
    info!(%format, games = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Loads the given catalog, or the built-in sample when no path is set.
///
/// A path that is set but unreadable is an error, not a silent fallback.
#[instrument(skip(path))]
pub fn load_catalog_or_sample(path: Option<&Path>) -> Result<Catalog, ConfigError> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            info!("No catalog file configured, using the sample catalog");
            Ok(Catalog::sample())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_wizard::{GameStatus, GameType};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.toml")).ok(), Some(CatalogFormat::Toml));
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")).ok(), Some(CatalogFormat::Json));
        assert!(CatalogFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(CatalogFormat::from_path(Path::new("catalog")).is_err());
    }

    #[test]
    fn test_parse_toml_tables() {
        let catalog = parse_catalog(
            r#"
[[games]]
id = "g1"
name = "Rocket"
type = "tapplay"
status = "online"

[[games]]
id = "g2"
name = "Puzzle"
type = "minigame"
status = "draft"
"#,
            CatalogFormat::Toml,
        )
        .expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.games()[0].game_type(), GameType::TapPlay);
        assert_eq!(catalog.games()[1].status(), GameStatus::Draft);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": "same", "name": "A", "type": "other", "status": "online"},
            {"id": "same", "name": "B", "type": "other", "status": "online"}
        ]"#;
        let err = parse_catalog(json, CatalogFormat::Json).expect_err("duplicate id");
        assert!(err.message.contains("same"));
    }

    #[test]
    fn test_empty_toml_is_empty_catalog() {
        let catalog = parse_catalog("", CatalogFormat::Toml).expect("empty is valid");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_no_path_uses_sample() {
        let catalog = load_catalog_or_sample(None).expect("sample");
        assert_eq!(catalog, Catalog::sample());
    }
}
