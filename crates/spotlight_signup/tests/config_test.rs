//! Tests for campaign config files.

use std::fs;
use std::path::PathBuf;

use spotlight_signup::CampaignConfig;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = CampaignConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, CampaignConfig::default());
}

#[test]
fn test_full_config_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("spotlight.toml");
    fs::write(
        &path,
        r#"
title = "Spotlight #2"
starts_on = "2026-01-01"
ends_on = "2026-03-31"
catalog = "games.json"

[rules]
themes = ["Space", "Time"]
min_description_chars = 20
"#,
    )
    .expect("Failed to write config");

    let config = CampaignConfig::load_or_default(&path).expect("valid config");
    assert_eq!(config.title(), "Spotlight #2");
    assert_eq!(config.period_label(), "2026-01-01 to 2026-03-31");
    assert_eq!(config.rules().themes(), ["Space", "Time"]);
    assert_eq!(config.rules().min_description_chars(), 20);
    assert_eq!(config.catalog().as_deref(), Some(PathBuf::from("games.json").as_path()));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("spotlight.toml");
    fs::write(&path, "title = \"Only a title\"\n").expect("Failed to write config");

    let config = CampaignConfig::from_file(&path).expect("valid config");
    assert_eq!(config.title(), "Only a title");
    assert_eq!(config.rules().themes().len(), 6);
    assert_eq!(config.rules().min_description_chars(), 10);
    assert_eq!(config.period_label(), "2025-07-28 to 2025-10-26");
}

#[test]
fn test_invalid_files_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "title = ").expect("Failed to write config");
    let err = CampaignConfig::from_file(&broken).expect_err("parse error");
    assert!(err.message.starts_with("Failed to parse config"));

    let no_themes = dir.path().join("no_themes.toml");
    fs::write(&no_themes, "[rules]\nthemes = []\n").expect("Failed to write config");
    let err = CampaignConfig::from_file(&no_themes).expect_err("no themes");
    assert!(err.message.contains("no themes"));
}
