//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.figcat.toml` files.

use crate::cli::{Args, OutputFormat};
use crate::error::QueryError;
use crate::groups::{Group, GroupRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".figcat.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Extra or replacement groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Path of the checklist JSON document.
    #[serde(default = "default_data")]
    pub data: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Start from the built-in faction and race groups.
    #[serde(default = "default_true")]
    pub default_groups: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            verbose: false,
            default_groups: true,
        }
    }
}

fn default_data() -> PathBuf {
    PathBuf::from("figurechecklist.json")
}

fn default_true() -> bool {
    true
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// List the matching figures under detail views.
    #[serde(default = "default_true")]
    pub include_figures: bool,

    /// Link each listed figure to its source page.
    #[serde(default = "default_true")]
    pub include_urls: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_figures: true,
            include_urls: true,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_optional(Path::new(CONFIG_FILE))
    }

    /// Load `path` if it exists. A file that exists but fails to parse is an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Ok(Some(Self::load(path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given on the command line override the file.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref data) = args.data {
            self.general.data = data.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if args.no_urls {
            self.report.include_urls = false;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level after merging: `--quiet` wins, then `verbose` from either source.
    pub fn log_level(&self, args: &Args) -> tracing::Level {
        if args.quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Build the group registry this configuration describes.
    pub fn group_registry(&self) -> Result<GroupRegistry, QueryError> {
        let mut registry = if self.general.default_groups {
            GroupRegistry::default()
        } else {
            GroupRegistry::new(Vec::new())?
        };
        registry.extend(self.groups.clone())?;
        Ok(registry)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use crate::models::Field;
    use clap::Parser;
    use tempfile::TempDir;

    fn args_for(argv: &[&str]) -> Args {
        let mut full = vec!["figcat"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data, PathBuf::from("figurechecklist.json"));
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert!(config.report.include_urls);
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
data = "data/checklist.json"
verbose = true

[report]
format = "json"
include_urls = false

[[groups]]
name = "casters"
field = "role"
values = ["MAGE", "SORCERER"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.data, PathBuf::from("data/checklist.json"));
        assert!(config.general.verbose);
        assert!(config.general.default_groups);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(!config.report.include_urls);
        assert!(config.report.include_figures);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].field, Field::Role);

        let registry = config.group_registry().unwrap();
        assert_eq!(registry.len(), 11);
        assert!(registry.get(Field::Role, "casters").is_ok());
    }

    #[test]
    fn test_config_without_default_groups() {
        let toml_content = r#"
[general]
default_groups = false
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.group_registry().unwrap().is_empty());
    }

    #[test]
    fn test_config_rejects_release_group() {
        let toml_content = r#"
[[groups]]
name = "early"
field = "release"
values = ["ADVENTURES"]
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.group_registry().unwrap_err(),
            QueryError::UnsupportedGroupField(Field::Release)
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.general.data, PathBuf::from("figurechecklist.json"));
    }

    #[test]
    fn test_verbose_from_file_selects_debug() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = args_for(&["list", "scale"]);
        config.merge_with_args(&args);
        assert_eq!(config.log_level(&args), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_precedence() {
        let mut config = Config::default();
        let args = args_for(&["summary"]);
        assert_eq!(args.command, Some(Command::Summary));
        config.merge_with_args(&args);
        assert_eq!(config.log_level(&args), tracing::Level::INFO);

        let args = args_for(&["--verbose", "summary"]);
        config.merge_with_args(&args);
        assert_eq!(config.log_level(&args), tracing::Level::DEBUG);

        config.general.verbose = true;
        let args = args_for(&["--quiet", "summary"]);
        config.merge_with_args(&args);
        assert_eq!(config.log_level(&args), tracing::Level::ERROR);
    }

    #[test]
    fn test_load_optional_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        assert!(Config::load_optional(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_optional_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[general]\nverbose = tru\n\n[[groups]]\nname = \"casters\"\nfield = \"role\"\nvalues = [\"MAGE\"]\n",
        )
        .unwrap();

        let err = Config::load_optional(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
