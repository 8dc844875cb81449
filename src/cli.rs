//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::analysis::{Drilldown, KeyOrder};
use crate::models::Field;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// figcat - browse a collectible-figure checklist
///
/// Directory listings, per-value details, named groups and two-way
/// drilldowns over a scraped checklist JSON document. Values are matched
/// exactly, so pass them upper-cased as stored.
///
/// Examples:
///   figcat summary
///   figcat list race
///   figcat show faction "LEGION OF ARETHYR"
///   figcat group race goblin
///   figcat drill --faction "LEGION OF ARETHYR" --race ORC
///   figcat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Checklist JSON document to browse
    ///
    /// Defaults to the config file setting, then figurechecklist.json.
    #[arg(short, long, value_name = "FILE", env = "FIGCAT_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .figcat.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Leave source links out of figure listings
    #[arg(long, global = true)]
    pub no_urls: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .figcat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Browse commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Catalog totals and group sizes
    Summary,

    /// Every value of a field with its figure count
    List {
        field: Field,

        /// Ordering of the listed values
        #[arg(long, default_value = "rank")]
        sort: KeyOrder,
    },

    /// Figures with one field value, and how they break down
    Show { field: Field, value: String },

    /// Figures in a named group (faction, race or role)
    Group { field: Field, name: String },

    /// List the configured groups
    Groups,

    /// Narrow by several fields at once
    Drill {
        #[arg(long, value_name = "FACTION")]
        faction: Option<String>,
        #[arg(long, value_name = "RACE")]
        race: Option<String>,
        #[arg(long, value_name = "RELEASE")]
        release: Option<String>,
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,
        #[arg(long, value_name = "SCALE")]
        scale: Option<String>,
    },
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Command {
    /// The drilldown described by a `drill` command.
    pub fn drilldown(&self) -> Option<Drilldown> {
        match self {
            Command::Drill {
                faction,
                race,
                release,
                role,
                scale,
            } => Some(Drilldown {
                faction: faction.clone(),
                race: race.clone(),
                release: release.clone(),
                role: role.clone(),
                scale: scale.clone(),
            }),
            _ => None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        let command = self
            .command
            .as_ref()
            .ok_or_else(|| "A command is required (try --help)".to_string())?;

        match command {
            Command::Show { value, .. } if value.trim().is_empty() => {
                Err("Value must not be empty".to_string())
            }
            Command::Group { field, .. } if !field.supports_groups() => Err(format!(
                "Groups are only defined for faction, race and role, not {}",
                field
            )),
            Command::Drill { .. } => {
                let drill = command.drilldown().unwrap_or_default();
                let constraints = drill.constraints();
                if constraints.is_empty() {
                    return Err(
                        "Drill needs at least one of --faction, --race, --release, --role, --scale"
                            .to_string(),
                    );
                }
                if constraints.iter().any(|(_, v)| v.trim().is_empty()) {
                    return Err("Drill values must not be empty".to_string());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Log level from the flags alone, used before any config file is read.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command: Some(command),
            data: None,
            config: None,
            format: None,
            output: None,
            no_urls: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    fn drill(race: Option<&str>, scale: Option<&str>) -> Command {
        Command::Drill {
            faction: None,
            race: race.map(String::from),
            release: None,
            role: None,
            scale: scale.map(String::from),
        }
    }

    #[test]
    fn test_parse_drill() {
        let args = Args::try_parse_from([
            "figcat",
            "drill",
            "--faction",
            "LEGION OF ARETHYR",
            "--race",
            "ORC",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        let drill = args.command.unwrap().drilldown().unwrap();
        assert_eq!(drill.faction.as_deref(), Some("LEGION OF ARETHYR"));
        assert_eq!(drill.race.as_deref(), Some("ORC"));
        assert!(drill.role.is_none());
    }

    #[test]
    fn test_parse_list_sort() {
        let args = Args::try_parse_from(["figcat", "list", "release", "--sort", "key"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::List {
                field: Field::Release,
                sort: KeyOrder::Key
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(Args::try_parse_from(["figcat", "list", "colour"]).is_err());
    }

    #[test]
    fn test_validation_requires_command() {
        let mut args = make_args(Command::Summary);
        args.command = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_group_field() {
        let args = make_args(Command::Group {
            field: Field::Release,
            name: "early".to_string(),
        });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_drill() {
        assert!(make_args(drill(None, None)).validate().is_err());
        assert!(make_args(drill(Some(""), None)).validate().is_err());
        assert!(make_args(drill(Some("ORC"), Some("6 INCH"))).validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Summary);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Summary);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
