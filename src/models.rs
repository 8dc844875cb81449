//! Data models for the figure catalog.
//!
//! This module contains the persisted record shapes and the closed set of
//! field selectors every query in the crate is expressed in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Occurrence count per distinct value of one field.
pub type FrequencyTable = HashMap<String, usize>;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    /// Display name (not guaranteed unique).
    pub name: String,
    /// Faction, upper-cased at ingestion.
    pub faction: String,
    /// Race, upper-cased at ingestion.
    pub race: String,
    /// Role, upper-cased at ingestion.
    pub role: String,
    /// Release batches the figure appeared in.
    #[serde(rename = "released", default)]
    pub release: Vec<String>,
    /// Source page the record was scraped from.
    pub url: String,
    /// Scale; missing in early schema versions.
    #[serde(default)]
    pub scale: String,
}

impl Figure {
    /// Returns `true` if any single-valued categorical field is blank.
    pub fn has_blank_category(&self) -> bool {
        [&self.faction, &self.race, &self.role, &self.scale]
            .iter()
            .any(|v| v.trim().is_empty())
    }
}

/// The persisted dataset document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub figures: Vec<Figure>,
}

/// Selector naming one categorical field of a [`Figure`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Faction,
    Race,
    Release,
    Role,
    Scale,
}

impl Field {
    /// Drilldown priority order.
    pub const PRIORITY: [Field; 5] = [
        Field::Faction,
        Field::Race,
        Field::Release,
        Field::Role,
        Field::Scale,
    ];

    /// Values of this field on a figure.
    ///
    /// Single-valued fields yield exactly one element; `Release` yields the
    /// whole release sequence (possibly empty).
    pub fn values(self, figure: &Figure) -> &[String] {
        match self {
            Field::Faction => std::slice::from_ref(&figure.faction),
            Field::Race => std::slice::from_ref(&figure.race),
            Field::Role => std::slice::from_ref(&figure.role),
            Field::Scale => std::slice::from_ref(&figure.scale),
            Field::Release => &figure.release,
        }
    }

    /// Returns `true` if the field holds a sequence rather than one value.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Field::Release)
    }

    /// Returns `true` if named groups can be defined over this field.
    pub fn supports_groups(self) -> bool {
        matches!(self, Field::Faction | Field::Race | Field::Role)
    }

    /// Lowercase name used in config files and command lines.
    pub fn label(self) -> &'static str {
        match self {
            Field::Faction => "faction",
            Field::Race => "race",
            Field::Release => "release",
            Field::Role => "role",
            Field::Scale => "scale",
        }
    }

    /// Capitalised name used in titles.
    pub fn title(self) -> &'static str {
        match self {
            Field::Faction => "Faction",
            Field::Race => "Race",
            Field::Release => "Release",
            Field::Role => "Role",
            Field::Scale => "Scale",
        }
    }

    /// The other four fields, in the order a detail view lists them.
    pub fn related(self) -> [Field; 4] {
        match self {
            Field::Race => [Field::Role, Field::Faction, Field::Release, Field::Scale],
            Field::Faction => [Field::Role, Field::Race, Field::Release, Field::Scale],
            Field::Role => [Field::Race, Field::Faction, Field::Release, Field::Scale],
            Field::Release => [Field::Race, Field::Role, Field::Faction, Field::Scale],
            Field::Scale => [Field::Race, Field::Role, Field::Faction, Field::Release],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "faction" => Ok(Field::Faction),
            "race" => Ok(Field::Race),
            "release" | "released" => Ok(Field::Release),
            "role" => Ok(Field::Role),
            "scale" => Ok(Field::Scale),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}
