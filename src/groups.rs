//! Named groups of field values.
//!
//! A group collects several values of one field (for example every goblin
//! race) so they can be browsed together.

use crate::error::QueryError;
use crate::models::Field;
use serde::{Deserialize, Serialize};

/// A named set of values of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub field: Field,
    pub values: Vec<String>,
}

impl Group {
    pub fn new(name: &str, field: Field, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            field,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// All configured groups, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: default_groups(),
        }
    }
}

impl GroupRegistry {
    /// Build a registry, rejecting groups over fields without group support.
    pub fn new(groups: Vec<Group>) -> Result<Self, QueryError> {
        let mut registry = Self { groups: Vec::new() };
        registry.extend(groups)?;
        Ok(registry)
    }

    /// Add groups; a group with the same field and name replaces the old one.
    pub fn extend(&mut self, groups: Vec<Group>) -> Result<(), QueryError> {
        for group in groups {
            if !group.field.supports_groups() {
                return Err(QueryError::UnsupportedGroupField(group.field));
            }
            match self
                .groups
                .iter_mut()
                .find(|g| g.field == group.field && g.name == group.name)
            {
                Some(existing) => *existing = group,
                None => self.groups.push(group),
            }
        }
        Ok(())
    }

    /// Look up a group by field and name (case-insensitive name).
    pub fn get(&self, field: Field, name: &str) -> Result<&Group, QueryError> {
        self.groups
            .iter()
            .find(|g| g.field == field && g.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| QueryError::UnknownGroup {
                field,
                name: name.to_string(),
            })
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(move |g| g.field == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Faction alignments and race clusters of the Mythic Legions line.
pub fn default_groups() -> Vec<Group> {
    vec![
        Group::new(
            "light",
            Field::Faction,
            &[
                "ARMY OF LEODYSSEUS",
                "ORDER OF EATHYRON",
                "CONVOCATION OF BASSYLIA",
                "XYLONA'S FLOCK",
            ],
        ),
        Group::new(
            "dark",
            Field::Faction,
            &[
                "LEGION OF ARETHYR",
                "CONGREGATION OF NECRONOMINUS",
                "ILLYTHIA'S BROOD",
                "CIRCLE OF POXXUS",
            ],
        ),
        Group::new(
            "splinter",
            Field::Faction,
            &["SONS OF THE RED STAR", "HOUSE OF THE NOBLE BEAR"],
        ),
        Group::new(
            "goblin",
            Field::Race,
            &[
                "GOBLIN",
                "GREATER GOBLIN",
                "SWALE GOBLIN",
                "WOODLAND GOBLIN (FUZZMUNK)",
                "GOBLINS",
            ],
        ),
        Group::new(
            "orc",
            Field::Race,
            &[
                "ORC",
                "HUMAN - HALF-ORC",
                "LICHEN ORC",
                "ORAPHIM",
                "ORC AND HUMAN",
                "SHADOW ORC",
                "UUBYR",
            ],
        ),
        Group::new(
            "elf",
            Field::Race,
            &[
                "ELF",
                "SHADOW ELF",
                "FAERIE ELF",
                "ELF - WHISPERLING",
                "FROST ELF",
                "WHISPERLING",
                "WOOD ELF",
            ],
        ),
        Group::new("dwarf", Field::Race, &["DWARF", "DWARVES", "DWARVEN SKELETON"]),
        Group::new("vampire", Field::Race, &["VAMPIRE", "UUBYR", "VARGG", "VOGYRR"]),
        Group::new(
            "undead",
            Field::Race,
            &[
                "SKELETON",
                "ARAKKIGHAST",
                "GHOST",
                "GHOUL",
                "LICH",
                "POISON SKELETON",
                "TURPICULUS",
                "UMANGEIST",
                "UNDEAD HORSE",
                "UNDEAD ANGEL",
            ],
        ),
        Group::new(
            "anthro",
            Field::Race,
            &[
                "AVIAN",
                "BOARRIOR",
                "CENTAUR",
                "DRAGOSYR",
                "EAGLE",
                "FAUN",
                "ELDER FROST DEER",
                "JAGUALLIAN",
                "MINOTAUR",
                "MOOSE",
                "NORTHLANDS MINOTAUR",
                "SATYR",
                "SKORRIAN",
                "SWALE GOBLIN",
                "WOODLAND GOBLIN (FUZZMUNK)",
            ],
        ),
    ]
}
