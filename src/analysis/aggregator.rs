//! Frequency aggregation and ordering.
//!
//! This module counts field values over a set of figures and orders the
//! resulting tables for display.

use crate::models::{Field, Figure, FrequencyTable};
use std::cmp::Reverse;

/// Count each distinct value of `field` across `figures`.
///
/// For `Release` every element of every release sequence is counted, so
/// the sum of the table is the number of (figure, release) pairs.
pub fn aggregate(figures: &[Figure], field: Field) -> FrequencyTable {
    let mut table = FrequencyTable::new();

    for figure in figures {
        for value in field.values(figure) {
            *table.entry(value.clone()).or_default() += 1;
        }
    }

    table
}

/// Keys ordered by descending count, ties broken by ascending key.
pub fn rank_sort(table: &FrequencyTable) -> Vec<String> {
    let mut keys: Vec<&String> = table.keys().collect();
    keys.sort_by(|a, b| table[*b].cmp(&table[*a]).then_with(|| a.cmp(b)));
    keys.into_iter().cloned().collect()
}

/// Keys in ascending order.
pub fn sort_keys(table: &FrequencyTable) -> Vec<String> {
    let mut keys: Vec<String> = table.keys().cloned().collect();
    keys.sort();
    keys
}

/// Keys by descending count only.
///
/// Equal counts keep ascending key order; hash map iteration order would
/// otherwise leak into the output.
pub fn sort_by_count(table: &FrequencyTable) -> Vec<String> {
    let mut keys = sort_keys(table);
    keys.sort_by_key(|k| Reverse(table[k]));
    keys
}

/// How to order the keys of a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KeyOrder {
    /// Most figures first, ties alphabetical
    #[default]
    Rank,
    /// Alphabetical
    Key,
    /// Most figures first
    Count,
}

impl KeyOrder {
    pub fn sort(self, table: &FrequencyTable) -> Vec<String> {
        match self {
            KeyOrder::Rank => rank_sort(table),
            KeyOrder::Key => sort_keys(table),
            KeyOrder::Count => sort_by_count(table),
        }
    }
}

/// Sum of all counts in a table.
pub fn total(table: &FrequencyTable) -> usize {
    table.values().sum()
}
