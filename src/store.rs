//! The record store.
//!
//! The store is built once from the persisted checklist and is read-only
//! afterwards. Clones share the same figures.

use crate::error::IngestionError;
use crate::models::{Checklist, Figure};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Immutable, insertion-ordered collection of figures.
#[derive(Debug, Clone)]
pub struct RecordStore {
    figures: Arc<[Figure]>,
}

/// Anomalies found while validating freshly ingested figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Figures with at least one blank categorical field.
    pub blank_categories: usize,
    /// Names shared by more than one figure.
    pub duplicate_names: Vec<String>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            figures: Arc::from(Vec::new()),
        }
    }
}

impl RecordStore {
    /// Load the store from a checklist JSON document.
    pub fn load(path: &Path) -> Result<Self, IngestionError> {
        let content = std::fs::read_to_string(path).map_err(|source| IngestionError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let checklist: Checklist =
            serde_json::from_str(&content).map_err(|source| IngestionError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_figures(checklist.figures);
        info!("Loaded {} figures from {}", store.len(), path.display());
        Ok(store)
    }

    /// Build a store from figures already in memory.
    pub fn from_figures(figures: Vec<Figure>) -> Self {
        let report = validate(&figures);

        if report.blank_categories > 0 {
            warn!(
                "{} figures have a blank faction, race, role or scale",
                report.blank_categories
            );
        }
        for name in &report.duplicate_names {
            debug!("Duplicate figure name: {}", name);
        }

        Self {
            figures: figures.into(),
        }
    }

    /// All figures in ingestion order.
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

/// Inspect figures for inherited data defects without changing them.
pub fn validate(figures: &[Figure]) -> IngestionReport {
    let blank_categories = figures.iter().filter(|f| f.has_blank_category()).count();

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for figure in figures {
        *name_counts.entry(figure.name.as_str()).or_default() += 1;
    }

    let mut duplicate_names: Vec<String> = name_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    duplicate_names.sort();

    IngestionReport {
        blank_categories,
        duplicate_names,
    }
}

/// The bundled sample checklist, for tests across the crate.
#[cfg(test)]
pub(crate) fn fixture() -> RecordStore {
    let checklist: Checklist =
        serde_json::from_str(include_str!("../fixtures/figurechecklist.json"))
            .expect("fixture parses");
    RecordStore::from_figures(checklist.figures)
}
