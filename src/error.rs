//! Error types for catalog loading and querying.

use crate::models::Field;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the record store from the persisted document.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a valid checklist document.
    #[error("failed to parse dataset {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Caller mistakes rejected by the query layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Group filtering was requested over a field that has no groups.
    #[error("group filtering is not supported on the {0} field")]
    UnsupportedGroupField(Field),

    /// A drilldown left fewer free dimensions than it has to surface.
    #[error("drilldown needs {required} unconstrained dimensions, only {available} left")]
    InsufficientDimensions { required: usize, available: usize },

    /// No group with that name is configured for the field.
    #[error("no {field} group named '{name}'")]
    UnknownGroup { field: Field, name: String },
}
