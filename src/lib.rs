//! figcat - browse a collectible-figure checklist.
//!
//! The checklist is loaded once into a [`RecordStore`] and never changes.
//! Every query filters and aggregates it into a fresh view, so a store can
//! be shared freely between concurrent request handlers.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod groups;
pub mod models;
pub mod pages;
pub mod report;
pub mod store;

pub use analysis::{
    aggregate, filter_by_field, filter_by_group, rank_sort, sort_by_name, Drilldown,
    DrilldownResult, KeyOrder,
};
pub use error::{IngestionError, QueryError};
pub use groups::{Group, GroupRegistry};
pub use models::{Checklist, Field, Figure, FrequencyTable};
pub use store::RecordStore;
