//! Aggregation and filtering over figure sets.

pub mod aggregator;
pub mod filter;

pub use aggregator::*;
pub use filter::*;
