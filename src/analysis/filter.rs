//! Figure filtering.
//!
//! Every filter returns a fresh, name-sorted subset; the input is never
//! modified. Values are compared exactly, so callers pass the upper-cased
//! form the dataset was ingested with.

use super::aggregator::aggregate;
use crate::error::QueryError;
use crate::models::{Field, Figure, FrequencyTable};
use serde::Serialize;
use tracing::debug;

/// Number of unconstrained dimensions a drilldown surfaces.
pub const SURFACED_DIMENSIONS: usize = 2;

/// Sort figures by name, ascending.
pub fn sort_by_name(mut figures: Vec<Figure>) -> Vec<Figure> {
    figures.sort_by(|a, b| a.name.cmp(&b.name));
    figures
}

/// Figures whose `field` equals `value`.
///
/// For `Release` a figure matches when `value` is any of its releases; it
/// is included once even if the release is listed twice. The result length
/// equals `aggregate(figures, field)[value]` only while each figure's
/// release entries are distinct.
pub fn filter_by_field(figures: &[Figure], field: Field, value: &str) -> Vec<Figure> {
    let matched = figures
        .iter()
        .filter(|f| field.values(f).iter().any(|v| v == value))
        .cloned()
        .collect();

    sort_by_name(matched)
}

/// Figures whose `field` equals any of `group_values`.
///
/// Each figure appears at most once. Only faction, race and role support
/// group filtering.
pub fn filter_by_group<S: AsRef<str>>(
    figures: &[Figure],
    field: Field,
    group_values: &[S],
) -> Result<Vec<Figure>, QueryError> {
    if !field.supports_groups() {
        return Err(QueryError::UnsupportedGroupField(field));
    }

    let matched = figures
        .iter()
        .filter(|f| {
            field
                .values(f)
                .iter()
                .any(|v| group_values.iter().any(|g| g.as_ref() == v))
        })
        .cloned()
        .collect();

    Ok(sort_by_name(matched))
}

/// A compound filter over up to five fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Drilldown {
    pub faction: Option<String>,
    pub race: Option<String>,
    pub release: Option<String>,
    pub role: Option<String>,
    pub scale: Option<String>,
}

/// Outcome of applying a [`Drilldown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrilldownResult {
    /// Figures matching every supplied constraint, sorted by name.
    pub figures: Vec<Figure>,
    /// Tables for the first unconstrained dimensions in priority order.
    pub remaining: Vec<(Field, FrequencyTable)>,
}

impl Drilldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `field` to `value`, replacing any earlier constraint.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// The constraint on `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Faction => self.faction.as_deref(),
            Field::Race => self.race.as_deref(),
            Field::Release => self.release.as_deref(),
            Field::Role => self.role.as_deref(),
            Field::Scale => self.scale.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Faction => &mut self.faction,
            Field::Race => &mut self.race,
            Field::Release => &mut self.release,
            Field::Role => &mut self.role,
            Field::Scale => &mut self.scale,
        }
    }

    /// Supplied constraints in priority order.
    pub fn constraints(&self) -> Vec<(Field, &str)> {
        Field::PRIORITY
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// Unconstrained fields in priority order.
    pub fn unconstrained(&self) -> Vec<Field> {
        Field::PRIORITY
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    /// Narrow `figures` by each supplied constraint in priority order.
    ///
    /// Fails before filtering when fewer than [`SURFACED_DIMENSIONS`] fields
    /// are left unconstrained.
    pub fn apply(&self, figures: &[Figure]) -> Result<DrilldownResult, QueryError> {
        let free = self.unconstrained();
        if free.len() < SURFACED_DIMENSIONS {
            return Err(QueryError::InsufficientDimensions {
                required: SURFACED_DIMENSIONS,
                available: free.len(),
            });
        }

        let mut current = sort_by_name(figures.to_vec());
        for (field, value) in self.constraints() {
            current = filter_by_field(&current, field, value);
            debug!("Drilldown {}={} left {} figures", field, value, current.len());
        }

        let remaining = free
            .into_iter()
            .take(SURFACED_DIMENSIONS)
            .map(|field| (field, aggregate(&current, field)))
            .collect();

        Ok(DrilldownResult {
            figures: current,
            remaining,
        })
    }
}
