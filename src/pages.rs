//! Catalog views.
//!
//! Each function answers one kind of browse request against the record
//! store and returns a serialisable view for a renderer. Views are built
//! fresh per call and share nothing with the store.

use crate::analysis::{
    aggregate, filter_by_field, filter_by_group, rank_sort, total, Drilldown, KeyOrder,
};
use crate::error::QueryError;
use crate::groups::GroupRegistry;
use crate::models::{Field, Figure, FrequencyTable};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::debug;

/// A frequency table with its display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewTable {
    pub field: Field,
    /// Display order of the keys; rank order unless reordered.
    pub order: Vec<String>,
    pub counts: FrequencyTable,
}

impl ViewTable {
    pub fn new(field: Field, counts: FrequencyTable) -> Self {
        Self {
            field,
            order: rank_sort(&counts),
            counts,
        }
    }

    /// Re-sort the keys.
    pub fn reorder(&mut self, order: KeyOrder) {
        self.order = order.sort(&self.counts);
    }

    /// `(value, count)` pairs in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|k| (k.as_str(), self.counts.get(k).copied().unwrap_or(0)))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Distinct values of one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTotal {
    pub field: Field,
    pub distinct: usize,
}

/// Figure count of one configured group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupTotal {
    pub name: String,
    pub field: Field,
    pub figures: usize,
}

/// Catalog-wide totals.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub figures: usize,
    pub fields: Vec<FieldTotal>,
    pub groups: Vec<GroupTotal>,
}

/// Every value of one field, most populous first.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView {
    pub field: Field,
    /// Number of distinct values.
    pub total: usize,
    /// Sum of all counts. Exceeds the figure count for multi-valued fields.
    pub entries: usize,
    pub table: ViewTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Detail,
    Group,
    Drilldown,
}

/// A subset of figures with tables over the other dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub kind: DetailKind,
    pub title: String,
    /// Field the subset was selected on; absent for drilldowns.
    pub field: Option<Field>,
    /// The value(s) the subset was selected with.
    pub query: String,
    pub total: usize,
    pub figures: Vec<Figure>,
    pub tables: Vec<ViewTable>,
}

/// Catalog totals: figures, distinct values per field, figures per group.
pub fn summary(store: &RecordStore, groups: &GroupRegistry) -> Result<SummaryView, QueryError> {
    let fields = Field::PRIORITY
        .into_iter()
        .map(|field| FieldTotal {
            field,
            distinct: aggregate(store.figures(), field).len(),
        })
        .collect();

    let groups = groups
        .iter()
        .map(|group| -> Result<GroupTotal, QueryError> {
            let members = filter_by_group(store.figures(), group.field, &group.values)?;
            Ok(GroupTotal {
                name: group.name.clone(),
                field: group.field,
                figures: members.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SummaryView {
        figures: store.len(),
        fields,
        groups,
    })
}

/// Directory of every value of `field`.
pub fn directory(store: &RecordStore, field: Field) -> DirectoryView {
    let counts = aggregate(store.figures(), field);

    DirectoryView {
        field,
        total: counts.len(),
        entries: total(&counts),
        table: ViewTable::new(field, counts),
    }
}

/// Figures with `field` equal to `value`, plus the related tables.
pub fn detail(store: &RecordStore, field: Field, value: &str) -> DetailView {
    let figures = filter_by_field(store.figures(), field, value);
    debug!("{}={} matched {} figures", field, value, figures.len());

    DetailView {
        kind: DetailKind::Detail,
        title: format!("{} {}", value.to_uppercase(), field.title()),
        field: Some(field),
        query: value.to_string(),
        total: figures.len(),
        tables: related_tables(&figures, field),
        figures,
    }
}

/// Figures belonging to the named group, plus the related tables.
pub fn group_detail(
    store: &RecordStore,
    groups: &GroupRegistry,
    field: Field,
    name: &str,
) -> Result<DetailView, QueryError> {
    let group = groups.get(field, name)?;
    let figures = filter_by_group(store.figures(), field, &group.values)?;
    let members = group.values.join(", ");
    debug!("Group {} {} matched {} figures", field, group.name, figures.len());

    Ok(DetailView {
        kind: DetailKind::Group,
        title: format!("{} {}: {}", group.name.to_uppercase(), field.title(), members),
        field: Some(field),
        query: members,
        total: figures.len(),
        tables: related_tables(&figures, field),
        figures,
    })
}

/// Figures matching every supplied constraint, plus the two remaining tables.
pub fn drilldown(store: &RecordStore, drill: &Drilldown) -> Result<DetailView, QueryError> {
    let result = drill.apply(store.figures())?;

    let constraints = drill.constraints();
    let title_parts: Vec<String> = constraints
        .iter()
        .map(|(field, value)| format!("{} {}", value.to_uppercase(), field.title()))
        .collect();
    let query: Vec<String> = constraints
        .iter()
        .map(|(field, value)| format!("{}={}", field, value))
        .collect();

    Ok(DetailView {
        kind: DetailKind::Drilldown,
        title: format!("Drilldown: {}", title_parts.join("; ")),
        field: None,
        query: query.join(", "),
        total: result.figures.len(),
        figures: result.figures,
        tables: result
            .remaining
            .into_iter()
            .map(|(field, counts)| ViewTable::new(field, counts))
            .collect(),
    })
}

fn related_tables(figures: &[Figure], field: Field) -> Vec<ViewTable> {
    field
        .related()
        .into_iter()
        .map(|other| ViewTable::new(other, aggregate(figures, other)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    #[test]
    fn test_summary() {
        let view = summary(&store::fixture(), &GroupRegistry::default()).unwrap();
        assert_eq!(view.figures, 12);

        let distinct: Vec<usize> = view.fields.iter().map(|t| t.distinct).collect();
        assert_eq!(distinct, vec![7, 8, 4, 5, 2]);

        let count = |name: &str| {
            view.groups
                .iter()
                .find(|g| g.name == name)
                .map(|g| g.figures)
        };
        assert_eq!(count("light"), Some(5));
        assert_eq!(count("dark"), Some(6));
        assert_eq!(count("splinter"), Some(1));
        assert_eq!(count("goblin"), Some(2));
        assert_eq!(count("orc"), Some(3));
        assert_eq!(count("anthro"), Some(0));
    }

    #[test]
    fn test_directory() {
        let view = directory(&store::fixture(), Field::Release);
        assert_eq!(view.total, 4);
        assert_eq!(view.entries, 13);
        assert_eq!(view.table.order[0], "WASTELAND");
        let rows: Vec<(&str, usize)> = view.table.rows().collect();
        assert_eq!(rows[1], ("ADVENTURES", 3));
    }

    #[test]
    fn test_directory_reorder() {
        let mut view = directory(&store::fixture(), Field::Scale);
        assert_eq!(view.table.order, vec!["6 INCH", "4 INCH"]);
        view.table.reorder(KeyOrder::Key);
        assert_eq!(view.table.order, vec!["4 INCH", "6 INCH"]);
    }

    #[test]
    fn test_detail() {
        let view = detail(&store::fixture(), Field::Race, "ORC");
        assert_eq!(view.title, "ORC Race");
        assert_eq!(view.total, 3);
        assert_eq!(view.figures[0].name, "Bearok");

        let fields: Vec<Field> = view.tables.iter().map(|t| t.field).collect();
        assert_eq!(
            fields,
            vec![Field::Role, Field::Faction, Field::Release, Field::Scale]
        );
        assert_eq!(view.tables[0].order, vec!["WARRIOR", "WARLORD"]);
    }

    #[test]
    fn test_detail_no_match() {
        let view = detail(&store::fixture(), Field::Faction, "XYLONA'S FLOCK");
        assert_eq!(view.total, 0);
        assert!(view.tables.iter().all(ViewTable::is_empty));
    }

    #[test]
    fn test_group_detail() {
        let view = group_detail(
            &store::fixture(),
            &GroupRegistry::default(),
            Field::Race,
            "goblin",
        )
        .unwrap();

        assert_eq!(view.kind, DetailKind::Group);
        assert!(view.title.starts_with("GOBLIN Race: GOBLIN, GREATER GOBLIN"));
        assert_eq!(view.total, 2);
    }

    #[test]
    fn test_group_detail_unknown() {
        let err = group_detail(
            &store::fixture(),
            &GroupRegistry::default(),
            Field::Race,
            "hobbit",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownGroup { .. }));
    }

    #[test]
    fn test_drilldown_view() {
        let drill = Drilldown::new()
            .with(Field::Race, "ORC")
            .with(Field::Faction, "LEGION OF ARETHYR");
        let view = drilldown(&store::fixture(), &drill).unwrap();

        assert_eq!(view.title, "Drilldown: LEGION OF ARETHYR Faction; ORC Race");
        assert_eq!(view.query, "faction=LEGION OF ARETHYR, race=ORC");
        assert_eq!(view.total, 2);
        assert_eq!(view.tables.len(), 2);
        assert_eq!(view.tables[0].field, Field::Release);
        assert_eq!(view.tables[0].order, vec!["SOUL SPILLER", "WASTELAND"]);
        assert_eq!(view.tables[1].field, Field::Role);
        assert_eq!(view.tables[1].order, vec!["WARLORD", "WARRIOR"]);
    }
}
