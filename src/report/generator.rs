//! Markdown and JSON report generation.
//!
//! This module turns catalog views into text for the terminal or a file.

use crate::config::ReportConfig;
use crate::groups::GroupRegistry;
use crate::models::{Field, Figure};
use crate::pages::{DetailView, DirectoryView, SummaryView, ViewTable};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

/// Generate the catalog summary.
pub fn generate_summary_markdown(view: &SummaryView) -> String {
    let mut output = String::new();

    output.push_str("# Figure Checklist\n\n");
    output.push_str(&format!("- **Figures:** {}\n", view.figures));
    for total in &view.fields {
        output.push_str(&format!(
            "- **{}:** {}\n",
            plural(total.field),
            total.distinct
        ));
    }
    output.push('\n');

    if !view.groups.is_empty() {
        output.push_str("## Groups\n\n");
        output.push_str("| Group | Field | Figures |\n");
        output.push_str("|:---|:---|:---:|\n");
        for group in &view.groups {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                group.name, group.field, group.figures
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

/// Generate a directory listing for one field.
pub fn generate_directory_markdown(view: &DirectoryView) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", plural(view.field)));
    output.push_str(&format!(
        "*{} distinct values*\n\n",
        view.total
    ));
    if view.field.is_multi_valued() {
        output.push_str(&format!(
            "*{} listings; a figure is counted once per value it lists*\n\n",
            view.entries
        ));
    }
    output.push_str(&generate_table(&view.table));
    output.push_str(&generate_footer());

    output
}

/// Generate a detail, group or drilldown page.
pub fn generate_detail_markdown(view: &DetailView, options: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", view.title));
    output.push_str(&format!("- **Query:** {}\n", view.query));
    output.push_str(&format!("- **Figures:** {}\n\n", view.total));

    for table in &view.tables {
        output.push_str(&format!("## {}\n\n", plural(table.field)));
        output.push_str(&generate_table(table));
    }

    if options.include_figures {
        output.push_str(&generate_figure_list(&view.figures, options.include_urls));
    }

    output.push_str(&generate_footer());
    output
}

/// Generate the list of configured groups.
pub fn generate_groups_markdown(groups: &GroupRegistry) -> String {
    let mut output = String::new();

    output.push_str("# Groups\n\n");

    if groups.is_empty() {
        output.push_str("No groups are configured.\n\n");
    }

    for field in Field::PRIORITY {
        let mut defined = groups.for_field(field).peekable();
        if defined.peek().is_none() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", plural(field)));
        for group in defined {
            output.push_str(&format!(
                "- **{}:** {}\n",
                group.name,
                group.values.join(", ")
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

/// Generate a ranked value/count table.
fn generate_table(table: &ViewTable) -> String {
    if table.is_empty() {
        return "*None*\n\n".to_string();
    }

    let mut section = String::new();

    section.push_str(&format!("| {} | Figures |\n", table.field.title()));
    section.push_str("|:---|:---:|\n");
    for (value, count) in table.rows() {
        let value = if value.is_empty() { "(blank)" } else { value };
        section.push_str(&format!("| {} | {} |\n", value, count));
    }
    section.push('\n');

    section
}

/// Generate the figure listing.
fn generate_figure_list(figures: &[Figure], include_urls: bool) -> String {
    let mut section = String::new();

    section.push_str("## Figures\n\n");

    if figures.is_empty() {
        section.push_str("No figures match.\n\n");
        return section;
    }

    for figure in figures {
        if include_urls && !figure.url.is_empty() {
            section.push_str(&format!("- [{}]({})", figure.name, figure.url));
        } else {
            section.push_str(&format!("- {}", figure.name));
        }
        section.push_str(&format!(
            " ({}, {}, {})\n",
            figure.faction, figure.race, figure.role
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by figcat on {}*\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn plural(field: Field) -> String {
    format!("{}s", field.title())
}

/// Generate a JSON report of any view.
pub fn generate_json_report<T: Serialize + ?Sized>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Drilldown;
    use crate::pages;
    use crate::store;

    #[test]
    fn test_generate_summary_markdown() {
        let view = pages::summary(&store::fixture(), &GroupRegistry::default()).unwrap();
        let markdown = generate_summary_markdown(&view);

        assert!(markdown.contains("# Figure Checklist"));
        assert!(markdown.contains("- **Figures:** 12"));
        assert!(markdown.contains("- **Races:** 8"));
        assert!(markdown.contains("| goblin | race | 2 |"));
    }

    #[test]
    fn test_generate_directory_markdown() {
        let view = pages::directory(&store::fixture(), Field::Role);
        let markdown = generate_directory_markdown(&view);

        assert!(markdown.contains("# Roles"));
        let warrior = markdown.find("| WARRIOR | 4 |").unwrap();
        let scout = markdown.find("| SCOUT | 1 |").unwrap();
        assert!(warrior < scout);
        assert!(!markdown.contains("listings"));
    }

    #[test]
    fn test_generate_release_directory_notes_listings() {
        let view = pages::directory(&store::fixture(), Field::Release);
        let markdown = generate_directory_markdown(&view);

        assert!(markdown.contains("*4 distinct values*"));
        assert!(markdown.contains("*13 listings; a figure is counted once per value it lists*"));
    }

    #[test]
    fn test_generate_detail_markdown() {
        let view = pages::detail(&store::fixture(), Field::Race, "ORC");
        let markdown = generate_detail_markdown(&view, &ReportConfig::default());

        assert!(markdown.contains("# ORC Race"));
        assert!(markdown.contains("## Roles"));
        assert!(markdown.contains("[Gorgo](https://sourcehorsemen.com/mythic-legions/gorgo)"));
    }

    #[test]
    fn test_generate_detail_without_urls() {
        let view = pages::detail(&store::fixture(), Field::Race, "ORC");
        let options = ReportConfig {
            include_urls: false,
            ..ReportConfig::default()
        };
        let markdown = generate_detail_markdown(&view, &options);

        assert!(markdown.contains("- Gorgo (LEGION OF ARETHYR, ORC, WARLORD)"));
        assert!(!markdown.contains("https://"));
    }

    #[test]
    fn test_generate_drilldown_markdown() {
        let drill = Drilldown::new()
            .with(Field::Faction, "LEGION OF ARETHYR")
            .with(Field::Race, "ELF");
        let view = pages::drilldown(&store::fixture(), &drill).unwrap();
        let markdown = generate_detail_markdown(&view, &ReportConfig::default());

        assert!(markdown.contains("## Releases\n\n*None*"));
        assert!(markdown.contains("No figures match."));
    }

    #[test]
    fn test_generate_groups_markdown() {
        let markdown = generate_groups_markdown(&GroupRegistry::default());
        assert!(markdown.contains("## Factions"));
        assert!(markdown.contains("- **splinter:** SONS OF THE RED STAR, HOUSE OF THE NOBLE BEAR"));
        assert!(!markdown.contains("## Roles"));
    }

    #[test]
    fn test_generate_json_report() {
        let view = pages::detail(&store::fixture(), Field::Faction, "LEGION OF ARETHYR");
        let json = generate_json_report(&view).unwrap();

        assert!(json.contains("\"kind\": \"detail\""));
        assert!(json.contains("\"released\""));
        assert!(json.contains("\"order\""));
    }
}
