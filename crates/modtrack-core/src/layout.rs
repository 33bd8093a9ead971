//! Row layout shared by the CSV and xlsx exports
//!
//! Both encodings carry the same cells in the same order; only the xlsx
//! writer looks at the row styles.

use crate::record::ModRecord;
use crate::stats::ProfileStats;

/// Column names of the mod table. Snapshot reading anchors on this line.
pub const MOD_TABLE_HEADERS: [&str; 6] = [
    "Author",
    "Mod Name",
    "Version",
    "Enabled",
    "Description",
    "Website",
];

/// Width of the widest section (the mod table)
pub const COLUMN_COUNT: usize = MOD_TABLE_HEADERS.len();

const SUB_TABLE_HEADERS: [&str; 3] = ["Mod Name", "Author", "Version"];

/// Visual role of a row in the rich export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStyle {
    /// "PROFILE STATISTICS" and "COMPLETE MOD LIST"
    StatsHeader,
    /// Titles of the top-authors and newest/oldest sections
    SectionHeader,
    /// Labels and sub-table headers
    Bold,
    /// Header row of the mod table
    ColumnHeader,
    /// A mod row, banded by its author
    Author(String),
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub cells: Vec<String>,
    pub style: Option<RowStyle>,
}

impl SheetRow {
    fn plain<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            style: None,
        }
    }

    fn styled<I, S>(cells: I, style: RowStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            style: Some(style),
            ..Self::plain(cells)
        }
    }

    fn blank() -> Self {
        Self {
            cells: Vec::new(),
            style: None,
        }
    }

    /// True for separator rows
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}

/// Lay out the statistics preamble followed by the full mod table.
///
/// Records are written in the order given; callers sort them first.
pub fn build_layout(records: &[ModRecord], stats: &ProfileStats) -> Vec<SheetRow> {
    let mut rows = vec![
        SheetRow::styled(["PROFILE STATISTICS"], RowStyle::StatsHeader),
        SheetRow::blank(),
        SheetRow::styled(
            ["Profile Name:".to_string(), stats.profile_name.clone()],
            RowStyle::Bold,
        ),
        SheetRow::plain(["Export Date:".to_string(), stats.export_date_text()]),
        SheetRow::plain(["Total Mods:".to_string(), stats.total_mods.to_string()]),
        SheetRow::plain(["Enabled Mods:".to_string(), stats.enabled_mods.to_string()]),
        SheetRow::plain(["Disabled Mods:".to_string(), stats.disabled_mods.to_string()]),
        SheetRow::plain(["Unique Authors:".to_string(), stats.unique_authors.to_string()]),
        SheetRow::blank(),
        SheetRow::styled(["TOP AUTHORS (by mod count)"], RowStyle::SectionHeader),
    ];

    for (author, count) in &stats.top_authors {
        rows.push(SheetRow::plain([author.clone(), format!("{} mods", count)]));
    }
    rows.push(SheetRow::blank());

    push_version_table(&mut rows, "NEWEST MODS (by version)", &stats.newest_mods);
    push_version_table(&mut rows, "OLDEST MODS (by version)", &stats.oldest_mods);
    rows.push(SheetRow::blank());

    rows.push(SheetRow::styled(["COMPLETE MOD LIST"], RowStyle::StatsHeader));
    rows.push(SheetRow::blank());
    rows.push(SheetRow::styled(MOD_TABLE_HEADERS, RowStyle::ColumnHeader));

    for record in records {
        rows.push(SheetRow::styled(
            [
                record.author.clone(),
                record.name.clone(),
                record.version.clone(),
                record.enabled_text().to_string(),
                record.description.clone(),
                record.website.clone(),
            ],
            RowStyle::Author(record.author.clone()),
        ));
    }

    rows
}

fn push_version_table(rows: &mut Vec<SheetRow>, title: &str, records: &[ModRecord]) {
    rows.push(SheetRow::styled([title], RowStyle::SectionHeader));
    rows.push(SheetRow::styled(SUB_TABLE_HEADERS, RowStyle::Bold));
    for record in records {
        rows.push(SheetRow::plain([
            record.name.clone(),
            record.author.clone(),
            record.version.clone(),
        ]));
    }
    rows.push(SheetRow::blank());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats_at;
    use chrono::NaiveDate;

    fn sample() -> (Vec<ModRecord>, ProfileStats) {
        let records = vec![ModRecord {
            name: "WardIsLove".to_string(),
            author: "Azumatt".to_string(),
            version: "3.5.1".to_string(),
            description: "Wards".to_string(),
            enabled: true,
            website: String::new(),
        }];
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let stats = compute_stats_at(&records, "Default", at);
        (records, stats)
    }

    #[test]
    fn test_layout_sections_in_order() {
        let (records, stats) = sample();
        let rows = build_layout(&records, &stats);

        let titles: Vec<&str> = rows
            .iter()
            .filter(|r| {
                matches!(
                    r.style,
                    Some(RowStyle::StatsHeader) | Some(RowStyle::SectionHeader)
                )
            })
            .map(|r| r.cells[0].as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "PROFILE STATISTICS",
                "TOP AUTHORS (by mod count)",
                "NEWEST MODS (by version)",
                "OLDEST MODS (by version)",
                "COMPLETE MOD LIST",
            ]
        );
    }

    #[test]
    fn test_layout_ends_with_mod_table() {
        let (records, stats) = sample();
        let rows = build_layout(&records, &stats);

        let header = &rows[rows.len() - 2];
        assert_eq!(header.style, Some(RowStyle::ColumnHeader));
        assert_eq!(header.cells, MOD_TABLE_HEADERS.to_vec());

        let last = rows.last().unwrap();
        assert_eq!(last.style, Some(RowStyle::Author("Azumatt".to_string())));
        assert_eq!(
            last.cells,
            vec!["Azumatt", "WardIsLove", "3.5.1", "Yes", "Wards", ""]
        );
    }

    #[test]
    fn test_layout_top_author_line() {
        let (records, stats) = sample();
        let rows = build_layout(&records, &stats);
        assert!(rows
            .iter()
            .any(|r| r.cells == vec!["Azumatt".to_string(), "1 mods".to_string()]));
    }
}
