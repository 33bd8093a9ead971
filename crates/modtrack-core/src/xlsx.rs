//! Styled xlsx export with author colour bands

use crate::error::{Error, Result};
use crate::layout::SheetRow;
use std::path::Path;

/// Background colours handed out to authors in order of first appearance
pub const AUTHOR_PALETTE: [u32; 10] = [
    0xE6F3FF, // light blue
    0xFFE6E6, // light red
    0xE6FFE6, // light green
    0xFFF4E6, // light orange
    0xF0E6FF, // light purple
    0xFFFFE6, // light yellow
    0xFFE6F0, // light pink
    0xE6FFFF, // light cyan
    0xF5E6D3, // light brown
    0xE6E6FF, // light lavender
];

/// Colour for the n-th distinct author, cycling through the palette
pub fn author_color(index: usize) -> u32 {
    AUTHOR_PALETTE[index % AUTHOR_PALETTE.len()]
}

/// Whether this build can write xlsx files
pub const fn xlsx_supported() -> bool {
    cfg!(feature = "xlsx")
}

#[cfg(feature = "xlsx")]
pub use enabled::write_xlsx;

#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(_rows: &[SheetRow], _path: &Path) -> Result<()> {
    Err(Error::RichEncodingUnavailable)
}

#[cfg(feature = "xlsx")]
mod enabled {
    use super::*;
    use crate::layout::{RowStyle, COLUMN_COUNT};
    use rust_xlsxwriter::{Color, Format, Workbook};
    use std::collections::HashMap;
    use tracing::debug;

    const SHEET_NAME: &str = "Mods";

    struct Styles {
        bold: Format,
        stats_header: Format,
        section_header: Format,
        column_header: Format,
        authors: HashMap<String, Format>,
    }

    impl Styles {
        fn new(rows: &[SheetRow]) -> Self {
            let mut authors = HashMap::new();
            for row in rows {
                if let Some(RowStyle::Author(author)) = &row.style {
                    if !authors.contains_key(author) {
                        let color = author_color(authors.len());
                        authors.insert(
                            author.clone(),
                            Format::new().set_background_color(Color::RGB(color)),
                        );
                    }
                }
            }
            debug!("assigned {} author colours", authors.len());

            Self {
                bold: Format::new().set_bold(),
                stats_header: Format::new()
                    .set_bold()
                    .set_font_size(12)
                    .set_background_color(Color::RGB(0xE0E0E0)),
                section_header: Format::new()
                    .set_bold()
                    .set_background_color(Color::RGB(0xCCCCCC)),
                column_header: Format::new()
                    .set_bold()
                    .set_font_color(Color::White)
                    .set_background_color(Color::RGB(0x4A90E2)),
                authors,
            }
        }

        fn get(&self, style: &RowStyle) -> Option<&Format> {
            match style {
                RowStyle::StatsHeader => Some(&self.stats_header),
                RowStyle::SectionHeader => Some(&self.section_header),
                RowStyle::Bold => Some(&self.bold),
                RowStyle::ColumnHeader => Some(&self.column_header),
                RowStyle::Author(author) => self.authors.get(author),
            }
        }
    }

    /// Write the rows to a single-sheet workbook
    pub fn write_xlsx(rows: &[SheetRow], path: &Path) -> Result<()> {
        let styles = Styles::new(rows);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for col in (0u16..).take(COLUMN_COUNT) {
            sheet.set_column_width(col, 24)?;
        }

        for (row_num, row) in (0u32..).zip(rows) {
            match row.style.as_ref().and_then(|s| styles.get(s)) {
                Some(format) => {
                    // Styled rows span the full table width so bands line up
                    for (col, cell) in (0u16..).zip(padded(&row.cells)) {
                        if cell.is_empty() {
                            sheet.write_blank(row_num, col, format)?;
                        } else {
                            sheet.write_string_with_format(row_num, col, cell, format)?;
                        }
                    }
                }
                None => {
                    for (col, cell) in (0u16..).zip(&row.cells) {
                        if !cell.is_empty() {
                            sheet.write_string(row_num, col, cell)?;
                        }
                    }
                }
            }
        }

        workbook.save(path).map_err(Error::from)
    }

    fn padded(cells: &[String]) -> impl Iterator<Item = &str> {
        let fill = COLUMN_COUNT.saturating_sub(cells.len());
        cells
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat("").take(fill))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::layout::build_layout;
        use crate::record::ModRecord;
        use crate::stats::compute_stats;

        #[test]
        fn test_write_xlsx_creates_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("out.xlsx");
            let records = vec![ModRecord {
                name: "Jotunn".to_string(),
                author: "ValheimModding".to_string(),
                version: "2.20.0".to_string(),
                description: String::new(),
                enabled: true,
                website: String::new(),
            }];
            let stats = compute_stats(&records, "Default");

            write_xlsx(&build_layout(&records, &stats), &path).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            // xlsx is a zip container
            assert_eq!(&bytes[..2], b"PK");
        }

        #[test]
        fn test_styles_one_format_per_author() {
            let rows = vec![
                SheetRow {
                    cells: vec!["a".to_string()],
                    style: Some(RowStyle::Author("a".to_string())),
                },
                SheetRow {
                    cells: vec!["b".to_string()],
                    style: Some(RowStyle::Author("b".to_string())),
                },
                SheetRow {
                    cells: vec!["a".to_string()],
                    style: Some(RowStyle::Author("a".to_string())),
                },
            ];
            assert_eq!(Styles::new(&rows).authors.len(), 2);
        }
    }
}
