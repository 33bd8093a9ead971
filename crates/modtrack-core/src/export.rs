//! Writing a profile export (CSV, plus xlsx when available)

use crate::error::{Error, Result};
use crate::layout::{build_layout, SheetRow};
use crate::record::ModRecord;
use crate::stats::ProfileStats;
use crate::xlsx::{write_xlsx, xlsx_supported};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Timestamp used in export file names, e.g. `Mar-09-2024_02:05PM`
pub const FILE_TIMESTAMP_FORMAT: &str = "%b-%d-%Y_%I:%M%p";

/// Whether the styled export can be produced in this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichEncoding {
    Available,
    Unavailable,
}

impl RichEncoding {
    /// Resolve from the features this binary was built with
    pub fn detect() -> Self {
        if xlsx_supported() {
            RichEncoding::Available
        } else {
            RichEncoding::Unavailable
        }
    }
}

/// Where exports go and which encodings to produce
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub csv_dir: PathBuf,
    pub xlsx_dir: PathBuf,
    pub rich: RichEncoding,
}

/// Outcome of one export; each encoding succeeds or fails on its own
#[derive(Debug)]
pub struct ExportReport {
    pub csv: Result<PathBuf>,
    /// None when the rich encoding was skipped
    pub xlsx: Option<Result<PathBuf>>,
}

/// Base file name shared by both encodings
pub fn export_file_stem(profile_name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", profile_name, at.format(FILE_TIMESTAMP_FORMAT))
}

/// Export a sorted record list and its statistics
pub fn export_profile(
    records: &[ModRecord],
    stats: &ProfileStats,
    config: &ExportConfig,
) -> ExportReport {
    let rows = build_layout(records, stats);
    let stem = export_file_stem(&stats.profile_name, stats.export_date);

    let csv_path = config.csv_dir.join(format!("{}.csv", stem));
    let csv = ensure_dir(&config.csv_dir)
        .and_then(|_| write_csv(&rows, &csv_path))
        .map(|_| csv_path);
    if let Ok(path) = &csv {
        info!("CSV file created: {}", path.display());
    }

    let xlsx = match config.rich {
        RichEncoding::Available => {
            let xlsx_path = config.xlsx_dir.join(format!("{}.xlsx", stem));
            let result = ensure_dir(&config.xlsx_dir)
                .and_then(|_| write_xlsx(&rows, &xlsx_path))
                .map(|_| xlsx_path);
            if let Ok(path) = &result {
                info!("XLSX file created: {}", path.display());
            }
            Some(result)
        }
        RichEncoding::Unavailable => {
            warn!("XLSX export skipped (rich encoding unavailable)");
            None
        }
    };

    ExportReport { csv, xlsx }
}

/// Write rows as CSV to a file
pub fn write_csv(rows: &[SheetRow], path: &Path) -> Result<()> {
    let content = encode_csv(rows).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode rows as CSV text. Blank rows become empty lines.
pub fn encode_csv(rows: &[SheetRow]) -> std::result::Result<String, csv::Error> {
    let mut out = String::new();
    for row in rows {
        if row.is_blank() {
            out.push('\n');
        } else {
            out.push_str(&csv_line(&row.cells)?);
        }
    }
    Ok(out)
}

/// Quote and join one record, including the trailing newline
fn csv_line(cells: &[String]) -> std::result::Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(cells)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // Input cells were UTF-8, so the quoted output is too
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats_at;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn record(author: &str, name: &str, version: &str, enabled: bool) -> ModRecord {
        ModRecord {
            name: name.to_string(),
            author: author.to_string(),
            version: version.to_string(),
            description: String::new(),
            enabled,
            website: String::new(),
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(export_file_stem("Default", at()), "Default_Mar-09-2024_02:05PM");
    }

    #[test]
    fn test_encode_csv_layout() {
        let records = vec![
            record("Azumatt", "WardIsLove", "3.5.1", true),
            record("RandyKnapp", "EpicLoot", "0.9.35", false),
        ];
        let stats = compute_stats_at(&records, "Default", at());
        let text = encode_csv(&build_layout(&records, &stats)).unwrap();

        let expected = "\
PROFILE STATISTICS

Profile Name:,Default
Export Date:,2024-03-09 14:05:00
Total Mods:,2
Enabled Mods:,1
Disabled Mods:,1
Unique Authors:,2

TOP AUTHORS (by mod count)
Azumatt,1 mods
RandyKnapp,1 mods

NEWEST MODS (by version)
Mod Name,Author,Version
WardIsLove,Azumatt,3.5.1
EpicLoot,RandyKnapp,0.9.35

OLDEST MODS (by version)
Mod Name,Author,Version
EpicLoot,RandyKnapp,0.9.35
WardIsLove,Azumatt,3.5.1


COMPLETE MOD LIST

Author,Mod Name,Version,Enabled,Description,Website
Azumatt,WardIsLove,3.5.1,Yes,,
RandyKnapp,EpicLoot,0.9.35,No,,
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_csv_quotes_fields() {
        let rows = vec![SheetRow {
            cells: vec!["a,b".to_string(), "say \"hi\"".to_string()],
            style: None,
        }];
        assert_eq!(encode_csv(&rows).unwrap(), "\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_export_profile_csv_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            csv_dir: dir.path().join("csv_files"),
            xlsx_dir: dir.path().join("xlsx_files"),
            rich: RichEncoding::Unavailable,
        };
        let records = vec![record("a", "m", "1.0.0", true)];
        let stats = compute_stats_at(&records, "Default", at());

        let report = export_profile(&records, &stats, &config);

        let csv_path = report.csv.unwrap();
        assert_eq!(
            csv_path,
            dir.path().join("csv_files/Default_Mar-09-2024_02:05PM.csv")
        );
        assert!(csv_path.exists());
        assert!(report.xlsx.is_none());
        assert!(!dir.path().join("xlsx_files").exists());
    }

    #[test]
    fn test_csv_failure_does_not_block_other_output() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the csv directory should be
        let blocker = dir.path().join("csv_files");
        fs::write(&blocker, "").unwrap();
        let config = ExportConfig {
            csv_dir: blocker,
            xlsx_dir: dir.path().join("xlsx_files"),
            rich: RichEncoding::detect(),
        };
        let records = vec![record("a", "m", "1.0.0", true)];
        let stats = compute_stats_at(&records, "Default", at());

        let report = export_profile(&records, &stats, &config);

        assert!(report.csv.is_err());
        if xlsx_supported() {
            assert!(report.xlsx.unwrap().is_ok());
        } else {
            assert!(report.xlsx.is_none());
        }
    }
}
