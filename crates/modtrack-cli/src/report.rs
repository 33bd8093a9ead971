//! Human-readable output for exports and comparisons

use chrono::{DateTime, Local};
use modtrack_core::{split_key, Comparison, ExportFile, ExportReport, Snapshot};
use std::path::Path;

const RULE_WIDTH: usize = 60;

pub fn print_export(report: &ExportReport) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  {}", export_headline(report));
    println!("{}", "=".repeat(RULE_WIDTH));

    match &report.csv {
        Ok(path) => println!("✓ CSV file created: {}", file_name(path)),
        Err(e) => println!("✗ CSV export failed: {}", e),
    }
    match &report.xlsx {
        Some(Ok(path)) => println!("✓ XLSX file created: {}", file_name(path)),
        Some(Err(e)) => println!("✗ XLSX export failed: {}", e),
        None => println!("✗ XLSX export skipped"),
    }
    println!();
}

/// Banner text; complete only when at least one file was written
fn export_headline(report: &ExportReport) -> &'static str {
    match (&report.csv, &report.xlsx) {
        (Ok(_), Some(Err(_))) | (Err(_), Some(Ok(_))) => "Export partially complete",
        (Ok(_), _) | (_, Some(Ok(_))) => "Export complete!",
        _ => "Export failed",
    }
}

/// Numbered list of exports with their modification times
pub fn print_export_list(exports: &[ExportFile], limit: usize) {
    for (i, export) in exports.iter().take(limit).enumerate() {
        let modified: DateTime<Local> = export.modified.into();
        println!(
            "  {}. {} ({})",
            i + 1,
            export.file_name(),
            modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

pub fn print_comparison(comparison: &Comparison, newer: &Snapshot, older: &Snapshot) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  COMPARISON RESULTS");
    println!("{}", "=".repeat(RULE_WIDTH));

    if !comparison.added.is_empty() {
        println!("\n✓ ADDED MODS ({}):", comparison.added.len());
        for key in &comparison.added {
            let (author, name) = split_key(key);
            let version = newer.get(key).map(|e| e.version.as_str()).unwrap_or("");
            println!("  + {} (by {}) v{}", name, author, version);
        }
    }

    if !comparison.removed.is_empty() {
        println!("\n✗ REMOVED MODS ({}):", comparison.removed.len());
        for key in &comparison.removed {
            let (author, name) = split_key(key);
            let version = older.get(key).map(|e| e.version.as_str()).unwrap_or("");
            println!("  - {} (by {}) v{}", name, author, version);
        }
    }

    if !comparison.version_changes.is_empty() {
        println!("\n↑ VERSION UPDATES ({}):", comparison.version_changes.len());
        for change in &comparison.version_changes {
            let (author, name) = split_key(&change.key);
            println!(
                "  ↑ {} (by {}): {} → {}",
                name, author, change.old_version, change.new_version
            );
        }
    }

    if !comparison.enabled_changes.is_empty() {
        println!("\n⚡ ENABLED/DISABLED ({}):", comparison.enabled_changes.len());
        for change in &comparison.enabled_changes {
            let (author, name) = split_key(&change.key);
            let status = if change.now_enabled() {
                "ENABLED"
            } else {
                "DISABLED"
            };
            println!("  ⚡ {} (by {}): {}", name, author, status);
        }
    }

    if comparison.is_unchanged() {
        println!("\n✓ No changes detected!");
    }

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Summary: {}", comparison.summary_line());
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
