//! modtrack-core: Core library for exporting and comparing r2modman mod profiles
//!
//! This library provides functionality to:
//! - Locate r2modman profiles and read their mods.yml manifests
//! - Normalize raw manifest entries into defaulted mod records
//! - Compute profile statistics (counts, top authors, newest/oldest mods)
//! - Export records and statistics as CSV and styled xlsx
//! - Read previous CSV exports back and diff two of them

pub mod compare;
pub mod error;
pub mod export;
pub mod layout;
pub mod locate;
pub mod manifest;
pub mod record;
pub mod settings;
pub mod snapshot;
pub mod stats;
pub mod xlsx;

pub use compare::{compare_snapshots, Comparison, EnabledChange, VersionChange};
pub use error::{Error, Result};
pub use export::{export_profile, ExportConfig, ExportReport, RichEncoding};
pub use locate::{
    candidate_profile_dirs, find_profiles_dir, latest_pair, list_exports, list_profiles,
    ExportFile,
};
pub use manifest::{load_manifest, load_profile};
pub use record::{sort_records, split_key, ModRecord, Version};
pub use settings::Settings;
pub use snapshot::{parse_snapshot_str, read_snapshot, Snapshot, SnapshotEntry};
pub use stats::{compute_stats, ProfileStats};
