//! Reading a previous CSV export back into keyed mod entries

use crate::error::{Error, Result};
use crate::record::identity_key;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Prefix of the mod table header line; everything above it is preamble
pub const DATA_HEADER_PREFIX: &str = "Author,Mod Name,Version";

/// One mod row as read from an export. Values are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub author: String,
    pub name: String,
    pub version: String,
    /// `Yes` or `No` as written
    pub enabled: String,
    pub description: String,
    pub website: String,
}

/// Mods of one export keyed by `author:name`
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub entries: BTreeMap<String, SnapshotEntry>,
    /// False when the file had no mod table header
    pub header_found: bool,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SnapshotEntry> {
        self.entries.get(key)
    }
}

/// Read a CSV export from disk
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let snapshot = parse_snapshot_str(&content).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !snapshot.header_found {
        warn!("could not find mod data header in {}", path.display());
    }
    Ok(snapshot)
}

/// Parse export text. Missing header yields an empty snapshot, not an error.
pub fn parse_snapshot_str(content: &str) -> std::result::Result<Snapshot, csv::Error> {
    let Some(start) = find_data_header(content) else {
        return Ok(Snapshot::default());
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // rows may be short or long
        .from_reader(content[start..].as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let author_col = column("Author");
    let name_col = column("Mod Name");
    let version_col = column("Version");
    let enabled_col = column("Enabled");
    let description_col = column("Description");
    let website_col = column("Website");

    let mut entries = BTreeMap::new();
    for result in reader.records() {
        let record = result?;
        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let author = field(author_col);
        let name = field(name_col);
        if author.is_empty() || name.is_empty() {
            continue;
        }

        let entry = SnapshotEntry {
            version: field(version_col),
            enabled: field(enabled_col),
            description: field(description_col),
            website: field(website_col),
            author,
            name,
        };
        // Duplicate keys: the later row wins
        entries.insert(identity_key(&entry.author, &entry.name), entry);
    }

    debug!("read {} mods from snapshot", entries.len());
    Ok(Snapshot {
        entries,
        header_found: true,
    })
}

/// Byte offset of the first line starting with the mod table header
fn find_data_header(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(DATA_HEADER_PREFIX) {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}
