//! Loading a profile's mods.yml

use crate::error::{Error, Result};
use crate::locate::manifest_path;
use crate::record::ModRecord;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read the raw entries of a mods.yml file.
///
/// A document that is not a list (including an empty file) has no entries.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_manifest_str(&content).map_err(|e| Error::Yaml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse manifest text into raw entries
pub fn parse_manifest_str(content: &str) -> std::result::Result<Vec<Value>, serde_yaml::Error> {
    match serde_yaml::from_str::<Value>(content)? {
        Value::Sequence(entries) => Ok(entries),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("manifest is not a list (found {}), treating as empty", kind(&other));
            Ok(Vec::new())
        }
    }
}

/// Load and normalize every mod of a profile, in manifest order
pub fn load_profile(profiles_dir: &Path, profile: &str) -> Result<Vec<ModRecord>> {
    let path = manifest_path(profiles_dir, profile);
    if !path.is_file() {
        return Err(Error::MissingManifest {
            profile: profile.to_string(),
            path,
        });
    }

    let raw = load_manifest(&path)?;
    debug!("{} raw entries in {}", raw.len(), path.display());
    if raw.is_empty() {
        return Err(Error::EmptyProfile(profile.to_string()));
    }

    Ok(raw.iter().map(ModRecord::from_raw).collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
