//! Finding r2modman profiles and previous exports on disk

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

const MANAGER_DIR: &str = "r2modmanPlus-local";
const FLATPAK_APP_ID: &str = "com.github.ebkr.r2modmanPlus";

/// Name of the manifest file inside each profile directory
pub const MANIFEST_FILE: &str = "mods.yml";

/// Profiles directories to probe for a game, in priority order.
///
/// `extra` paths come first and are used as-is.
pub fn candidate_profile_dirs(game: &str, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = extra.to_vec();
    let suffix = Path::new(MANAGER_DIR).join(game).join("profiles");

    let xdg = xdg::BaseDirectories::new();
    if let Some(config_home) = xdg.get_config_home() {
        candidates.push(config_home.join(&suffix));
    }
    if let Some(data_home) = xdg.get_data_home() {
        candidates.push(data_home.join(&suffix));
    }
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(
            PathBuf::from(home)
                .join(".var/app")
                .join(FLATPAK_APP_ID)
                .join("config")
                .join(&suffix),
        );
    }

    candidates
}

/// Return the first candidate directory that exists
pub fn find_profiles_dir(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        debug!("probing {}", candidate.display());
        if candidate.is_dir() {
            return Ok(candidate.clone());
        }
    }
    Err(Error::MissingInstallation {
        searched: candidates.to_vec(),
    })
}

/// Profile names (immediate sub-directories), sorted by name
pub fn list_profiles(profiles_dir: &Path) -> Result<Vec<String>> {
    let mut profiles = Vec::new();
    for entry in WalkDir::new(profiles_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            profiles.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    profiles.sort();

    if profiles.is_empty() {
        return Err(Error::NoProfiles(profiles_dir.to_path_buf()));
    }
    Ok(profiles)
}

/// Path to a profile's manifest
pub fn manifest_path(profiles_dir: &Path, profile: &str) -> PathBuf {
    profiles_dir.join(profile).join(MANIFEST_FILE)
}

/// A CSV export found in the output directory
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl ExportFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// CSV exports in a directory, newest first. A missing directory has none.
pub fn list_exports(csv_dir: &Path) -> Result<Vec<ExportFile>> {
    if !csv_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut exports = Vec::new();
    for entry in WalkDir::new(csv_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            let modified = entry.metadata()?.modified()?;
            exports.push(ExportFile {
                path: path.to_path_buf(),
                modified,
            });
        }
    }

    exports.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
    Ok(exports)
}

/// The two most recent exports as (newer, older)
pub fn latest_pair(csv_dir: &Path) -> Result<(ExportFile, ExportFile)> {
    let mut exports = list_exports(csv_dir)?.into_iter();
    match (exports.next(), exports.next()) {
        (Some(newer), Some(older)) => Ok((newer, older)),
        (first, _) => Err(Error::InsufficientSnapshots {
            found: usize::from(first.is_some()),
            dir: csv_dir.to_path_buf(),
        }),
    }
}
