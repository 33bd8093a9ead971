//! Error types for modtrack-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in modtrack-core
#[derive(Debug, Error)]
pub enum Error {
    /// None of the candidate profile directories exist
    #[error("r2modman profile directory not found; searched:{}", format_searched(.searched))]
    MissingInstallation { searched: Vec<PathBuf> },

    /// The profiles directory exists but holds no profiles
    #[error("no profiles found in '{0}'")]
    NoProfiles(PathBuf),

    /// The selected profile has no mods.yml
    #[error("mods.yml not found for profile '{profile}' (expected at '{path}')")]
    MissingManifest { profile: String, path: PathBuf },

    /// The manifest parsed but listed no mods
    #[error("no mods found in profile '{0}'")]
    EmptyProfile(String),

    /// Fewer than two exports to compare
    #[error("need at least 2 CSV exports to compare, found {found} in '{dir}'")]
    InsufficientSnapshots { found: usize, dir: PathBuf },

    /// The binary was built without xlsx support
    #[error("xlsx export is not available in this build")]
    RichEncodingUnavailable,

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// YAML error while reading a manifest
    #[error("failed to parse YAML '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the xlsx writer
    #[cfg(feature = "xlsx")]
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Whether the error should end the process rather than return to the menu
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MissingInstallation { .. } | Error::NoProfiles(_))
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| format!("\n  - {}", p.display()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_installation_lists_paths() {
        let err = Error::MissingInstallation {
            searched: vec![PathBuf::from("/a/profiles"), PathBuf::from("/b/profiles")],
        };
        let msg = err.to_string();
        assert!(msg.contains("\n  - /a/profiles"));
        assert!(msg.contains("\n  - /b/profiles"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(!Error::EmptyProfile("Default".to_string()).is_fatal());
        assert!(!Error::RichEncodingUnavailable.is_fatal());
        assert!(!Error::InsufficientSnapshots {
            found: 1,
            dir: PathBuf::from("csv_files"),
        }
        .is_fatal());
    }
}
