//! User settings, stored as JSON

use crate::error::{Error, Result};
use crate::export::{ExportConfig, RichEncoding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tool settings. Every field has a default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game directory name inside the r2modman data folder
    pub game: String,
    /// Directory that holds the export sub-directories
    pub output_dir: PathBuf,
    /// Sub-directory for CSV exports
    pub csv_dir_name: String,
    /// Sub-directory for xlsx exports
    pub xlsx_dir_name: String,
    /// Profiles directories probed before the standard locations
    pub extra_search_paths: Vec<PathBuf>,
    /// How many exports the compare menu lists
    pub compare_list_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: "Valheim".to_string(),
            output_dir: PathBuf::from("."),
            csv_dir_name: "csv_files".to_string(),
            xlsx_dir_name: "xlsx_files".to_string(),
            extra_search_paths: Vec::new(),
            compare_list_limit: 10,
        }
    }
}

impl Settings {
    /// Load settings from a file, or defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save settings to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.output_dir.join(&self.csv_dir_name)
    }

    pub fn xlsx_dir(&self) -> PathBuf {
        self.output_dir.join(&self.xlsx_dir_name)
    }

    /// Export destinations with the given rich-encoding capability
    pub fn export_config(&self, rich: RichEncoding) -> ExportConfig {
        ExportConfig {
            csv_dir: self.csv_dir(),
            xlsx_dir: self.xlsx_dir(),
            rich,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("modtrack.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.csv_dir(), PathBuf::from("./csv_files"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modtrack.json");
        fs::write(&path, r#"{ "game": "RiskOfRain2", "output_dir": "/tmp/out" }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.game, "RiskOfRain2");
        assert_eq!(settings.xlsx_dir(), PathBuf::from("/tmp/out/xlsx_files"));
        assert_eq!(settings.compare_list_limit, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modtrack.json");
        let settings = Settings {
            extra_search_paths: vec![PathBuf::from("/games/profiles")],
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modtrack.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_export_config() {
        let config = Settings::default().export_config(RichEncoding::Unavailable);
        assert_eq!(config.csv_dir, PathBuf::from("./csv_files"));
        assert_eq!(config.rich, RichEncoding::Unavailable);
    }
}
