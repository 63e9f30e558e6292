// src/config.rs
//
// Analyzer settings stored as TOML in the platform config directory.

use crate::error::ConfigError;
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    #[serde(default = "default_long_sentence_words")]
    pub long_sentence_words: usize,
    #[serde(default = "default_production_ready_confidence")]
    pub production_ready_confidence: f64,
    #[serde(default = "default_report_verified_terms")]
    pub report_verified_terms: bool,
    #[serde(default = "default_include_style_block")]
    pub include_style_block: bool,
    #[serde(default = "default_spelling")]
    pub spelling: SpellingSettings,
}

/// Limits for the fuzzy spelling checks
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpellingSettings {
    #[serde(default = "default_english_max_distance")]
    pub english_max_distance: usize,
    #[serde(default = "default_medical_min_similarity")]
    pub medical_min_similarity: f64,
}

fn default_long_sentence_words() -> usize {
    30
}

fn default_production_ready_confidence() -> f64 {
    0.85
}

fn default_report_verified_terms() -> bool {
    false
}

fn default_include_style_block() -> bool {
    true
}

fn default_spelling() -> SpellingSettings {
    SpellingSettings::default()
}

fn default_english_max_distance() -> usize {
    2
}

fn default_medical_min_similarity() -> f64 {
    0.8
}

impl Default for SpellingSettings {
    fn default() -> Self {
        Self {
            english_max_distance: default_english_max_distance(),
            medical_min_similarity: default_medical_min_similarity(),
        }
    }
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            long_sentence_words: default_long_sentence_words(),
            production_ready_confidence: default_production_ready_confidence(),
            report_verified_terms: default_report_verified_terms(),
            include_style_block: default_include_style_block(),
            spelling: default_spelling(),
        }
    }
}

fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "medixscan", "MediXScan")
}

/// Location of `config.toml` in the platform config directory
pub fn config_path() -> Result<PathBuf, ConfigError> {
    get_project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

impl AnalyzerSettings {
    /// Read settings from `path`; missing fields take their defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("[Config] Settings saved to {}", path.display());
        Ok(())
    }
}

/// Load from `path`, or write and return defaults when the file does not exist.
/// A file that exists but cannot be parsed is an error.
pub fn load_or_init(path: &Path) -> Result<AnalyzerSettings, ConfigError> {
    if path.exists() {
        let settings = AnalyzerSettings::load_from(path)?;
        info!("[Config] Settings loaded from {}", path.display());
        return Ok(settings);
    }

    info!("[Config] Config file not found. Creating default at {}", path.display());
    let settings = AnalyzerSettings::default();
    settings.save_to(path)?;
    Ok(settings)
}

/// Settings from the platform config file, falling back to defaults on any failure
pub fn load_settings() -> AnalyzerSettings {
    let result = config_path().and_then(|path| load_or_init(&path));
    match result {
        Ok(settings) => settings,
        Err(e) => {
            warn!("[Config] {}. Using default settings.", e);
            AnalyzerSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = AnalyzerSettings::default();
        assert_eq!(settings.long_sentence_words, 30);
        assert_eq!(settings.spelling.english_max_distance, 2);
        assert_eq!(settings.spelling.medical_min_similarity, 0.8);
        assert_eq!(settings.production_ready_confidence, 0.85);
        assert!(!settings.report_verified_terms);
        assert!(settings.include_style_block);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "long_sentence_words = 40\n[spelling]\nenglish_max_distance = 1\n").unwrap();

        let settings = AnalyzerSettings::load_from(&path).unwrap();
        assert_eq!(settings.long_sentence_words, 40);
        assert_eq!(settings.spelling.english_max_distance, 1);
        assert_eq!(settings.spelling.medical_min_similarity, 0.8);
        assert!(settings.include_style_block);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = AnalyzerSettings::default();
        settings.report_verified_terms = true;
        settings.save_to(&path).unwrap();

        assert_eq!(AnalyzerSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let settings = load_or_init(&path).unwrap();
        assert_eq!(settings, AnalyzerSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "long_sentence_words = \"many\"").unwrap();

        assert!(matches!(load_or_init(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            AnalyzerSettings::load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
