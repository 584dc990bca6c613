//! Configuration structures for the decree parsing pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NatdecError, Result};

/// Main configuration for the natdec pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NatdecConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Decree and entry extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report statistics configuration.
    pub stats: StatsConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Replace line and page breaks and whitespace runs with single spaces.
    pub collapse_whitespace: bool,

    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            min_text_length: 50,
        }
    }
}

/// Decree and entry extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Drop the summary page before looking for decrees.
    pub strip_summary_page: bool,

    /// Characters scanned past the last "Dt." marker when no "Fait le" follows it.
    pub safety_padding: usize,

    /// Remove the journal masthead before looking for entries.
    pub remove_masthead: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strip_summary_page: true,
            safety_padding: 250,
            remove_masthead: true,
        }
    }
}

/// Report statistics configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Count `EFF` (collective effect) entries as naturalizations.
    pub count_collective_effect: bool,
}

impl NatdecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NatdecError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NatdecError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NatdecConfig::default();
        assert!(config.pdf.collapse_whitespace);
        assert_eq!(config.extraction.safety_padding, 250);
        assert!(config.extraction.strip_summary_page);
        assert!(!config.stats.count_collective_effect);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"safety_padding": 400}}"#).unwrap();

        let config = NatdecConfig::from_file(&path).unwrap();
        assert_eq!(config.extraction.safety_padding, 400);
        assert!(config.extraction.remove_masthead);
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NatdecConfig::default();
        config.stats.count_collective_effect = true;
        config.save(&path).unwrap();

        let reloaded = NatdecConfig::from_file(&path).unwrap();
        assert!(reloaded.stats.count_collective_effect);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = NatdecConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, NatdecError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NatdecConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, NatdecError::Io(_)));
    }
}
