//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use natdec_core::models::config::NatdecConfig;
use natdec_core::{normalize_text, parse_pdf, DecreeParser, DocumentParser, ParsedDocument};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("natdec")
        .join("config.json")
}

/// Configuration file to use: the `--config` argument, else the default.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the configuration; a missing default file means defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<NatdecConfig> {
    if let Some(path) = path {
        return Ok(NatdecConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(NatdecConfig::from_file(&default_path)?)
    } else {
        Ok(NatdecConfig::default())
    }
}

/// Whether the file extension is one the CLI can read.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "pdf" | "txt")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read and parse one document: PDF through the extractor, `.txt` as is.
///
/// The flattened text is returned with the document for the entry audit.
pub fn parse_file(path: &Path, config: &NatdecConfig) -> anyhow::Result<(String, ParsedDocument)> {
    info!("Processing file: {}", path.display());

    match extension(path).as_str() {
        "pdf" => Ok(parse_pdf(&fs::read(path)?, config)?),
        "txt" => {
            let text = normalize_text(&fs::read_to_string(path)?, config.pdf.collapse_whitespace);
            if text.trim().is_empty() {
                anyhow::bail!("No text found in {}", path.display());
            }
            debug!("Read {} characters of text", text.len());

            let document = DecreeParser::from_config(&config.extraction).parse(&text)?;
            Ok((text, document))
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}
