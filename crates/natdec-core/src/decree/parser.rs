//! Document parser: segmentation, then per-decree processing.

use serde::Serialize;
use tracing::{debug, info};

use super::locator::EntryLocator;
use super::outcome::Warning;
use super::processor::process_decree;
use super::segmenter::{segment_document, split_decrees, SegmentationMode};
use super::Result;
use crate::models::config::ExtractionConfig;
use crate::models::decree::ParsedDecree;

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    /// Parsed decrees, in document order.
    pub decrees: Vec<ParsedDecree>,
    /// How decree boundaries were found.
    pub segmentation: SegmentationMode,
    /// Every soft failure met along the way.
    pub warnings: Vec<Warning>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ParsedDocument {
    pub fn entry_count(&self) -> usize {
        self.decrees.iter().map(|d| d.entries.len()).sum()
    }
}

/// Trait for decree document parsing.
pub trait DocumentParser {
    /// Parse a flat document text.
    fn parse(&self, text: &str) -> Result<ParsedDocument>;
}

/// Regex-driven decree parser.
#[derive(Debug, Clone)]
pub struct DecreeParser {
    /// Whether to drop the summary page first.
    strip_summary_page: bool,
    locator: EntryLocator,
}

impl DecreeParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            strip_summary_page: true,
            locator: EntryLocator::new(),
        }
    }

    /// Build a parser from the extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_summary_stripping(config.strip_summary_page)
            .with_safety_padding(config.safety_padding)
            .with_masthead_removal(config.remove_masthead)
    }

    /// Set summary page stripping.
    pub fn with_summary_stripping(mut self, strip: bool) -> Self {
        self.strip_summary_page = strip;
        self
    }

    /// Set the entry window safety padding.
    pub fn with_safety_padding(mut self, padding: usize) -> Self {
        self.locator = self.locator.with_safety_padding(padding);
        self
    }

    /// Set masthead removal.
    pub fn with_masthead_removal(mut self, remove: bool) -> Self {
        self.locator = self.locator.with_masthead_removal(remove);
        self
    }
}

/// Wall clock for `processing_time_ms`; `Instant` panics on wasm32.
struct Timer {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Timer {
    #[cfg(not(target_arch = "wasm32"))]
    fn start() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn start() -> Self {
        Self {}
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_arch = "wasm32")]
    fn elapsed_ms(&self) -> u64 {
        0
    }
}

impl Default for DecreeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for DecreeParser {
    fn parse(&self, text: &str) -> Result<ParsedDocument> {
        let timer = Timer::start();
        let mut warnings = Vec::new();

        info!("Parsing decrees from {} characters of text", text.len());

        let segmentation = if self.strip_summary_page {
            segment_document(text)
        } else {
            split_decrees(text)
        }
        .collect_into(&mut warnings);

        let decrees = segmentation
            .decrees
            .iter()
            .map(|decree| process_decree(decree, &self.locator).map(|o| o.collect_into(&mut warnings)))
            .collect::<Result<Vec<_>>>()?;

        let document = ParsedDocument {
            decrees,
            segmentation: segmentation.mode,
            warnings,
            processing_time_ms: timer.elapsed_ms(),
        };

        debug!(
            "Extracted {} decrees with {} entries ({} warnings)",
            document.decrees.len(),
            document.entry_count(),
            document.warnings.len()
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decree::rules::patterns::DECREE_PURPOSE;
    use crate::error::ExtractionError;

    fn document(entries: &str) -> String {
        format!(
            "Sommaire Naturalisations et réintégrations Décret du 12 mars 2021 {purpose} \
             Naturalisations et réintégrations Décret du 12 mars 2021 {purpose} \
             Art. 1er. – Sont naturalisés français : {entries} Fait le 12 mars 2021.",
            purpose = DECREE_PURPOSE,
            entries = entries
        )
    }

    #[test]
    fn test_parse_document() {
        let text = document(
            "ABADIE (Marie), née le 03/04/1985 à Dakar (Sénégal), NAT, 2020X 012345, dép. 075, Dt. 053/21.",
        );
        let parsed = DecreeParser::new().parse(&text).unwrap();

        assert_eq!(parsed.segmentation, SegmentationMode::Delimited);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.decrees.len(), 1);
        assert_eq!(parsed.decrees[0].reference_number, "053");
        assert_eq!(parsed.entry_count(), 1);
    }

    #[test]
    fn test_summary_page_is_needed_to_segment() {
        let text = document(
            "ABADIE (Marie), née le 03/04/1985 à Dakar (Sénégal), NAT, 2020X 012345, dép. 075, Dt. 053/21.",
        );
        // The summary repeats the preamble, so both preambles pair with the same end.
        let parsed = DecreeParser::new()
            .with_summary_stripping(false)
            .parse(&text)
            .unwrap();
        assert_eq!(parsed.segmentation, SegmentationMode::Fallback);
        assert_eq!(parsed.entry_count(), 1);
    }

    #[test]
    fn test_no_reference_marker_is_fatal() {
        let text = document("Aucun candidat ici.");
        let err = DecreeParser::new().parse(&text).unwrap_err();
        assert_eq!(err, ExtractionError::NoEntriesMarker);
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            strip_summary_page: false,
            safety_padding: 10,
            remove_masthead: false,
        };
        let parser = DecreeParser::from_config(&config);
        assert!(!parser.strip_summary_page);
    }
}
