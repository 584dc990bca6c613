//! Decree segmentation of a journal document.
//!
//! A decree runs from its preamble ("Décret du ... portant naturalisation,
//! ...") to the end of the first following "Fait le". Decrees are never
//! nested, so each preamble is paired greedily with the nearest end marker
//! after it; the overlap check catches layouts where that assumption fails.
//! Any structural anomaly falls back to a single segment holding the whole
//! text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outcome::{Component, Outcome, Warning};
use super::rules::patterns::{DECREE_END_MARKER, DECREE_PREAMBLE, NATURALISATION_SECTION};

/// How the decree texts were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Every decree was bounded by its preamble and its end marker.
    Delimited,
    /// Segmentation failed; the whole text is a single segment.
    Fallback,
}

/// Decree texts found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation<'a> {
    pub decrees: Vec<&'a str>,
    pub mode: SegmentationMode,
}

impl<'a> Segmentation<'a> {
    fn fallback(text: &'a str) -> Self {
        Self {
            decrees: vec![text],
            mode: SegmentationMode::Fallback,
        }
    }
}

/// Drop the summary page.
///
/// The section header appears once in the summary and once before the
/// decrees; the text from its second occurrence on is kept.
pub fn strip_summary_page(text: &str) -> Outcome<&str> {
    let indexes: Vec<usize> = text
        .match_indices(NATURALISATION_SECTION)
        .map(|(idx, _)| idx)
        .take(2)
        .collect();

    match indexes.as_slice() {
        [_, second] => Outcome::Ok(&text[*second..]),
        _ => Outcome::degraded(
            text,
            Warning::emit(
                Component::Segmenter,
                format!(
                    "only {} naturalisation section was found on the page",
                    indexes.len()
                ),
            ),
        ),
    }
}

/// Split a document into decree texts, without summary stripping.
pub fn split_decrees(text: &str) -> Outcome<Segmentation<'_>> {
    let fallback = |message: String| {
        Outcome::degraded(
            Segmentation::fallback(text),
            Warning::emit(Component::Segmenter, message),
        )
    };

    let preambles: Vec<usize> = DECREE_PREAMBLE.find_iter(text).map(|m| m.start()).collect();
    if preambles.is_empty() {
        return fallback("no decree preamble found".to_string());
    }

    let ends: Vec<usize> = text
        .match_indices(DECREE_END_MARKER)
        .map(|(idx, marker)| idx + marker.len())
        .collect();
    if ends.is_empty() {
        return fallback("no decree ending found".to_string());
    }

    let intervals: Vec<(usize, usize)> = preambles
        .iter()
        .filter_map(|&start| ends.iter().find(|&&end| end > start).map(|&end| (start, end)))
        .collect();
    if intervals.len() != preambles.len() {
        return fallback(format!(
            "number of found decree intervals ({}) does not correspond to the number of found decrees preambles ({})",
            intervals.len(),
            preambles.len()
        ));
    }

    if intervals.windows(2).any(|pair| pair[0].1 > pair[1].0) {
        return fallback("found intervals overlap".to_string());
    }

    debug!("Found {} decrees", intervals.len());

    Outcome::Ok(Segmentation {
        decrees: intervals.iter().map(|&(start, end)| &text[start..end]).collect(),
        mode: SegmentationMode::Delimited,
    })
}

/// Strip the summary page, then split the rest into decree texts.
pub fn segment_document(text: &str) -> Outcome<Segmentation<'_>> {
    let mut warnings = Vec::new();
    let content = strip_summary_page(text).collect_into(&mut warnings);
    let segmentation = split_decrees(content).collect_into(&mut warnings);
    Outcome::new(segmentation, warnings)
}
