//! Entry location inside a decree text.

use std::borrow::Cow;

use tracing::debug;

use super::entry::extract_entry;
use super::outcome::{Component, Outcome, Warning};
use super::rules::patterns::{DECREE_END_MARKER, DECREE_FIELD_MARKER, ENTRY_CANDIDATE, MASTHEAD};
use crate::error::ExtractionError;
use crate::models::decree::Entry;

/// Default number of characters scanned past the last "Dt." marker.
pub const DEFAULT_SAFETY_PADDING: usize = 250;

/// Finds entry candidates in a decree and extracts each of them.
#[derive(Debug, Clone)]
pub struct EntryLocator {
    safety_padding: usize,
    remove_masthead: bool,
}

impl EntryLocator {
    pub fn new() -> Self {
        Self {
            safety_padding: DEFAULT_SAFETY_PADDING,
            remove_masthead: true,
        }
    }

    /// Set the padding used when no "Fait le" follows the last marker.
    pub fn with_safety_padding(mut self, padding: usize) -> Self {
        self.safety_padding = padding;
        self
    }

    /// Set whether the journal masthead is removed first.
    pub fn with_masthead_removal(mut self, remove: bool) -> Self {
        self.remove_masthead = remove;
        self
    }

    /// Locate and extract all entries of a decree, in text order.
    ///
    /// Fails when the text has no "Dt." marker at all, or when no candidate
    /// matches. Candidates that fail extraction are dropped with a warning.
    pub fn locate(&self, text: &str) -> Result<Outcome<Vec<Entry>>, ExtractionError> {
        let text = self.strip_masthead(text);
        let window = self.entries_window(&text)?;
        let candidates: Vec<&str> = ENTRY_CANDIDATE.find_iter(window).map(|m| m.as_str()).collect();
        if candidates.is_empty() {
            return Err(ExtractionError::NoEntriesFound);
        }

        let mut warnings = Vec::new();
        let mut entries = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match extract_entry(candidate) {
                Ok(outcome) => entries.push(outcome.collect_into(&mut warnings)),
                Err(e) => warnings.push(Warning::emit(
                    Component::Entry,
                    format!("failed to process the entry {}: {}", candidate, e),
                )),
            }
        }

        debug!(
            "Extracted {} of {} entry candidates",
            entries.len(),
            candidates.len()
        );

        Ok(Outcome::new(entries, warnings))
    }

    /// Remove the first journal masthead, borrowing when there is none.
    fn strip_masthead<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.remove_masthead && text.contains(MASTHEAD) {
            Cow::Owned(text.replacen(MASTHEAD, "", 1))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Cut the text after the last entry.
    ///
    /// The window ends at the first "Fait le" after the last "Dt." marker,
    /// or `safety_padding` bytes after that marker when none follows.
    fn entries_window<'a>(&self, text: &'a str) -> Result<&'a str, ExtractionError> {
        let last_marker = DECREE_FIELD_MARKER
            .find_iter(text)
            .last()
            .map(|m| m.start())
            .ok_or(ExtractionError::NoEntriesMarker)?;

        let end = match text[last_marker..].find(DECREE_END_MARKER) {
            Some(offset) => last_marker + offset,
            None => last_marker.saturating_add(self.safety_padding),
        };

        if end >= text.len() {
            return Ok(text);
        }
        Ok(&text[..floor_char_boundary(text, end)])
    }
}

impl Default for EntryLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
