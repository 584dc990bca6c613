//! Decree segmentation and entry extraction.

mod entry;
mod locator;
mod outcome;
mod parser;
mod processor;
pub mod rules;
pub mod segmenter;

pub use entry::extract_entry;
pub use locator::{EntryLocator, DEFAULT_SAFETY_PADDING};
pub use outcome::{Component, Outcome, Warning};
pub use parser::{DecreeParser, DocumentParser, ParsedDocument};
pub use processor::{decree_date, process_decree};
pub use segmenter::{Segmentation, SegmentationMode};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
