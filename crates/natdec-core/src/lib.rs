//! Core library for French naturalization decree parsing.
//!
//! This crate provides:
//! - PDF text extraction flattened into the single-line shape the parser expects
//! - Decree segmentation of a *Journal officiel* document
//! - Entry location and field extraction (name, birth data, type, ministry
//!   number, department, decree reference)
//! - Statistics and an entry audit over the parsed decrees

pub mod audit;
pub mod decree;
pub mod error;
pub mod models;
#[cfg(feature = "native")]
pub mod pdf;
pub mod report;
pub mod stats;

pub use error::{ExtractionError, FieldError, NatdecError, PdfError, Result};
pub use models::decree::{
    Article, BirthData, BirthPlace, DecreeReference, Entry, EntryName, EntryType,
    MinistryNumber, ParsedDecree, ParsedEntry, Sex,
};
pub use decree::{
    Component, DecreeParser, DocumentParser, Outcome, ParsedDocument, SegmentationMode, Warning,
};
#[cfg(feature = "native")]
pub use pdf::{normalize_text, parse_pdf, PdfExtractor, PdfProcessor};
pub use report::{BatchReport, FailedDocument};
pub use stats::{decrees_stats, DecreesStats};
