//! Error types for the natdec-core library.

use thiserror::Error;

use crate::decree::rules::Field;

/// Main error type for the natdec library.
#[derive(Error, Debug)]
pub enum NatdecError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Decree or entry extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// No text layer: a scanned issue or an empty document.
    #[error("PDF has no extractable text, scanned documents are not supported")]
    NoText,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Document-level extraction failures.
///
/// These abort the whole document; everything below this level degrades
/// into warnings or dropped entries instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No "Dt. XXX/X" marker anywhere in the decree text.
    #[error("the text does not look like a decree: no \"Dt. XXX/X\" marker found")]
    NoEntriesMarker,

    /// The text is decree-shaped but holds no well-formed entry.
    #[error("no entries found in the decree text")]
    NoEntriesFound,

    /// A required field could not be extracted.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Failure to extract or parse a single entry field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field pattern did not match.
    #[error("field \"{field}\" not found")]
    Missing { field: Field },

    /// The field pattern matched more than once in its window.
    #[error("found {count} fields \"{field}\"")]
    Ambiguous { field: Field, count: usize },

    /// The field matched but its value has an unexpected shape.
    #[error("malformed {field} \"{value}\": {reason}")]
    Malformed {
        field: Field,
        value: String,
        reason: String,
    },
}

/// Result type for the natdec library.
pub type Result<T> = std::result::Result<T, NatdecError>;
