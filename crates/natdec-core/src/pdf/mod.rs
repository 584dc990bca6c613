//! PDF text extraction module.

mod extractor;

pub use extractor::PdfExtractor;

use tracing::debug;

use crate::decree::{DecreeParser, DocumentParser, ParsedDocument};
use crate::error::PdfError;
use crate::models::config::{NatdecConfig, PdfConfig};

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

impl PdfType {
    /// Whether the decree parser can work on the extracted text.
    pub fn has_text(&self) -> bool {
        matches!(self, Self::Text | Self::Hybrid)
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Extract the flattened text of a journal PDF.
///
/// Fails with [`PdfError::NoText`] when there is no text layer.
pub fn extract_journal_text(data: &[u8], config: &PdfConfig) -> Result<String> {
    let mut extractor = PdfExtractor::from_config(config);
    extractor.load(data)?;

    let text = extractor.extract_text()?;
    let pdf_type = extractor.classify(&text);
    debug!(
        "PDF with {} pages, {} chars text -> {:?}",
        extractor.page_count(),
        text.len(),
        pdf_type
    );
    if !pdf_type.has_text() {
        return Err(PdfError::NoText);
    }
    Ok(text)
}

/// Extract and parse a journal PDF.
///
/// The flattened text is returned along with the document so callers can
/// audit it.
pub fn parse_pdf(data: &[u8], config: &NatdecConfig) -> crate::Result<(String, ParsedDocument)> {
    let text = extract_journal_text(data, &config.pdf)?;
    let document = DecreeParser::from_config(&config.extraction).parse(&text)?;
    Ok((text, document))
}

/// Flatten extracted text into a single line.
///
/// Line and page breaks become spaces. With `collapse`, every whitespace run
/// becomes a single space, which is the shape the decree parser expects.
pub fn normalize_text(text: &str, collapse: bool) -> String {
    if collapse {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{0c}' => ' ',
            c => c,
        })
        .collect()
}
