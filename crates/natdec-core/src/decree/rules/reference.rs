//! Decree cross-reference extraction ("Dt. 053/21").

use regex::Regex;

use super::patterns::DECREE_REFERENCE;
use super::{Field, FieldExtractor};
use crate::error::FieldError;
use crate::models::decree::DecreeReference;

const REFERENCE_PREFIX_LEN: usize = "Dt. ".len();

/// Decree reference field extractor.
pub struct DecreeReferenceExtractor;

impl FieldExtractor for DecreeReferenceExtractor {
    type Output = DecreeReference;

    fn field(&self) -> Field {
        Field::DecreeReference
    }

    fn pattern(&self) -> &Regex {
        &DECREE_REFERENCE
    }

    fn parse(&self, matched: &str) -> Result<DecreeReference, FieldError> {
        parse_decree_reference(matched)
    }
}

/// Split "Dt. <decree>/<entry>" into its two ids.
pub fn parse_decree_reference(reference: &str) -> Result<DecreeReference, FieldError> {
    let ids = reference.get(REFERENCE_PREFIX_LEN..).unwrap_or("");
    let parts: Vec<&str> = ids.split('/').collect();
    match parts.as_slice() {
        [decree_id, entry_id] => Ok(DecreeReference {
            decree_id: decree_id.to_string(),
            entry_id: entry_id.to_string(),
        }),
        _ => Err(FieldError::Malformed {
            field: Field::DecreeReference,
            value: reference.to_string(),
            reason: format!("splitting produces {} part(s) instead of 2", parts.len()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decree::rules::Window;

    #[test]
    fn test_parse_decree_reference() {
        let reference = parse_decree_reference("Dt. 123/4567").unwrap();
        assert_eq!(reference.decree_id, "123");
        assert_eq!(reference.entry_id, "4567");
    }

    #[test]
    fn test_parse_decree_reference_wrong_parts() {
        assert!(parse_decree_reference("Dt. 123").is_err());
        assert!(parse_decree_reference("Dt. 1/2/3").is_err());
        assert!(parse_decree_reference("Dt").is_err());
    }

    #[test]
    fn test_extract_keeps_position() {
        let window = Window::new(", dép. 075, Dt. 053/21.");
        let (m, reference) = DecreeReferenceExtractor.extract(window).unwrap();
        assert_eq!(m.text, "Dt. 053/21");
        assert_eq!(&window.as_str()[m.end..], ".");
        assert_eq!(reference.to_string(), "053/21");
    }
}
