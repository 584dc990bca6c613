//! Department code extraction ("dép. 075").

use regex::Regex;

use super::patterns::DEPARTMENT;
use super::{Field, FieldExtractor};
use crate::error::FieldError;

/// Department field extractor.
pub struct DepartmentExtractor;

impl FieldExtractor for DepartmentExtractor {
    type Output = String;

    fn field(&self) -> Field {
        Field::Department
    }

    fn pattern(&self) -> &Regex {
        &DEPARTMENT
    }

    fn parse(&self, matched: &str) -> Result<String, FieldError> {
        let code = DEPARTMENT
            .captures(matched)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| FieldError::Malformed {
                field: Field::Department,
                value: matched.to_string(),
                reason: "no department code".to_string(),
            })?;
        Ok(normalize_department(code.as_str()))
    }
}

/// Normalize a department code.
///
/// Codes are lower-cased. Three-digit metropolitan codes are printed with
/// a leading zero ("075") which is dropped; Corsican codes keep their
/// digits ("02A" -> "02a") and overseas codes are unchanged ("971").
pub fn normalize_department(code: &str) -> String {
    let code = code.trim().to_lowercase();
    let is_padded = code.len() == 3
        && code.starts_with('0')
        && code.chars().all(|c| c.is_ascii_digit());
    if is_padded {
        code[1..].to_string()
    } else {
        code
    }
}
