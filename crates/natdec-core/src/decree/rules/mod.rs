//! Rule-based field extractors for decree entries.
//!
//! Every extractor is built on [`extract_field`], which requires exactly
//! one match of a pattern inside a [`Window`] of the entry text. Missing
//! and ambiguous fields are distinct [`FieldError`]s so the entry
//! extractor can drop a single entry without failing the decree.

pub mod birth;
pub mod dates;
pub mod department;
pub mod ministry;
pub mod name;
pub mod patterns;
pub mod reference;

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub use birth::{parse_birth_data, parse_birth_place, BirthDataParse};
pub use dates::{french_month_index, parse_french_date};
pub use department::{normalize_department, DepartmentExtractor};
pub use ministry::{parse_ministry_number, MinistryNumberExtractor};
pub use name::{parse_name, NameExtractor};
pub use reference::{parse_decree_reference, DecreeReferenceExtractor};

/// Entry field names, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    DecreeReference,
    EntryType,
    MinistryNumber,
    Department,
    BirthDate,
    SexIndicator,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DecreeReference => "decree_reference",
            Self::EntryType => "entry_type",
            Self::MinistryNumber => "ministry_number",
            Self::Department => "department",
            Self::BirthDate => "birth_date",
            Self::SexIndicator => "sex_indicator",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed slice of an entry together with its offset in that entry.
///
/// Windows are narrowed as fields are consumed; offsets stay absolute so
/// matches from different windows remain comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Window<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Offset of the window start in the original string.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Sub-window of `[start, end)`, both relative to this window.
    ///
    /// Bounds are clamped to the window; they must fall on char boundaries.
    pub fn slice(&self, start: usize, end: usize) -> Window<'a> {
        let end = end.min(self.text.len());
        let start = start.min(end);
        Window {
            text: &self.text[start..end],
            offset: self.offset + start,
        }
    }

    /// Everything in this window before `m`.
    pub fn before(&self, m: &FieldMatch<'_>) -> Window<'a> {
        self.slice(0, m.start.saturating_sub(self.offset))
    }

    /// Everything in this window after `m`.
    pub fn after(&self, m: &FieldMatch<'_>) -> Window<'a> {
        self.slice(m.end.saturating_sub(self.offset), self.text.len())
    }
}

/// A unique field match; `start` and `end` are absolute offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Find the single match of `pattern` in `window`.
///
/// Every call scans with a fresh iterator; compiled patterns carry no
/// position state between calls.
pub fn extract_field<'a>(
    window: Window<'a>,
    pattern: &Regex,
    field: Field,
) -> Result<FieldMatch<'a>, FieldError> {
    let mut matches = pattern.find_iter(window.as_str());
    let first = matches.next().ok_or(FieldError::Missing { field })?;

    let extra = matches.count();
    if extra > 0 {
        return Err(FieldError::Ambiguous {
            field,
            count: extra + 1,
        });
    }

    Ok(FieldMatch {
        text: first.as_str(),
        start: window.offset() + first.start(),
        end: window.offset() + first.end(),
    })
}

/// Trait for single-pattern field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Field name used in errors.
    fn field(&self) -> Field;

    /// Pattern that must match exactly once.
    fn pattern(&self) -> &Regex;

    /// Convert the matched text into a value.
    fn parse(&self, matched: &str) -> Result<Self::Output, FieldError>;

    /// Locate the field in `window` and parse it.
    fn extract<'a>(
        &self,
        window: Window<'a>,
    ) -> Result<(FieldMatch<'a>, Self::Output), FieldError> {
        let m = extract_field(window, self.pattern(), self.field())?;
        let value = self.parse(m.text)?;
        Ok((m, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterns::{DEPARTMENT, MINISTRY_NUMBER};

    #[test]
    fn test_extract_field_single_match() {
        let window = Window::new("foo 2020X 123456 bar");
        let m = extract_field(window, &MINISTRY_NUMBER, Field::MinistryNumber).unwrap();
        assert_eq!(m.text, "2020X 123456");
        assert_eq!((m.start, m.end), (4, 16));
    }

    #[test]
    fn test_extract_field_missing() {
        let err = extract_field(Window::new("nothing"), &DEPARTMENT, Field::Department).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: Field::Department });
    }

    #[test]
    fn test_extract_field_ambiguous() {
        let window = Window::new("dép. 075, dép. 092");
        let err = extract_field(window, &DEPARTMENT, Field::Department).unwrap_err();
        assert_eq!(err, FieldError::Ambiguous { field: Field::Department, count: 2 });
    }

    #[test]
    fn test_no_state_leaks_between_calls() {
        let first = Window::new("xxxxxxxxxxxxxxxxxxxx 2020X 123456");
        let second = Window::new("2021X 654321");

        let a = extract_field(first, &MINISTRY_NUMBER, Field::MinistryNumber).unwrap();
        let b = extract_field(second, &MINISTRY_NUMBER, Field::MinistryNumber).unwrap();
        let a_again = extract_field(first, &MINISTRY_NUMBER, Field::MinistryNumber).unwrap();

        assert_eq!(b.text, "2021X 654321");
        assert_eq!(b.start, 0);
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_window_offsets_are_absolute() {
        let window = Window::new("abc 2020X 123456 dép. 075 tail");
        let (ministry, _) = MinistryNumberExtractor.extract(window).unwrap();
        let after = window.after(&ministry);
        assert_eq!(after.offset(), 16);

        let dep = extract_field(after, &DEPARTMENT, Field::Department).unwrap();
        assert_eq!(&window.as_str()[dep.start..dep.end], "dép. 075");
        assert_eq!(after.before(&dep).as_str(), " ");
        assert_eq!(after.after(&dep).as_str(), " tail");
    }
}
