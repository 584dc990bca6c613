//! Ministry file number extraction ("2020X 123456").

use regex::Regex;

use super::patterns::MINISTRY_NUMBER;
use super::{Field, FieldExtractor};
use crate::error::FieldError;
use crate::models::decree::MinistryNumber;

/// Ministry number field extractor.
pub struct MinistryNumberExtractor;

impl FieldExtractor for MinistryNumberExtractor {
    type Output = MinistryNumber;

    fn field(&self) -> Field {
        Field::MinistryNumber
    }

    fn pattern(&self) -> &Regex {
        &MINISTRY_NUMBER
    }

    fn parse(&self, matched: &str) -> Result<MinistryNumber, FieldError> {
        parse_ministry_number(matched)
    }
}

/// Split a ministry number around its `X` separator.
///
/// The year precedes the separator; after `X ` the first three digits are
/// the series and the remaining ones the index within the series.
pub fn parse_ministry_number(number: &str) -> Result<MinistryNumber, FieldError> {
    let number = number.trim();
    let malformed = |reason: &str| FieldError::Malformed {
        field: Field::MinistryNumber,
        value: number.to_string(),
        reason: reason.to_string(),
    };

    let sep = number
        .find('X')
        .ok_or_else(|| malformed("no \"X\" separator"))?;

    let year = &number[..sep];
    let series = number
        .get(sep + 2..sep + 5)
        .ok_or_else(|| malformed("series is too short"))?;
    let idx = number
        .get(sep + 5..)
        .ok_or_else(|| malformed("index is missing"))?;

    Ok(MinistryNumber {
        year: year.to_string(),
        series: series.to_string(),
        idx: idx.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ministry_number() {
        let number = parse_ministry_number("2020X 123456").unwrap();
        assert_eq!(
            number,
            MinistryNumber {
                year: "2020".to_string(),
                series: "123".to_string(),
                idx: "456".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_ministry_number_trims() {
        let number = parse_ministry_number(" 2019X 054321 ").unwrap();
        assert_eq!(number.year, "2019");
        assert_eq!(number.series, "054");
        assert_eq!(number.idx, "321");
    }

    #[test]
    fn test_parse_ministry_number_without_separator() {
        let err = parse_ministry_number("2020 123456").unwrap_err();
        assert!(matches!(err, FieldError::Malformed { field: Field::MinistryNumber, .. }));
    }

    #[test]
    fn test_parse_ministry_number_too_short() {
        assert!(parse_ministry_number("2020X 1").is_err());
    }
}
