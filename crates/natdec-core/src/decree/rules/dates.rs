//! French long-form date parsing ("12 mars 2021").

use chrono::NaiveDate;

use super::patterns::FRENCH_MONTHS;
use crate::decree::outcome::{Component, Outcome, Warning};

/// Zero-based index of a French month name, compared case-insensitively.
pub fn french_month_index(month: &str) -> Option<u32> {
    let month = month.to_lowercase();
    FRENCH_MONTHS
        .iter()
        .position(|name| *name == month)
        .map(|idx| idx as u32)
}

/// Parse a `d month yyyy` date; any malformed part yields `None` with a warning.
pub fn parse_french_date(date: &str) -> Outcome<Option<NaiveDate>> {
    let fail = |message: String| -> Outcome<Option<NaiveDate>> {
        Outcome::degraded(None, Warning::emit(Component::Processor, message))
    };

    let parts: Vec<&str> = date.split(' ').collect();
    let [day, month, year] = parts.as_slice() else {
        return fail(format!(
            "parsed decree date \"{}\" does not have three parts",
            date
        ));
    };

    let Some(month_idx) = french_month_index(month) else {
        return fail(format!("unknown month {} found", month));
    };

    let (day, year) = match (parse_date_part(day), parse_date_part(year)) {
        (Ok(day), Ok(year)) => (day, year),
        (Err(message), _) | (_, Err(message)) => return fail(message),
    };

    match i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month_idx + 1, day))
    {
        Some(date) => Outcome::Ok(Some(date)),
        None => fail(format!("\"{}\" is not a valid calendar date", date)),
    }
}

fn parse_date_part(part: &str) -> Result<u32, String> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "date part to parse as number {} contains non-digit characters",
            part
        ));
    }
    part.parse()
        .map_err(|_| format!("failed to parse the date part {} as a number", part))
}
