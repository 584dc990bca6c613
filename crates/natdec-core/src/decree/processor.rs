//! Per-decree processing: date, entries and reference number.

use chrono::NaiveDate;
use tracing::debug;

use super::locator::EntryLocator;
use super::outcome::{Component, Outcome, Warning};
use super::rules::parse_french_date;
use super::rules::patterns::{DECREE_DATE, DECREE_PREAMBLE};
use super::Result;
use crate::models::decree::{ParsedDecree, UNKNOWN_REFERENCE_NUMBER};

/// Read the decree date from its preamble.
pub fn decree_date(text: &str) -> Outcome<Option<NaiveDate>> {
    let mut warnings = Vec::new();
    let preambles: Vec<&str> = DECREE_PREAMBLE.find_iter(text).map(|m| m.as_str()).collect();

    let Some(preamble) = preambles.first() else {
        return Outcome::degraded(
            None,
            Warning::emit(Component::Processor, "decree preamble not found, no date extracted"),
        );
    };
    if preambles.len() > 1 {
        warnings.push(Warning::emit(
            Component::Processor,
            format!(
                "found {} decree preambles, the date is taken from the first",
                preambles.len()
            ),
        ));
    }

    let date = preamble_date(preamble).collect_into(&mut warnings);
    Outcome::new(date, warnings)
}

/// Read the `d month yyyy` date of one preamble; the first one wins.
fn preamble_date(preamble: &str) -> Outcome<Option<NaiveDate>> {
    let mut warnings = Vec::new();
    let dates: Vec<&str> = DECREE_DATE.find_iter(preamble).map(|m| m.as_str()).collect();

    let Some(date) = dates.first() else {
        return Outcome::degraded(
            None,
            Warning::emit(
                Component::Processor,
                format!("no date found in the preamble \"{}\"", preamble),
            ),
        );
    };
    if dates.len() > 1 {
        warnings.push(Warning::emit(
            Component::Processor,
            format!("{} dates found in the decree preamble, the first is used", dates.len()),
        ));
    }

    let date = parse_french_date(date).collect_into(&mut warnings);
    Outcome::new(date, warnings)
}

/// Process one decree text.
///
/// Fatal locator errors propagate; the caller decides whether the whole
/// document is lost.
pub fn process_decree(text: &str, locator: &EntryLocator) -> Result<Outcome<ParsedDecree>> {
    let mut warnings = Vec::new();

    let date = decree_date(text).collect_into(&mut warnings);
    let entries = locator.locate(text)?.collect_into(&mut warnings);

    let reference_number = match entries.first() {
        Some(entry) => entry.parsed.decree_reference.decree_id.clone(),
        None => {
            warnings.push(Warning::emit(
                Component::Processor,
                "no entries found in the decree text, so no decree number was extracted",
            ));
            UNKNOWN_REFERENCE_NUMBER.to_string()
        }
    };

    debug!(
        "Decree {} dated {:?}: {} entries",
        reference_number,
        date,
        entries.len()
    );

    Ok(Outcome::new(
        ParsedDecree {
            reference_number,
            date,
            entries,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decree::rules::patterns::DECREE_PURPOSE;
    use crate::error::ExtractionError;

    const ENTRY: &str = "ABADIE (Marie, Louise), née le 03/04/1985 à Dakar (Sénégal), NAT, 2020X 012345, dép. 075, Dt. 053/21.";

    #[test]
    fn test_decree_date() {
        let text = format!("Décret du 12 mars 2021 {} Le Premier ministre", DECREE_PURPOSE);
        let date = decree_date(&text);
        assert_eq!(date, Outcome::Ok(NaiveDate::from_ymd_opt(2021, 3, 12)));
    }

    #[test]
    fn test_decree_date_uses_first_preamble() {
        let text = format!(
            "Décret du 2 août 2020 {} Décret du 9 mai 2021 {}",
            DECREE_PURPOSE, DECREE_PURPOSE
        );
        let outcome = decree_date(&text);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), NaiveDate::from_ymd_opt(2020, 8, 2));
    }

    #[test]
    fn test_decree_date_without_preamble() {
        let outcome = decree_date("Fait le 12 mars 2021");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), None);
    }

    #[test]
    fn test_process_decree() {
        let text = format!(
            "Décret du 12 mars 2021 {} Art. 1er. – Sont naturalisés français : {} Fait le",
            DECREE_PURPOSE, ENTRY
        );
        let outcome = process_decree(&text, &EntryLocator::new()).unwrap();
        assert!(!outcome.is_degraded());

        let decree = outcome.into_value();
        assert_eq!(decree.reference_number, "053");
        assert_eq!(decree.date, NaiveDate::from_ymd_opt(2021, 3, 12));
        assert_eq!(decree.entries.len(), 1);
    }

    #[test]
    fn test_preamble_with_two_dates_warns() {
        let outcome = preamble_date("Décret du 12 mars 2021 modifiant le décret du 3 mai 2020");
        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.warnings()[0].message.contains("2 dates found"));
        assert_eq!(outcome.into_value(), NaiveDate::from_ymd_opt(2021, 3, 12));
    }

    #[test]
    fn test_every_entry_dropped_gives_unknown_reference() {
        let bad = "MARTIN (Luc), né le 02/02/1970 à Rome (Italie), NAT, 2019X 555111, dép. 013, dép. 084, Dt. 053/3.";
        let text = format!(
            "Décret du 12 mars 2021 {} Art. 1er. – Sont naturalisés français : {} Fait le",
            DECREE_PURPOSE, bad
        );
        let outcome = process_decree(&text, &EntryLocator::new()).unwrap();

        assert!(outcome
            .warnings()
            .iter()
            .any(|w| w.component == Component::Processor && w.message.contains("no decree number")));
        let decree = outcome.into_value();
        assert_eq!(decree.reference_number, UNKNOWN_REFERENCE_NUMBER);
        assert_eq!(decree.reference_number, "-1");
        assert!(decree.entries.is_empty());
    }

    #[test]
    fn test_process_decree_without_markers_is_fatal() {
        let text = format!("Décret du 12 mars 2021 {} Fait le", DECREE_PURPOSE);
        let err = process_decree(&text, &EntryLocator::new()).unwrap_err();
        assert_eq!(err, ExtractionError::NoEntriesMarker);
    }
}
