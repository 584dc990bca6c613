//! Entry extraction: one candidate string into one structured entry.
//!
//! Fields are consumed positionally. After the name, the decree reference
//! splits the text into what precedes it and the trailing `rest`; the type
//! token then splits the preceding part into the birth window and the
//! ministry window, and the department is looked up after the ministry
//! number. Windows never overlap.

use tracing::trace;

use super::outcome::{Component, Outcome, Warning};
use super::rules::patterns::ENTRY_TYPE;
use super::rules::{
    extract_field, parse_birth_data, DecreeReferenceExtractor, DepartmentExtractor, Field,
    FieldExtractor, MinistryNumberExtractor, NameExtractor, Window,
};
use crate::error::FieldError;
use crate::models::decree::{Entry, EntryName, EntryType, ParsedEntry};

/// Extract one entry from a candidate string.
///
/// A missing or ambiguous required field fails the entry; the caller drops
/// it. A missing name only degrades it.
pub fn extract_entry(candidate: &str) -> Result<Outcome<Entry>, FieldError> {
    let mut warnings = Vec::new();
    let entry = Window::new(candidate);

    let (name, after_name) = match candidate.find(')') {
        None => {
            warnings.push(Warning::emit(
                Component::Name,
                "name parenthesis not found, name cannot be extracted",
            ));
            (EntryName::default(), entry)
        }
        Some(paren) => match NameExtractor.extract(entry.slice(0, paren + 1)) {
            Ok((m, name)) => (name, entry.after(&m)),
            Err(e) => {
                warnings.push(Warning::emit(
                    Component::Name,
                    format!("failed to extract the name of \"{}\": {}", candidate, e),
                ));
                (EntryName::default(), entry)
            }
        },
    };

    let (reference_match, decree_reference) = DecreeReferenceExtractor.extract(after_name)?;
    let rest = match after_name.after(&reference_match).as_str() {
        "." => "",
        rest => rest,
    };
    let fields = after_name.before(&reference_match);

    let type_match = extract_field(fields, &ENTRY_TYPE, Field::EntryType)?;
    let birth_window = fields.before(&type_match);
    let ministry_window = fields.after(&type_match);

    let (ministry_match, ministry_number) = MinistryNumberExtractor.extract(ministry_window)?;
    let (_, department) = DepartmentExtractor.extract(ministry_window.after(&ministry_match))?;

    let birth = parse_birth_data(birth_window)?.collect_into(&mut warnings);

    let entry_type = EntryType::from_token(type_match.text);
    if entry_type == EntryType::Unknown {
        warnings.push(Warning::emit(
            Component::Entry,
            format!("an unknown entry type {} found", type_match.text),
        ));
    }

    trace!(
        "Extracted entry {} ({}) from {} characters",
        decree_reference,
        entry_type,
        candidate.len()
    );

    Ok(Outcome::new(
        Entry {
            raw: candidate.to_string(),
            parsed: ParsedEntry {
                name,
                birth_data: birth.birth_data,
                sex: birth.sex,
                entry_type,
                ministry_number,
                department,
                decree_reference,
                rest: rest.to_string(),
            },
        },
        warnings,
    ))
}
