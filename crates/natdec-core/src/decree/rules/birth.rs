//! Birth data parsing: sex marker, birth date and birth place.
//!
//! The birth window of an entry reads `, née le 03/04/1985 à Dakar (Sénégal), `.
//! The date must occur exactly once; the sex marker is looked up before it
//! and the place after it.

use super::patterns::{BIRTH_DATE, SEX_INDICATOR};
use super::{extract_field, Field, Window};
use crate::decree::outcome::{Component, Outcome, Warning};
use crate::error::FieldError;
use crate::models::decree::{Article, BirthData, BirthPlace, Sex};

/// Parsed birth window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthDataParse {
    pub birth_data: BirthData,
    pub sex: Sex,
}

/// Place prepositions, most specific first so "à la" is not read as "à".
const PLACE_PREFIXES: [(&str, Option<Article>); 4] = [
    ("à la ", Some(Article::La)),
    ("à ", None),
    ("aux ", Some(Article::Les)),
    ("au ", Some(Article::Le)),
];

/// Parse the birth window of an entry.
pub fn parse_birth_data(window: Window<'_>) -> Result<Outcome<BirthDataParse>, FieldError> {
    let date = extract_field(window, &BIRTH_DATE, Field::BirthDate)?;
    let sex_marker = extract_field(window.before(&date), &SEX_INDICATOR, Field::SexIndicator)?;
    let sex = if sex_marker.text == "né" { Sex::M } else { Sex::F };

    let place = parse_birth_place(window.after(&date).as_str());
    Ok(place.map(|place| BirthDataParse {
        birth_data: BirthData {
            date: date.text.to_string(),
            place,
        },
        sex,
    }))
}

/// Parse the text following a birth date into commune and country.
pub fn parse_birth_place(text: &str) -> Outcome<Option<BirthPlace>> {
    let mut warnings = Vec::new();
    let text = strip_commas(text);

    let Some((article, rest)) = split_place_prefix(text) else {
        return Outcome::degraded(
            None,
            Warning::emit(
                Component::BirthPlace,
                format!("birth place prefix not found in \"{}\"", text),
            ),
        );
    };

    let (commune, country) = match rest.find('(') {
        None => {
            let country = if rest.trim().eq_ignore_ascii_case("monaco") {
                Some("Monaco".to_string())
            } else {
                warnings.push(Warning::emit(
                    Component::BirthPlace,
                    format!("birth country not found in \"{}\"", text),
                ));
                None
            };
            (rest, country)
        }
        Some(open) => {
            let inner = &rest[open + 1..];
            let country = match inner.find(')') {
                Some(close) => {
                    let country = &inner[..close];
                    if !country.is_empty() && country.chars().all(|c| c.is_ascii_digit()) {
                        "France"
                    } else {
                        country
                    }
                }
                None => {
                    warnings.push(Warning::emit(
                        Component::BirthPlace,
                        format!("closing parenthesis not found in \"{}\"", text),
                    ));
                    inner
                }
            };
            (&rest[..open], Some(country.to_string()))
        }
    };

    let country = country.filter(|c| !c.is_empty());
    let commune = commune.trim();
    let commune = if commune.is_empty() {
        warnings.push(Warning::emit(
            Component::BirthPlace,
            format!("commune not found in \"{}\"", text),
        ));
        None
    } else {
        Some(commune.to_string())
    };

    Outcome::new(
        Some(BirthPlace {
            commune,
            country,
            article,
        }),
        warnings,
    )
}

/// Trim and drop one leading and one trailing comma.
fn strip_commas(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix(',').unwrap_or(text);
    let text = text.strip_suffix(',').unwrap_or(text);
    text.trim()
}

/// Split the place preposition off; the remainder must not be empty.
fn split_place_prefix(text: &str) -> Option<(Option<Article>, &str)> {
    PLACE_PREFIXES.iter().find_map(|(prefix, article)| {
        text.strip_prefix(prefix)
            .filter(|rest| !rest.is_empty())
            .map(|rest| (*article, rest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn place(commune: &str, country: &str, article: Option<Article>) -> Option<BirthPlace> {
        Some(BirthPlace {
            commune: Some(commune.to_string()),
            country: Some(country.to_string()),
            article,
        })
    }

    #[test]
    fn test_parse_birth_data() {
        let parsed = parse_birth_data(Window::new(", née le 03/04/1985 à Dakar (Sénégal), "))
            .unwrap()
            .into_value();
        assert_eq!(parsed.sex, Sex::F);
        assert_eq!(parsed.birth_data.date, "03/04/1985");
        assert_eq!(parsed.birth_data.place, place("Dakar", "Sénégal", None));
    }

    #[test]
    fn test_male_marker() {
        let parsed = parse_birth_data(Window::new(", né le 01/01/1990 à Paris (75), "))
            .unwrap()
            .into_value();
        assert_eq!(parsed.sex, Sex::M);
        assert_eq!(parsed.birth_data.place, place("Paris", "France", None));
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let err = parse_birth_data(Window::new(", né le 1/1/90 à Paris, ")).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: Field::BirthDate });
    }

    #[test]
    fn test_two_dates_is_an_error() {
        let err = parse_birth_data(Window::new("né le 01/01/1990 ou 02/01/1990 à Paris")).unwrap_err();
        assert!(matches!(err, FieldError::Ambiguous { field: Field::BirthDate, count: 2 }));
    }

    #[test]
    fn test_missing_sex_marker_is_an_error() {
        let err = parse_birth_data(Window::new(", le 01/01/1990 à Paris (75)")).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: Field::SexIndicator });
    }

    #[test]
    fn test_every_place_prefix() {
        let cases = [
            ("à Alger (Algérie)", place("Alger", "Algérie", None)),
            ("au Caire (Egypte)", place("Caire", "Egypte", Some(Article::Le))),
            ("à la Havane (Cuba)", place("Havane", "Cuba", Some(Article::La))),
            ("aux Abymes (971)", place("Abymes", "France", Some(Article::Les))),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_birth_place(text).into_value(), expected, "{}", text);
        }
    }

    #[test]
    fn test_prefixes_do_not_shadow_each_other() {
        // Each prefix only matches its own spelling, whatever the list order.
        for (i, (prefix, _)) in PLACE_PREFIXES.iter().enumerate() {
            let text = format!("{}Ville (Pays)", prefix);
            let (article, rest) = split_place_prefix(&text).unwrap();
            assert_eq!(article, PLACE_PREFIXES[i].1, "{}", prefix);
            assert_eq!(rest, "Ville (Pays)");
        }
    }

    #[test]
    fn test_monaco_without_parenthesis() {
        let outcome = parse_birth_place(" à Monaco, ");
        assert!(!outcome.is_degraded());
        assert_eq!(
            outcome.into_value(),
            Some(BirthPlace {
                commune: Some("Monaco".to_string()),
                country: Some("Monaco".to_string()),
                article: None,
            })
        );
    }

    #[test]
    fn test_missing_country_warns() {
        let outcome = parse_birth_place("à Lyon");
        assert!(outcome.is_degraded());
        let place = outcome.into_value().unwrap();
        assert_eq!(place.commune.as_deref(), Some("Lyon"));
        assert_eq!(place.country, None);
    }

    #[test]
    fn test_unclosed_parenthesis_keeps_tail_as_country() {
        let outcome = parse_birth_place("à Tunis (Tunisie");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), place("Tunis", "Tunisie", None));
    }

    #[test]
    fn test_empty_commune_warns() {
        let outcome = parse_birth_place("à (Maroc)");
        assert!(outcome.is_degraded());
        let place = outcome.into_value().unwrap();
        assert_eq!(place.commune, None);
        assert_eq!(place.country.as_deref(), Some("Maroc"));
    }

    #[test]
    fn test_unknown_prefix_gives_no_place() {
        let outcome = parse_birth_place("en Algérie");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), None);
    }
}
