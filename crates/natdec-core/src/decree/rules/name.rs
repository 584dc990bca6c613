//! Person name extraction ("DUPONT (Jean, Paul)").

use regex::Regex;

use super::patterns::ENTRY_NAME;
use super::{Field, FieldExtractor};
use crate::error::FieldError;
use crate::models::decree::EntryName;

/// Name field extractor.
pub struct NameExtractor;

impl FieldExtractor for NameExtractor {
    type Output = EntryName;

    fn field(&self) -> Field {
        Field::Name
    }

    fn pattern(&self) -> &Regex {
        &ENTRY_NAME
    }

    fn parse(&self, matched: &str) -> Result<EntryName, FieldError> {
        Ok(parse_name(matched))
    }
}

/// Split a name at its parenthesis: last name before, first names inside.
pub fn parse_name(name: &str) -> EntryName {
    let Some(open) = name.find('(') else {
        return EntryName {
            last_name: name.trim().to_string(),
            first_names: Vec::new(),
        };
    };

    let inner = &name[open + 1..];
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    EntryName {
        last_name: name[..open].trim().to_string(),
        first_names: inner.split(',').map(|n| n.trim().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_name() {
        let name = parse_name("DUPONT (Jean, Paul)");
        assert_eq!(name.last_name, "DUPONT");
        assert_eq!(name.first_names, vec!["Jean", "Paul"]);
    }

    #[test]
    fn test_parse_compound_name() {
        let name = parse_name("EL MANSOURI épouse BENALI (Fatima)");
        assert_eq!(name.last_name, "EL MANSOURI épouse BENALI");
        assert_eq!(name.first_names, vec!["Fatima"]);
    }

    #[test]
    fn test_parse_name_without_parenthesis() {
        let name = parse_name("DUPONT");
        assert_eq!(name.last_name, "DUPONT");
        assert!(name.first_names.is_empty());
    }
}
