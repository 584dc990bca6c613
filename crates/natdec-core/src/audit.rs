//! Entry audit: compare the "Dt." references printed in a document with the
//! references of the entries actually parsed from it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::decree::rules::patterns::DECREE_REFERENCE;
use crate::models::decree::ParsedDecree;

/// A reference and how many times it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCount {
    pub reference: String,
    pub count: usize,
}

/// A reference seen a different number of times in the text and in the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub reference: String,
    pub expected: usize,
    pub parsed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryAudit {
    /// References found in the raw text.
    pub expected: usize,
    /// Entries parsed.
    pub parsed: usize,
    /// In the text, never parsed.
    pub missing: Vec<ReferenceCount>,
    /// Parsed, not in the text.
    pub unexpected: Vec<ReferenceCount>,
    pub count_mismatches: Vec<CountMismatch>,
}

impl EntryAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.count_mismatches.is_empty()
    }
}

/// Audit the parsed decrees of a document against its text.
pub fn audit_entries(text: &str, decrees: &[ParsedDecree]) -> EntryAudit {
    let expected = count_references(DECREE_REFERENCE.find_iter(text).map(|m| m.as_str().to_string()));
    let parsed = count_references(
        decrees
            .iter()
            .flat_map(|d| d.entries.iter())
            .map(|e| format!("Dt. {}", e.parsed.decree_reference)),
    );

    let mut audit = EntryAudit {
        expected: expected.values().sum(),
        parsed: parsed.values().sum(),
        ..Default::default()
    };

    for (reference, &count) in &expected {
        match parsed.get(reference) {
            None => audit.missing.push(ReferenceCount {
                reference: reference.clone(),
                count,
            }),
            Some(&got) if got != count => audit.count_mismatches.push(CountMismatch {
                reference: reference.clone(),
                expected: count,
                parsed: got,
            }),
            Some(_) => {}
        }
    }
    for (reference, &count) in &parsed {
        if !expected.contains_key(reference) {
            audit.unexpected.push(ReferenceCount {
                reference: reference.clone(),
                count,
            });
        }
    }

    audit
}

fn count_references(references: impl Iterator<Item = String>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for reference in references {
        *counts.entry(reference).or_insert(0) += 1;
    }
    counts
}
