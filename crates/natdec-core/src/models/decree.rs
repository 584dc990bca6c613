//! Parsed decree and entry data models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reference number used when a decree yielded no entries.
pub const UNKNOWN_REFERENCE_NUMBER: &str = "-1";

/// One decree of a *Journal officiel* document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDecree {
    /// Decree id taken from the first entry's "Dt." reference.
    pub reference_number: String,

    /// Signature date announced in the decree preamble.
    pub date: Option<NaiveDate>,

    /// Entries in the order they appear in the decree.
    pub entries: Vec<Entry>,
}

impl ParsedDecree {
    /// Entries counted as acquisitions of nationality (everything but `EFF`).
    pub fn naturalizations(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| e.parsed.entry_type.is_naturalization())
    }
}

/// One person-record of a decree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Candidate text the entry was parsed from.
    pub raw: String,

    /// Decomposed fields.
    pub parsed: ParsedEntry,
}

/// Fields of a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub name: EntryName,
    pub birth_data: BirthData,
    pub sex: Sex,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub ministry_number: MinistryNumber,
    /// Normalized department code ("75", "02a", "971").
    pub department: String,
    pub decree_reference: DecreeReference,
    /// Text left after the decree reference.
    pub rest: String,
}

/// Last name and first names of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryName {
    pub last_name: String,
    pub first_names: Vec<String>,
}

impl EntryName {
    pub fn is_empty(&self) -> bool {
        self.last_name.is_empty() && self.first_names.is_empty()
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.last_name, self.first_names.join(", "))
    }
}

/// Birth date and place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    /// Date literal as printed, `dd/mm/yyyy`.
    pub date: String,

    pub place: Option<BirthPlace>,
}

/// Birth place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthPlace {
    pub commune: Option<String>,
    pub country: Option<String>,

    /// Article carried by the place preposition ("au Havre" -> `Le`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
}

/// Article implied by a birth place preposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Article {
    Le,
    La,
    Les,
}

impl Article {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Le => "Le",
            Self::La => "La",
            Self::Les => "Les",
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex derived from the "né"/"née" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M => f.write_str("M"),
            Self::F => f.write_str("F"),
        }
    }
}

/// Legal action recorded by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Naturalisation.
    Nat,
    /// Effet collectif: a minor child covered by a parent's acquisition.
    Eff,
    /// Réintégration.
    Rei,
    /// Libération des liens d'allégeance.
    Lib,
    Unknown,
}

impl EntryType {
    /// Map a type token; anything unrecognized is `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "NAT" => Self::Nat,
            "EFF" => Self::Eff,
            "REI" => Self::Rei,
            "LIB" => Self::Lib,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nat => "NAT",
            Self::Eff => "EFF",
            Self::Rei => "REI",
            Self::Lib => "LIB",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_naturalization(&self) -> bool {
        !matches!(self, Self::Eff)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ministry file number, printed as `2020X 123456`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinistryNumber {
    pub year: String,
    pub series: String,
    pub idx: String,
}

impl fmt::Display for MinistryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}X {}{}", self.year, self.series, self.idx)
    }
}

/// "Dt. <decree>/<entry>" cross-reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecreeReference {
    pub decree_id: String,
    pub entry_id: String,
}

impl fmt::Display for DecreeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.decree_id, self.entry_id)
    }
}
