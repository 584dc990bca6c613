//! Common patterns for *Journal officiel* naturalization decrees.

use lazy_static::lazy_static;
use regex::Regex;

/// Legal purpose sentence following the date in every decree preamble.
pub const DECREE_PURPOSE: &str = "portant naturalisation, réintégration, mention d’enfants mineurs bénéficiant de l’effet collectif attaché à l’acquisition de la nationalité française par leurs parents";

/// Decrees end with their signature line, "Fait le <date>".
pub const DECREE_END_MARKER: &str = "Fait le";

/// Section header printed once in the summary and once before the decrees.
pub const NATURALISATION_SECTION: &str = "Naturalisations et réintégrations";

/// Page masthead that can split an entry across pages.
pub const MASTHEAD: &str = "JOURNAL OFFICIEL DE LA RÉPUBLIQUE FRANÇAISE";

/// French month names, in calendar order.
pub const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const MONTHS_ALTERNATION: &str =
    "(janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre)";

lazy_static! {
    // Decree structure
    pub static ref DECREE_PREAMBLE: Regex = Regex::new(&format!(
        r"Décret du \d{{1,2}} {} \d{{4}} {}",
        MONTHS_ALTERNATION,
        regex::escape(DECREE_PURPOSE)
    )).unwrap();

    pub static ref DECREE_DATE: Regex = Regex::new(&format!(
        r"\d{{1,2}} {} \d{{4}}",
        MONTHS_ALTERNATION
    )).unwrap();

    // Last-entry marker bounding the scan window
    pub static ref DECREE_FIELD_MARKER: Regex = Regex::new(
        r"Dt\. \d{3}/\d*."
    ).unwrap();

    // Anything that looks like a person record
    pub static ref ENTRY_CANDIDATE: Regex = Regex::new(
        r"(Mc|\p{Lu})(\p{Lu}| |-|’|\.)*?\(.*?\).*?née?.*?(NAT|EFF|REI|LIB).*?dép.*?Dt\..*?\."
    ).unwrap();

    // Entry fields
    pub static ref ENTRY_NAME: Regex = Regex::new(
        r"(Mc|\p{Lu})(\p{Lu}| |-|’|\.)*?\(.*?\)"
    ).unwrap();

    pub static ref ENTRY_TYPE: Regex = Regex::new(
        r"NAT|EFF|REI|LIB"
    ).unwrap();

    pub static ref MINISTRY_NUMBER: Regex = Regex::new(
        r"\d{4}X \d{6}"
    ).unwrap();

    pub static ref DEPARTMENT: Regex = Regex::new(
        r"dép\. (02[AB]|\d{2,3})"
    ).unwrap();

    pub static ref DECREE_REFERENCE: Regex = Regex::new(
        r"Dt\. \d*/\d*"
    ).unwrap();

    // Birth data
    pub static ref BIRTH_DATE: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    pub static ref SEX_INDICATOR: Regex = Regex::new(
        r"née?"
    ).unwrap();
}
