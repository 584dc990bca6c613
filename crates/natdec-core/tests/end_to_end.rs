//! Two-decree journal document through the whole pipeline.

use chrono::NaiveDate;
use natdec_core::audit::audit_entries;
use natdec_core::decree::rules::patterns::DECREE_PURPOSE;
use natdec_core::models::config::StatsConfig;
use natdec_core::{
    decrees_stats, Component, DecreeParser, DocumentParser, EntryType, ExtractionError,
    SegmentationMode, Sex,
};
use pretty_assertions::assert_eq;

const DECREE_A_ENTRIES: [&str; 3] = [
    "ABADIE (Marie, Louise), née le 03/04/1985 à Dakar (Sénégal), NAT, 2020X 012345, dép. 075, Dt. 053/1.",
    "BENALI (Karim), né le 11/09/1979 au Caire (Egypte), REI, 2019X 045002, dép. 013, Dt. 053/2.",
    "BENALI (Yasmine), née le 05/05/2010 au Caire (Egypte), EFF, 2019X 045002, dép. 013, Dt. 053/3.",
];

const DECREE_B_ENTRIES: [&str; 2] = [
    "McDONALD (Ian), né le 22/12/1988 à la Havane (Cuba), NAT, 2021X 777001, dép. 02A, Dt. 054/1.",
    "N’DIAYE (Awa), née le 30/06/1992 aux Abymes (971), LIB, 2021X 777002, dép. 971, Dt. 054/2.",
];

// Two department markers: extraction must drop it.
const MALFORMED_ENTRY: &str =
    "MARTIN (Luc), né le 02/02/1970 à Rome (Italie), NAT, 2019X 555111, dép. 013, dép. 084, Dt. 054/3.";

fn decree(date: &str, entries: &[&str]) -> String {
    format!(
        "Décret du {date} {purpose} Le Premier ministre, Sur le rapport du ministre de l’intérieur, \
         Décrète : Art. 1er. – Sont naturalisés français : {entries} \
         Art. 2. – Le ministre de l’intérieur est chargé de l’exécution du présent décret. \
         Fait le {date}.",
        date = date,
        purpose = DECREE_PURPOSE,
        entries = entries.join(" ")
    )
}

fn journal() -> String {
    let mut second = DECREE_B_ENTRIES.to_vec();
    second.insert(1, MALFORMED_ENTRY);

    format!(
        "JOURNAL OFFICIEL DE LA RÉPUBLIQUE FRANÇAISE Sommaire Ministère de l’intérieur \
         Naturalisations et réintégrations 1 Décret du 12 mars 2021 {purpose} \
         2 Décret du 14 mars 2021 {purpose} \
         Naturalisations et réintégrations {a} {b} Le Premier ministre, Jean CASTEX",
        purpose = DECREE_PURPOSE,
        a = decree("12 mars 2021", &DECREE_A_ENTRIES),
        b = decree("14 mars 2021", &second)
    )
}

#[test]
fn test_two_decree_document() {
    let text = journal();
    let document = DecreeParser::new().parse(&text).unwrap();

    assert_eq!(document.segmentation, SegmentationMode::Delimited);
    assert_eq!(document.decrees.len(), 2);

    let (a, b) = (&document.decrees[0], &document.decrees[1]);
    assert_eq!(a.reference_number, "053");
    assert_eq!(b.reference_number, "054");
    assert_eq!(a.date, NaiveDate::from_ymd_opt(2021, 3, 12));
    assert_eq!(b.date, NaiveDate::from_ymd_opt(2021, 3, 14));

    assert_eq!(a.entries.len(), DECREE_A_ENTRIES.len());
    assert_eq!(b.entries.len(), DECREE_B_ENTRIES.len());
    for (entry, raw) in a.entries.iter().zip(DECREE_A_ENTRIES) {
        assert_eq!(entry.raw, raw);
    }
    for (entry, raw) in b.entries.iter().zip(DECREE_B_ENTRIES) {
        assert_eq!(entry.raw, raw);
    }
}

#[test]
fn test_malformed_entry_is_reported() {
    let document = DecreeParser::new().parse(&journal()).unwrap();

    let entry_warnings: Vec<_> = document
        .warnings
        .iter()
        .filter(|w| w.component == Component::Entry)
        .collect();
    assert_eq!(entry_warnings.len(), 1);
    assert!(entry_warnings[0].message.contains("MARTIN (Luc)"));
    assert!(entry_warnings[0].message.contains("\"department\""));
}

#[test]
fn test_entry_fields() {
    let document = DecreeParser::new().parse(&journal()).unwrap();
    let b = &document.decrees[1];

    let mcdonald = &b.entries[0].parsed;
    assert_eq!(mcdonald.name.to_string(), "McDONALD (Ian)");
    assert_eq!(mcdonald.sex, Sex::M);
    assert_eq!(mcdonald.department, "02a");
    let place = mcdonald.birth_data.place.as_ref().unwrap();
    assert_eq!(place.commune.as_deref(), Some("Havane"));
    assert_eq!(place.country.as_deref(), Some("Cuba"));

    let ndiaye = &b.entries[1].parsed;
    assert_eq!(ndiaye.entry_type, EntryType::Lib);
    assert_eq!(ndiaye.department, "971");
    assert_eq!(ndiaye.ministry_number.to_string(), "2021X 777002");
}

#[test]
fn test_stats_and_audit() {
    let text = journal();
    let document = DecreeParser::new().parse(&text).unwrap();

    let stats = decrees_stats(&document.decrees, &StatsConfig::default());
    assert_eq!(stats.decrees[0].naturalizations_count, 2);
    assert_eq!(stats.decrees[1].naturalizations_count, 2);
    assert_eq!(stats.totals.naturalizations_count, 4);

    let audit = audit_entries(&text, &document.decrees);
    assert_eq!(audit.expected, 6);
    assert_eq!(audit.parsed, 5);
    assert_eq!(audit.missing.len(), 1);
    assert_eq!(audit.missing[0].reference, "Dt. 054/3");
}

#[test]
fn test_not_a_decree_is_fatal() {
    let text = decree("12 mars 2021", &["Aucune personne."]);
    let err = DecreeParser::new()
        .with_summary_stripping(false)
        .parse(&text)
        .unwrap_err();
    assert_eq!(err, ExtractionError::NoEntriesMarker);
}
