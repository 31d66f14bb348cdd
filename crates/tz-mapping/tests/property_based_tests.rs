//! Property-Based Tests
//!
//! Tests using property-based testing (proptest) to verify rewriter invariants:
//! - Text without TZID passes through unchanged for any table
//! - Rewriting is idempotent over generated calendars
//! - Each TZID shape maps a legacy name to its standard name

use ical_tz_mapping::{rewrite, MappingTable, Rewriter};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Windows-style name, possibly containing regex metacharacters
fn legacy_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z.()+*?]{0,10}".prop_map(|word| format!("{word} Standard Time"))
}

/// IANA-style `Area/City` name
fn standard_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}/[A-Z][a-z_]{2,12}"
}

fn mapping_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((legacy_name(), standard_name()), 1..8)
}

/// One content line carrying `name` in one of the TZID positions
fn tzid_line(name: &str, shape: usize) -> String {
    match shape {
        0 => format!("TZID:{name}"),
        1 => format!("DTSTART;TZID=\"{name}\":20240311T090000"),
        2 => format!("DTEND;TZID={name}:20240311T100000"),
        3 => format!("X-MS-OLK-TZID=\"{name}\""),
        4 => format!("RDATE;VALUE=DATE-TIME;TZID=\"{name}:20240312T080000"),
        _ => format!("SUMMARY:Review {name} rollout"),
    }
}

fn calendar(names: Vec<String>) -> impl Strategy<Value = String> {
    let line = prop_oneof![
        "[A-Z]{3,10}:[A-Za-z0-9 ,.]{0,30}",
        (prop::sample::select(names), 0usize..6).prop_map(|(name, shape)| tzid_line(&name, shape)),
    ];
    prop::collection::vec(line, 0..40).prop_map(|lines| {
        format!(
            "BEGIN:VCALENDAR\r\n{}\r\nEND:VCALENDAR\r\n",
            lines.join("\r\n")
        )
    })
}

fn table_and_calendar() -> impl Strategy<Value = (MappingTable, String)> {
    mapping_pairs().prop_flat_map(|pairs| {
        let names = pairs.iter().map(|(legacy, _)| legacy.clone()).collect();
        let table: MappingTable = pairs.into_iter().collect();
        (Just(table), calendar(names))
    })
}

// ============================================================================
// Pass-through Properties
// ============================================================================

/// Property: Text without TZID is returned unchanged for any table
#[test]
fn proptest_text_without_tzid_unchanged() {
    proptest!(|(text in "\\PC{0,300}", pairs in mapping_pairs())| {
        prop_assume!(!text.contains("TZID"));
        let table: MappingTable = pairs.into_iter().collect();

        prop_assert_eq!(rewrite(&text, &table), text.clone());
        prop_assert_eq!(rewrite(&text, &MappingTable::builtin()), text);
    });
}

/// Property: Legacy names outside TZID positions are left alone
#[test]
fn proptest_bare_legacy_names_unchanged() {
    proptest!(|(pairs in mapping_pairs())| {
        let text: String = pairs
            .iter()
            .map(|(legacy, _)| format!("SUMMARY:{legacy}\r\nLOCATION:{legacy}\r\n"))
            .collect();
        let table: MappingTable = pairs.into_iter().collect();

        prop_assert_eq!(rewrite(&text, &table), text);
    });
}

// ============================================================================
// Idempotence Properties
// ============================================================================

/// Property: Rewriting twice equals rewriting once (generated tables)
#[test]
fn proptest_idempotent_generated_tables() {
    proptest!(|((table, document) in table_and_calendar())| {
        let rewriter = Rewriter::new(&table);
        let once = rewriter.rewrite(&document);

        prop_assert_eq!(rewriter.rewrite(&once), once);
    });
}

/// Property: Rewriting twice equals rewriting once (built-in table)
#[test]
fn proptest_idempotent_builtin_table() {
    let table = MappingTable::builtin();
    let names: Vec<String> = table.iter().map(|(legacy, _)| legacy.to_string()).collect();
    let rewriter = Rewriter::new(&table);

    proptest!(|(document in calendar(names.clone()))| {
        let once = rewriter.rewrite(&document);

        prop_assert_eq!(rewriter.rewrite(&once), once);
    });
}

// ============================================================================
// Shape Properties
// ============================================================================

/// Property: Each TZID shape rewrites a legacy name to its standard name
#[test]
fn proptest_shapes_map_legacy_to_standard() {
    proptest!(|(legacy in legacy_name(), standard in standard_name())| {
        let table: MappingTable = [(legacy.clone(), standard.clone())].into_iter().collect();

        prop_assert_eq!(
            rewrite(&format!("TZID:{legacy}"), &table),
            format!("TZID:{standard}")
        );
        prop_assert_eq!(
            rewrite(&format!("TZID=\"{legacy}\""), &table),
            format!("TZID={standard}")
        );
        prop_assert_eq!(
            rewrite(&format!("TZID={legacy}"), &table),
            format!("TZID={standard}")
        );
        prop_assert_eq!(
            rewrite(&format!(";TZID=\"{legacy}\""), &table),
            format!(";TZID=\"{standard}\"")
        );
        prop_assert_eq!(
            rewrite(&format!(";TZID={legacy}"), &table),
            format!(";TZID={standard}")
        );
    });
}

/// Property: Rewritten calendars keep their line structure
#[test]
fn proptest_line_count_preserved() {
    proptest!(|((table, document) in table_and_calendar())| {
        let rewritten = rewrite(&document, &table);

        prop_assert_eq!(rewritten.lines().count(), document.lines().count());
        for (legacy, _) in table.iter() {
            prop_assert!(!rewritten.contains(&format!("TZID:{legacy}")), "legacy TZID {} survived rewrite", legacy);
            prop_assert!(!rewritten.contains(&format!("TZID={legacy}")), "legacy TZID {} survived rewrite", legacy);
            prop_assert!(!rewritten.contains(&format!("TZID=\"{legacy}")), "legacy TZID {} survived rewrite", legacy);
        }
    });
}
