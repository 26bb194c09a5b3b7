/*!
 * Tests for CSV rendering of the tabular form
 */

use xlifftab::table::{TABLE_HEADER, read_table, write_table};
use xlifftab::translation_record::{TranslationRecord, auto_translate_formula};

fn sample_records() -> Vec<TranslationRecord> {
    vec![
        TranslationRecord {
            field_id: "customerName".to_string(),
            source_text: "Customer name".to_string(),
            target_text: String::new(),
            language_code: "DE".to_string(),
            auto_translate_hint: auto_translate_formula(0, "en"),
        },
        TranslationRecord {
            field_id: "age".to_string(),
            source_text: "30, give or take".to_string(),
            target_text: String::new(),
            language_code: "DE".to_string(),
            auto_translate_hint: auto_translate_formula(1, "en"),
        },
    ]
}

#[test]
fn test_write_table_withRecords_shouldEmitFixedHeaderAndOrder() {
    let mut buffer = Vec::new();
    write_table(&mut buffer, &sample_records()).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,source,target,lang,auto_translate"));
    assert_eq!(TABLE_HEADER, ["id", "source", "target", "lang", "auto_translate"]);

    let first = lines.next().unwrap();
    assert!(first.starts_with("customerName,Customer name,,DE,"), "line was: {first}");
}

/// A written table reads back identically, except that the formula column
/// is write-only and comes back empty
#[test]
fn test_read_table_withWrittenTable_shouldRecoverRecords() {
    let mut buffer = Vec::new();
    write_table(&mut buffer, &sample_records()).unwrap();

    let records = read_table(buffer.as_slice()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field_id, "customerName");
    assert_eq!(records[0].source_text, "Customer name");
    assert_eq!(records[1].source_text, "30, give or take");
    assert!(records.iter().all(|r| r.auto_translate_hint.is_empty()));
}

#[test]
fn test_read_table_withEditedTargets_shouldKeepCellValues() {
    let input = "id,source,target,lang,auto_translate\n\
                 age,30,trente,fr,whatever\n\
                 name,Jean,,fr,\n";

    let records = read_table(input.as_bytes()).unwrap();

    assert_eq!(records[0].target_text, "trente");
    assert_eq!(records[0].language_code, "fr");
    assert_eq!(records[1].target_text, "");
}

/// Rows without an id cell cannot be joined back and are dropped
#[test]
fn test_read_table_withEmptyIdRows_shouldSkipThem() {
    let input = "id,source,target,lang,auto_translate\n\
                 ,orphan,x,fr,\n\
                 age,30,trente,fr,\n";

    let records = read_table(input.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field_id, "age");
}

/// Short rows read as empty trailing cells
#[test]
fn test_read_table_withShortRows_shouldFillEmptyCells() {
    let input = "id,source,target,lang,auto_translate\nage,30\n";

    let records = read_table(input.as_bytes()).unwrap();

    assert_eq!(records[0].source_text, "30");
    assert_eq!(records[0].target_text, "");
    assert_eq!(records[0].language_code, "");
}

#[test]
fn test_read_table_withEmptyContent_shouldReturnNoRecords() {
    let records = read_table(&b""[..]).unwrap();
    assert!(records.is_empty());
}

/// Quoted cells with embedded separators and quotes survive the round trip
#[test]
fn test_table_withQuotedCells_shouldRoundTrip() {
    let records = vec![TranslationRecord {
        field_id: "note".to_string(),
        source_text: "said \"hi\", then left".to_string(),
        target_text: "a dit « salut », puis est parti".to_string(),
        language_code: "fr".to_string(),
        auto_translate_hint: String::new(),
    }];

    let mut buffer = Vec::new();
    write_table(&mut buffer, &records).unwrap();
    let parsed = read_table(buffer.as_slice()).unwrap();

    assert_eq!(parsed[0].source_text, records[0].source_text);
    assert_eq!(parsed[0].target_text, records[0].target_text);
}
