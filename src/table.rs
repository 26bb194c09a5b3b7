use std::io::{Read, Write};

use crate::errors::ConvertError;
use crate::translation_record::TranslationRecord;

// @module: CSV rendering of the tabular form

/// Fixed column order of the exported table
pub const TABLE_HEADER: [&str; 5] = ["id", "source", "target", "lang", "auto_translate"];

/// Render records to CSV in the fixed column order, preserving row order.
pub fn write_table<W: Write>(writer: W, records: &[TranslationRecord]) -> Result<(), ConvertError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(TABLE_HEADER)
        .map_err(ConvertError::table)?;

    for record in records {
        csv_writer
            .write_record([
                record.field_id.as_str(),
                record.source_text.as_str(),
                record.target_text.as_str(),
                record.language_code.as_str(),
                record.auto_translate_hint.as_str(),
            ])
            .map_err(ConvertError::table)?;
    }

    csv_writer.flush().map_err(ConvertError::table)?;
    Ok(())
}

/// Parse an edited CSV table back into records.
///
/// The header row is skipped, rows with an empty id cell are dropped, and
/// missing trailing cells read as empty. The `auto_translate` column is
/// write-only and ignored here.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<TranslationRecord>, ConvertError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(ConvertError::table)?;

        let field_id = row.get(0).unwrap_or_default().to_string();
        if field_id.is_empty() {
            continue;
        }

        records.push(TranslationRecord {
            field_id,
            source_text: row.get(1).unwrap_or_default().to_string(),
            target_text: row.get(2).unwrap_or_default().to_string(),
            language_code: row.get(3).unwrap_or_default().to_string(),
            auto_translate_hint: String::new(),
        });
    }

    Ok(records)
}
