use std::collections::{HashMap, HashSet};

use log::debug;

use crate::errors::ConvertError;
use crate::language_utils;
use crate::naming;
use crate::translation_record::TranslationRecord;
use crate::xliff_document::XliffDocument;

// @module: table -> XLIFF recomposition

/// Canonical extension of the produced document
const OUTPUT_EXTENSION: &str = "xlf";

/// Result of merging edited rows back into the original document
#[derive(Debug)]
pub struct RecomposeOutput {
    /// The rebuilt document
    pub document_bytes: Vec<u8>,
    /// Suggested output filename, `{model}_{LANG}.xlf`
    pub output_name: String,
    /// Advisory match statistics, never fatal
    pub summary: RecomposeSummary,
}

/// How well the edited rows lined up with the original trans-units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecomposeSummary {
    /// Units whose field id matched an edited row
    pub matched_units: usize,
    /// Units that fell back to their own source text
    pub fallback_units: usize,
    /// Edited rows whose field id matched no unit
    pub unmatched_rows: usize,
}

/// Merge edited rows into a fresh parse of the original document.
///
/// The original bytes must be the same ones the decomposition read; the tree
/// is re-parsed here, never reused from a prior call. Every trans-unit ends up
/// with a target: the row's chosen text when its field id matches, the unit's
/// own source text otherwise. Later rows override earlier ones on duplicate
/// field ids, and the most recent non-empty two-character language code wins.
pub fn recompose(
    original_document_bytes: &[u8],
    edited_records: &[TranslationRecord],
    fallback_model_name: &str,
) -> Result<RecomposeOutput, ConvertError> {
    if original_document_bytes.is_empty() {
        return Err(ConvertError::MissingInput { what: "original document" });
    }

    let mut document = XliffDocument::parse(original_document_bytes)?;

    let mut translation_map: HashMap<&str, &str> = HashMap::new();
    let mut language_code = String::new();
    for record in edited_records {
        if language_utils::is_two_char_code(record.language_code.trim()) {
            language_code = record.language_code.trim().to_uppercase();
        }
        translation_map.insert(record.field_id.as_str(), record.chosen_text());
    }
    debug!("Loaded {} translation(s) from {} row(s)", translation_map.len(), edited_records.len());

    let mut summary = RecomposeSummary::default();
    let mut matched_ids: HashSet<String> = HashSet::new();
    document.set_targets_with(|raw_id, source_text| {
        let field_id = naming::field_id_of(raw_id);
        match translation_map.get(field_id) {
            Some(chosen) => {
                summary.matched_units += 1;
                matched_ids.insert(field_id.to_string());
                (*chosen).to_string()
            }
            None => {
                summary.fallback_units += 1;
                source_text.to_string()
            }
        }
    });
    summary.unmatched_rows = edited_records
        .iter()
        .filter(|record| !matched_ids.contains(record.field_id.as_str()))
        .count();

    let document_bytes = document.to_bytes()?;
    let output_name = format!("{fallback_model_name}_{language_code}.{OUTPUT_EXTENSION}");

    Ok(RecomposeOutput {
        document_bytes,
        output_name,
        summary,
    })
}
