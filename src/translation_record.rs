use std::fmt;

// @module: The tabular row model shared by export and import

/// Default source language of the embedded auto-translate formula
pub const DEFAULT_FORMULA_SOURCE_LANGUAGE: &str = "en";

/// Spreadsheet row of the header line; record rows start right below it
const FIRST_RECORD_ROW: usize = 2;

// @struct: One row of the tabular form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationRecord {
    // @field: Join key between export and import, derived from the unit id
    pub field_id: String,

    // @field: Original-language text, may be empty
    pub source_text: String,

    // @field: Translated text, empty until the editor fills it in
    pub target_text: String,

    // @field: Two-letter code, constant across all rows of one document
    pub language_code: String,

    // @field: Opaque formula carried for downstream tooling, write-only
    pub auto_translate_hint: String,
}

impl TranslationRecord {
    /// Build a freshly exported row: empty target, formula referencing the
    /// row's own source and language cells.
    pub fn exported(
        field_id: impl Into<String>,
        source_text: impl Into<String>,
        language_code: impl Into<String>,
        record_index: usize,
        formula_source_language: &str,
    ) -> Self {
        TranslationRecord {
            field_id: field_id.into(),
            source_text: source_text.into(),
            target_text: String::new(),
            language_code: language_code.into(),
            auto_translate_hint: auto_translate_formula(record_index, formula_source_language),
        }
    }

    /// The text the merge should use for this row: the target when it holds
    /// anything beyond whitespace, the source otherwise.
    pub fn chosen_text(&self) -> &str {
        if self.target_text.trim().is_empty() {
            &self.source_text
        } else {
            &self.target_text
        }
    }
}

impl fmt::Display for TranslationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?} -> {:?}", self.field_id, self.source_text, self.target_text)
    }
}

/// Conditional translation-lookup formula for the given record (0-based index
/// into the exported rows). Cell references follow the fixed column order
/// `id, source, target, lang, auto_translate`: B is the source cell, D the
/// language cell. The expression is an output convention for spreadsheet
/// tools and is never parsed back in.
pub fn auto_translate_formula(record_index: usize, source_language: &str) -> String {
    let row = record_index + FIRST_RECORD_ROW;
    format!("=IF(B{row}=\"\", \"\", TRANSLATE(B{row}, \"{source_language}\", D{row}))")
}
