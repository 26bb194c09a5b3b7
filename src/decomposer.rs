use log::debug;

use crate::errors::ConvertError;
use crate::naming;
use crate::translation_record::{DEFAULT_FORMULA_SOURCE_LANGUAGE, TranslationRecord};
use crate::xliff_document::XliffDocument;

// @module: XLIFF -> table decomposition

/// Result of decomposing an XLIFF document into tabular form
#[derive(Debug)]
pub struct DecomposeOutput {
    /// One row per trans-unit, in document order; duplicates preserved
    pub records: Vec<TranslationRecord>,
    /// Model name inferred from the upload filename
    pub model_name: String,
    /// Upper-cased two-letter code inferred from the upload filename,
    /// empty when the filename carries none
    pub language_code: String,
}

/// Knobs for the exported rows
#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Source language the auto-translate formula translates from
    pub formula_source_language: String,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        DecomposeOptions {
            formula_source_language: DEFAULT_FORMULA_SOURCE_LANGUAGE.to_string(),
        }
    }
}

/// Decompose an XLIFF document into an ordered sequence of translation rows.
///
/// `source_filename` is used only for model/language inference, never for
/// content. The call is a pure transform: no I/O, no retained state.
pub fn decompose(
    document_bytes: &[u8],
    source_filename: &str,
) -> Result<DecomposeOutput, ConvertError> {
    decompose_with_options(document_bytes, source_filename, &DecomposeOptions::default())
}

/// [`decompose`] with explicit options.
pub fn decompose_with_options(
    document_bytes: &[u8],
    source_filename: &str,
    options: &DecomposeOptions,
) -> Result<DecomposeOutput, ConvertError> {
    if document_bytes.is_empty() {
        return Err(ConvertError::MissingInput { what: "document" });
    }

    let document = XliffDocument::parse(document_bytes)?;
    let (model_name, language_code) = naming::split_model_and_language(source_filename);
    debug!("Inferred model '{model_name}', language '{language_code}' from '{source_filename}'");

    let records = document
        .unit_entries()
        .into_iter()
        .enumerate()
        .map(|(index, (raw_id, source_text))| {
            TranslationRecord::exported(
                naming::field_id_of(&raw_id),
                source_text,
                language_code.clone(),
                index,
                &options.formula_source_language,
            )
        })
        .collect();

    Ok(DecomposeOutput {
        records,
        model_name,
        language_code,
    })
}
