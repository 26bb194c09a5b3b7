use std::path::Path;

use crate::language_utils;

// @module: Identifier and filename decomposition rules

/// Model name used when a filename carries no usable stem
pub const FALLBACK_MODEL_NAME: &str = "MODEL";

/// Extract the application-level field id from a trans-unit id.
///
/// Ids are structured `prefix#field_id@suffix`. When both separators are
/// present the field id is the substring after the first `#`, cut at the next
/// `#` or `@`; otherwise the raw id is the field id unchanged.
///
/// `"Report#customerName@v2"` → `"customerName"`, `"SimpleField"` → `"SimpleField"`.
pub fn field_id_of(raw_id: &str) -> &str {
    let Some(hash) = raw_id.find('#') else {
        return raw_id;
    };
    if !raw_id.contains('@') {
        return raw_id;
    }

    let rest = &raw_id[hash + 1..];
    let segment = match rest.find('#') {
        Some(next_hash) => &rest[..next_hash],
        None => rest,
    };
    match segment.find('@') {
        Some(at) => &segment[..at],
        None => segment,
    }
}

/// Infer `(model_name, language_code)` from an upload filename.
///
/// The stem (filename without extension) is split on `_`. With at least two
/// segments and a final segment of exactly two characters, that segment is the
/// upper-cased language code and the remaining segments joined by `_` form the
/// model name. Otherwise the language code is empty and the whole stem is the
/// model name. An empty stem falls back to [`FALLBACK_MODEL_NAME`].
///
/// `"AM_REPORT_DE.xlf"` → `("AM_REPORT", "DE")`, `"Report.xlf"` → `("Report", "")`.
pub fn split_model_and_language(filename: &str) -> (String, String) {
    let stem = Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.is_empty() {
        return (FALLBACK_MODEL_NAME.to_string(), String::new());
    }

    let segments: Vec<&str> = stem.split('_').collect();
    match segments.split_last() {
        Some((last, rest)) if !rest.is_empty() && language_utils::is_two_char_code(last) => {
            (rest.join("_"), last.to_uppercase())
        }
        _ => (stem, String::new()),
    }
}
