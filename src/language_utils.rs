use isolang::Language;

/// Language utilities for the two-letter codes carried on table rows
///
/// Filename inference and row handling only care that a code is exactly two
/// characters; ISO 639-1 lookup is used on top of that for diagnostics, so an
/// unrecognized code degrades to a warning, never an error.
/// Whether a segment qualifies as a language code position-wise: exactly two
/// characters, nothing more.
pub fn is_two_char_code(code: &str) -> bool {
    code.chars().count() == 2
}

/// Whether the code resolves to a known ISO 639-1 language
pub fn is_known_language(code: &str) -> bool {
    Language::from_639_1(&code.trim().to_lowercase()).is_some()
}

/// English display name for a two-letter code, for log output
pub fn language_name(code: &str) -> Option<String> {
    Language::from_639_1(&code.trim().to_lowercase()).map(|language| language.to_name().to_string())
}

/// Check if two language codes refer to the same ISO 639-1 language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (
        Language::from_639_1(&code1.trim().to_lowercase()),
        Language::from_639_1(&code2.trim().to_lowercase()),
    ) {
        (Some(first), Some(second)) => first == second,
        _ => false,
    }
}
