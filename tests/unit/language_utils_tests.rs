/*!
 * Tests for language utility functions
 */

use xlifftab::language_utils::{
    is_known_language, is_two_char_code, language_codes_match, language_name,
};

/// The two-character check is purely positional, not an ISO lookup
#[test]
fn test_is_two_char_code_withVariousSegments_shouldCheckLengthOnly() {
    assert!(is_two_char_code("de"));
    assert!(is_two_char_code("DE"));
    assert!(is_two_char_code("zz"));
    assert!(is_two_char_code("99"));

    assert!(!is_two_char_code(""));
    assert!(!is_two_char_code("d"));
    assert!(!is_two_char_code("deu"));
}

/// Multi-byte characters count as characters, not bytes
#[test]
fn test_is_two_char_code_withMultibyteSegment_shouldCountCharacters() {
    assert!(is_two_char_code("ÜÖ"));
    assert!(!is_two_char_code("ÜÖX"));
}

#[test]
fn test_is_known_language_withIsoCodes_shouldRecognizeThem() {
    assert!(is_known_language("de"));
    assert!(is_known_language("EN"));
    assert!(is_known_language(" fr "));

    assert!(!is_known_language("xx"));
    assert!(!is_known_language("99"));
    assert!(!is_known_language(""));
}

#[test]
fn test_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(language_name("de").as_deref(), Some("German"));
    assert_eq!(language_name("FR").as_deref(), Some("French"));
    assert_eq!(language_name("xx"), None);
}

#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("en", "EN"));
    assert!(language_codes_match(" de ", "de"));

    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("e", "en"));
    assert!(!language_codes_match("xx", "xx"));
}
