/*!
 * Tests for language tag utilities
 */

use tscat::language_utils::{
    get_language_name, language_codes_match, normalize_language_tag, normalize_to_part1_or_part2t,
    normalize_to_part2t, split_language_tag, validate_language_code, LanguageCodeType,
};

/// Test that tags split into language and territory
#[test]
fn test_split_language_tag_withTerritory_shouldSplit() {
    assert_eq!(split_language_tag("pt_BR"), ("pt".to_string(), Some("BR".to_string())));
    assert_eq!(split_language_tag("zh-cn"), ("zh".to_string(), Some("CN".to_string())));
    assert_eq!(split_language_tag("FR"), ("fr".to_string(), None));
    assert_eq!(split_language_tag("sr@latin"), ("sr".to_string(), None));
}

/// Test that tags normalize to the TS form
#[test]
fn test_normalize_language_tag_withVariants_shouldUseUnderscore() {
    assert_eq!(normalize_language_tag("pt-br"), "pt_BR");
    assert_eq!(normalize_language_tag(" de "), "de");
    assert_eq!(normalize_language_tag("en_"), "en");
}

/// Test that code types are detected
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnType() {
    assert_eq!(validate_language_code("fr").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("pt_BR").unwrap(), LanguageCodeType::Part1);
}

/// Test that invalid codes are rejected
#[test]
fn test_validate_language_code_withInvalidCode_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("english").is_err());
}

/// Test normalization to three-letter codes
#[test]
fn test_normalize_to_part2t_withCodes_shouldReturnTerminologyCode() {
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("de_AT").unwrap(), "deu");
    assert!(normalize_to_part2t("zz").is_err());
}

/// Test normalization preferring two-letter codes
#[test]
fn test_normalize_to_part1_or_part2t_withCodes_shouldPreferPart1() {
    assert_eq!(normalize_to_part1_or_part2t("fra").unwrap(), "fr");
    assert_eq!(normalize_to_part1_or_part2t("ru").unwrap(), "ru");
}

/// Test that matching ignores territory and code length
#[test]
fn test_language_codes_match_withEquivalentTags_shouldMatch() {
    assert!(language_codes_match("en", "en_US"));
    assert!(language_codes_match("fr", "fra"));
    assert!(!language_codes_match("fr", "de"));
    assert!(!language_codes_match("xx", "xx"));
}

/// Test that language names are resolved
#[test]
fn test_get_language_name_withValidCode_shouldReturnName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("de_DE").unwrap(), "German");
    assert!(get_language_name("qq").is_err());
}
