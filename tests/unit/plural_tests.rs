/*!
 * Tests for numerus form selection
 */

use tscat::translation::PluralRule;

/// Test that common languages map to their rule family
#[test]
fn test_for_language_withCommonLanguages_shouldPickFamily() {
    assert_eq!(PluralRule::for_language("en"), PluralRule::English);
    assert_eq!(PluralRule::for_language("de"), PluralRule::English);
    assert_eq!(PluralRule::for_language("fr"), PluralRule::French);
    assert_eq!(PluralRule::for_language("ja"), PluralRule::Single);
    assert_eq!(PluralRule::for_language("zh_CN"), PluralRule::Single);
    assert_eq!(PluralRule::for_language("ru"), PluralRule::Russian);
    assert_eq!(PluralRule::for_language("uk"), PluralRule::Russian);
    assert_eq!(PluralRule::for_language("pl"), PluralRule::Polish);
    assert_eq!(PluralRule::for_language("cs"), PluralRule::Czech);
    assert_eq!(PluralRule::for_language("ar"), PluralRule::Arabic);
}

/// Test that Brazilian Portuguese uses the French rule while Portuguese does not
#[test]
fn test_for_language_withPortugueseVariants_shouldDiffer() {
    assert_eq!(PluralRule::for_language("pt_BR"), PluralRule::French);
    assert_eq!(PluralRule::for_language("pt-br"), PluralRule::French);
    assert_eq!(PluralRule::for_language("pt_PT"), PluralRule::English);
}

/// Test that three-letter codes are normalized before matching
#[test]
fn test_for_language_withThreeLetterCodes_shouldNormalize() {
    assert_eq!(PluralRule::for_language("fra"), PluralRule::French);
    assert_eq!(PluralRule::for_language("rus"), PluralRule::Russian);
}

/// Test that unknown tags use the English rule
#[test]
fn test_for_language_withUnknownTag_shouldDefaultToEnglish() {
    assert_eq!(PluralRule::for_language("xx"), PluralRule::English);
    assert_eq!(PluralRule::for_language(""), PluralRule::English);
}

/// Test the English and French boundaries around one
#[test]
fn test_form_index_withEnglishAndFrench_shouldSplitAtOne() {
    assert_eq!(PluralRule::English.form_index(0), 1);
    assert_eq!(PluralRule::English.form_index(1), 0);
    assert_eq!(PluralRule::English.form_index(2), 1);
    assert_eq!(PluralRule::French.form_index(0), 0);
    assert_eq!(PluralRule::French.form_index(1), 0);
    assert_eq!(PluralRule::French.form_index(2), 1);
}

/// Test that negative counts use their magnitude
#[test]
fn test_form_index_withNegativeCount_shouldUseMagnitude() {
    assert_eq!(PluralRule::English.form_index(-1), 0);
    assert_eq!(PluralRule::Russian.form_index(-3), 1);
}

/// Test the Polish rule, which differs from Russian for 21
#[test]
fn test_form_index_withPolishCounts_shouldFollowRule() {
    assert_eq!(PluralRule::Polish.form_index(1), 0);
    assert_eq!(PluralRule::Polish.form_index(3), 1);
    assert_eq!(PluralRule::Polish.form_index(13), 2);
    assert_eq!(PluralRule::Polish.form_index(21), 2);
    assert_eq!(PluralRule::Polish.form_index(22), 1);
}

/// Test the Czech rule
#[test]
fn test_form_index_withCzechCounts_shouldFollowRule() {
    assert_eq!(PluralRule::Czech.form_index(1), 0);
    assert_eq!(PluralRule::Czech.form_index(4), 1);
    assert_eq!(PluralRule::Czech.form_index(5), 2);
    assert_eq!(PluralRule::Czech.form_index(22), 2);
}

/// Test the Slovenian rule on hundreds
#[test]
fn test_form_index_withSlovenianCounts_shouldUseLastTwoDigits() {
    assert_eq!(PluralRule::Slovenian.form_index(101), 0);
    assert_eq!(PluralRule::Slovenian.form_index(102), 1);
    assert_eq!(PluralRule::Slovenian.form_index(104), 2);
    assert_eq!(PluralRule::Slovenian.form_index(105), 3);
}

/// Test that every family declares the expected number of forms
#[test]
fn test_form_count_withFamilies_shouldMatchLinguist() {
    assert_eq!(PluralRule::Single.form_count(), 1);
    assert_eq!(PluralRule::English.form_count(), 2);
    assert_eq!(PluralRule::Russian.form_count(), 3);
    assert_eq!(PluralRule::Slovenian.form_count(), 4);
    assert_eq!(PluralRule::Arabic.form_count(), 6);
}

/// Test the display form used in reports
#[test]
fn test_display_withRule_shouldShowFormCount() {
    assert_eq!(PluralRule::Russian.to_string(), "Russian (3 forms)");
}
