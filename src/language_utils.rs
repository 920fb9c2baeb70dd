use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for TS language tags
///
/// TS catalogs declare their language as `ll` or `ll_TT` (`fr`, `pt_BR`,
/// `zh_CN`). These helpers split and normalize such tags and match the
/// language part against ISO 639-1 and ISO 639-2 codes.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their 639-2/T form
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(part2t)
}

/// Split a TS language tag into language and territory
///
/// `pt_BR` gives `("pt", Some("BR"))`, `sr@latin` gives `("sr", None)`.
pub fn split_language_tag(tag: &str) -> (String, Option<String>) {
    let tag = tag.trim();
    let tag = tag.split('@').next().unwrap_or(tag);
    let mut parts = tag.split(['_', '-']);

    let language = parts.next().unwrap_or_default().to_lowercase();
    let territory = parts
        .next()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_uppercase());

    (language, territory)
}

/// Normalize a tag to `ll` or `ll_TT`
pub fn normalize_language_tag(tag: &str) -> String {
    match split_language_tag(tag) {
        (language, Some(territory)) => format!("{}_{}", language, territory),
        (language, None) => language,
    }
}

/// Validate the language part of a tag as ISO 639-1 or ISO 639-2
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let (language, _) = split_language_tag(code);

    match language.len() {
        2 if Language::from_639_1(&language).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&language).is_some() => Ok(LanguageCodeType::Part2T),
        3 if bibliographic_to_terminology(&language).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize the language part of a tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let (language, _) = split_language_tag(code);

    if language.len() == 2 {
        if let Some(lang) = Language::from_639_1(&language) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if language.len() == 3 {
        if Language::from_639_3(&language).is_some() {
            return Ok(language);
        }
        if let Some(part2t) = bibliographic_to_terminology(&language) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize the language part to ISO 639-1 when one exists,
/// otherwise to ISO 639-2/T
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&part2t)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or(part2t))
}

/// Check if two tags name the same language, ignoring territory
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for a tag
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
