/*!
 * Placeholder handling for UI strings.
 *
 * UI strings carry numbered place markers (`%1` .. `%99`, localized as
 * `%L1`) filled in at runtime, and numerus strings carry `%n` for the count.
 */

use std::borrow::Cow;
use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Numbered place marker, optionally localized
static PLACE_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%L?([1-9][0-9]?)").expect("Invalid place marker regex")
});

/// Count marker in numerus strings
static PERCENT_N_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%L?n").expect("Invalid count marker regex")
});

/// Numbers of all place markers in the text
pub fn place_markers(text: &str) -> BTreeSet<u32> {
    PLACE_MARKER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Whether the text uses the count marker
pub fn has_count_marker(text: &str) -> bool {
    PERCENT_N_REGEX.is_match(text)
}

/// Fill place markers the way `QString::arg` does
///
/// The first argument replaces every occurrence of the lowest-numbered
/// marker, the second the next lowest, and so on. Markers left without an
/// argument stay in the text.
pub fn fill_args(text: &str, args: &[&str]) -> String {
    let markers: Vec<u32> = place_markers(text).into_iter().collect();
    if markers.is_empty() || args.is_empty() {
        return text.to_string();
    }

    PLACE_MARKER_REGEX
        .replace_all(text, |caps: &Captures| {
            let number: u32 = caps[1].parse().unwrap_or(0);
            markers
                .iter()
                .position(|&m| m == number)
                .and_then(|slot| args.get(slot))
                .map(|arg| arg.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Replace `%n` and `%Ln` with the count
pub fn replace_percent_n(text: &str, n: i64) -> Cow<'_, str> {
    if !text.contains('%') {
        return Cow::Borrowed(text);
    }
    PERCENT_N_REGEX.replace_all(text, n.to_string().as_str())
}
