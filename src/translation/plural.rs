/*!
 * Numerus form selection.
 *
 * Languages are grouped into rule families the way Qt Linguist groups them.
 * Each family knows how many forms a translator must supply and which form a
 * given count selects.
 */

use std::fmt;

use crate::language_utils::{normalize_to_part1_or_part2t, split_language_tag};

/// Plural rule family of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// No plural distinction (Japanese, Chinese, Korean, ...)
    Single,
    /// one / other, `n == 1`
    English,
    /// one / other, `n <= 1`
    French,
    /// one / few (2-4) / other
    Czech,
    Polish,
    /// one / few / many by last digits
    Russian,
    Lithuanian,
    Latvian,
    Romanian,
    /// four forms by `n % 100`
    Slovenian,
    Irish,
    Macedonian,
    Icelandic,
    /// one / paucal / greater paucal / other
    Maltese,
    /// nullar / one / paucal (2-5) / greater paucal (6) / other
    Welsh,
    /// six forms
    Arabic,
}

impl PluralRule {
    /// Rule for a TS language tag such as `ru`, `pt_BR` or `zh_CN`
    ///
    /// Unknown languages use the English rule.
    pub fn for_language(tag: &str) -> Self {
        let (raw_language, territory) = split_language_tag(tag);
        let language = normalize_to_part1_or_part2t(&raw_language).unwrap_or(raw_language);

        match (language.as_str(), territory.as_deref()) {
            ("pt", Some("BR")) => Self::French,
            ("ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "my" | "fa" | "hu" | "tr" | "bo"
            | "dz" | "jv" | "su" | "tt" | "yo" | "za" | "fj" | "bi" | "na" | "om" | "gn", _) => {
                Self::Single
            }
            ("fr" | "hy" | "ln" | "ti" | "wa" | "tl" | "fil" | "br" | "oc", _) => Self::French,
            ("cs" | "sk", _) => Self::Czech,
            ("pl", _) => Self::Polish,
            ("ru" | "uk" | "be" | "sr" | "hr" | "bs", _) => Self::Russian,
            ("lt", _) => Self::Lithuanian,
            ("lv", _) => Self::Latvian,
            ("ro" | "mo", _) => Self::Romanian,
            ("sl", _) => Self::Slovenian,
            ("ga", _) => Self::Irish,
            ("mk", _) => Self::Macedonian,
            ("is", _) => Self::Icelandic,
            ("mt", _) => Self::Maltese,
            ("cy", _) => Self::Welsh,
            ("ar", _) => Self::Arabic,
            _ => Self::English,
        }
    }

    /// Number of numerus forms a translation must provide
    pub fn form_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::English | Self::French | Self::Icelandic => 2,
            Self::Czech
            | Self::Polish
            | Self::Russian
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish
            | Self::Macedonian => 3,
            Self::Slovenian | Self::Maltese => 4,
            Self::Welsh => 5,
            Self::Arabic => 6,
        }
    }

    /// Index of the form selected by `n`
    pub fn form_index(&self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;
        let teens = (10..20).contains(&n100);

        match self {
            Self::Single => 0,
            Self::English => usize::from(n != 1),
            Self::French => usize::from(n > 1),
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !teens {
                    1
                } else {
                    2
                }
            }
            Self::Russian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !teens {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !teens {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Icelandic => usize::from(!(n10 == 1 && n100 != 11)),
            Self::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=10).contains(&n100) {
                    1
                } else if (11..=19).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            Self::Welsh => match n {
                0 => 0,
                1 => 1,
                2..=5 => 2,
                6 => 3,
                _ => 4,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&n100) => 3,
                _ if n100 >= 11 => 4,
                _ => 5,
            },
        }
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({} forms)", self, self.form_count())
    }
}
