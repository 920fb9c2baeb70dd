/*!
 * Content checks comparing a translation with its source.
 *
 * These mirror the validators a translator sees in Qt Linguist: accelerators,
 * ending punctuation, place markers and the `%n` count marker. Messages that
 * are not finished or have no text are skipped.
 */

use crate::catalog::{Message, TranslationKind, TranslationStatus};
use crate::translation::formatting::{has_count_marker, place_markers};

use super::service::{IssueKind, ValidationConfig};

/// Per-message content validator
pub struct ContentValidator<'a> {
    config: &'a ValidationConfig,
}

impl<'a> ContentValidator<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, message: &Message) -> Vec<IssueKind> {
        let translation = &message.translation;
        if translation.status != TranslationStatus::Finished || translation.is_empty() {
            return Vec::new();
        }

        let mut issues = Vec::new();
        let texts: Vec<&str> = match &translation.kind {
            TranslationKind::Singular(text) => vec![text.as_str()],
            TranslationKind::Numerus(forms) => forms
                .iter()
                .map(String::as_str)
                .filter(|f| !f.is_empty())
                .collect(),
        };

        for text in &texts {
            if self.config.check_place_markers {
                if let Some(issue) = check_place_markers(&message.source, text) {
                    push_unique(&mut issues, issue);
                }
            }
            if self.config.check_accelerators {
                if let Some(issue) = check_accelerator(&message.source, text) {
                    push_unique(&mut issues, issue);
                }
            }
            if self.config.check_punctuation {
                if let Some(issue) = check_punctuation(&message.source, text) {
                    push_unique(&mut issues, issue);
                }
            }
        }

        if self.config.check_count_marker
            && message.is_numerus()
            && has_count_marker(&message.source)
            && !texts.iter().any(|t| has_count_marker(t))
        {
            issues.push(IssueKind::CountMarker);
        }

        issues
    }
}

fn push_unique(issues: &mut Vec<IssueKind>, issue: IssueKind) {
    if !issues.contains(&issue) {
        issues.push(issue);
    }
}

/// Place marker sets must match
pub fn check_place_markers(source: &str, translation: &str) -> Option<IssueKind> {
    let in_source = place_markers(source);
    let in_translation = place_markers(translation);
    (in_source != in_translation).then(|| IssueKind::PlaceMarkers {
        source: in_source.into_iter().collect(),
        translation: in_translation.into_iter().collect(),
    })
}

/// Both sides must agree on having a keyboard accelerator
pub fn check_accelerator(source: &str, translation: &str) -> Option<IssueKind> {
    let in_source = has_accelerator(source);
    (in_source != has_accelerator(translation)).then_some(IssueKind::Accelerator { in_source })
}

/// Ending punctuation must match, treating full-width forms as equal
pub fn check_punctuation(source: &str, translation: &str) -> Option<IssueKind> {
    let source_end = ending_punctuation(source);
    let translation_end = ending_punctuation(translation);
    (source_end != translation_end).then_some(IssueKind::Punctuation {
        source: source_end,
        translation: translation_end,
    })
}

/// `&` followed by a mnemonic character; `&&` is a literal ampersand
pub fn has_accelerator(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            continue;
        }
        match chars.peek() {
            Some('&') => {
                chars.next();
            }
            Some(next) if !next.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

fn ending_punctuation(text: &str) -> Option<char> {
    let last = text.trim_end().chars().last()?;
    let normalized = match last {
        '。' | '．' => '.',
        '！' => '!',
        '？' => '?',
        '：' => ':',
        other => other,
    };
    matches!(normalized, '.' | '!' | '?' | ':' | '…').then_some(normalized)
}
