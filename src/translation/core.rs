/*!
 * Context-qualified lookup table built from a catalog.
 *
 * A [`Translator`] holds only what a running application needs: for every
 * (context, source, comment) key the released text. It is immutable once
 * built and can be shared between threads.
 */

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::app_config::ReleaseConfig;
use crate::catalog::{self, Catalog, Message, TranslationKind, TranslationStatus};
use crate::errors::CatalogError;
use crate::translation::formatting::replace_percent_n;
use crate::translation::plural::PluralRule;

/// Released text of one message
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReleasedText {
    Singular(String),
    Numerus(Vec<String>),
}

/// Messages sharing a source text, distinguished by comment
type CommentVariants = Vec<(String, ReleasedText)>;

/// Lookup table for one language
#[derive(Debug, Clone)]
pub struct Translator {
    language: Option<String>,
    plural_rule: PluralRule,
    contexts: HashMap<String, HashMap<String, CommentVariants>>,
    len: usize,
}

impl Translator {
    /// Build a translator from a parsed catalog
    pub fn from_catalog(catalog: &Catalog, options: &ReleaseConfig) -> Self {
        let plural_rule = catalog
            .language
            .as_deref()
            .map(PluralRule::for_language)
            .unwrap_or(PluralRule::English);

        let mut translator = Self {
            language: catalog.language.clone(),
            plural_rule,
            contexts: HashMap::new(),
            len: 0,
        };

        let mut skipped = 0usize;
        for (context, message) in catalog.messages() {
            match release_text(message, options) {
                Some(text) => translator.insert(context, message, text),
                None => skipped += 1,
            }
        }

        debug!(
            "Built translator for {}: {} messages released, {} skipped",
            translator.language.as_deref().unwrap_or("(undeclared)"),
            translator.len,
            skipped
        );
        translator
    }

    /// Parse a TS file and build a translator from it
    pub fn load<P: AsRef<Path>>(path: P, options: &ReleaseConfig) -> Result<Self, CatalogError> {
        let catalog = catalog::parse_file(path)?;
        Ok(Self::from_catalog(&catalog, options))
    }

    fn insert(&mut self, context: &str, message: &Message, text: ReleasedText) {
        let variants = self
            .contexts
            .entry(context.to_string())
            .or_default()
            .entry(message.source.clone())
            .or_default();

        let comment = message.disambiguation();
        if variants.iter().any(|(existing, _)| existing == comment) {
            warn!(
                "Duplicate message in context '{}': '{}' (comment '{}'), keeping the first",
                context, message.source, comment
            );
            return;
        }

        variants.push((comment.to_string(), text));
        self.len += 1;
    }

    /// Look up a translation
    ///
    /// Tries the exact (context, source, disambiguation) key first and, when
    /// a disambiguation was given, the same source without one. For numerus
    /// messages `n` selects the plural form; `%n` is replaced by `n` in the
    /// returned text.
    pub fn translate(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Option<Cow<'_, str>> {
        let text = self.find(context, source, disambiguation.unwrap_or(""), n)?;
        Some(match n {
            Some(n) => replace_percent_n(text, n),
            None => Cow::Borrowed(text),
        })
    }

    /// Look up a translation, falling back to the source text
    pub fn tr<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Cow<'a, str> {
        if let Some(text) = self.translate(context, source, disambiguation, n) {
            return text;
        }
        match n {
            Some(n) => replace_percent_n(source, n),
            None => Cow::Borrowed(source),
        }
    }

    /// Whether a translation exists for the exact key
    pub fn contains(&self, context: &str, source: &str, disambiguation: Option<&str>) -> bool {
        let comment = disambiguation.unwrap_or("");
        self.contexts
            .get(context)
            .and_then(|sources| sources.get(source))
            .is_some_and(|variants| variants.iter().any(|(c, _)| c == comment))
    }

    fn find(&self, context: &str, source: &str, comment: &str, n: Option<i64>) -> Option<&str> {
        let variants = self.contexts.get(context)?.get(source)?;

        let entry = variants
            .iter()
            .find(|(c, _)| c == comment)
            .or_else(|| {
                if comment.is_empty() {
                    None
                } else {
                    variants.iter().find(|(c, _)| c.is_empty())
                }
            })
            .map(|(_, text)| text)?;

        match entry {
            ReleasedText::Singular(text) => Some(text.as_str()),
            ReleasedText::Numerus(forms) => {
                let wanted = n.map(|n| self.plural_rule.form_index(n)).unwrap_or(0);
                let index = wanted.min(forms.len().checked_sub(1)?);
                let form = forms[index].as_str();
                (!form.is_empty()).then_some(form)
            }
        }
    }

    /// Declared language of the source catalog
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Number of released messages
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Decide what text, if any, a message contributes to the lookup table
fn release_text(message: &Message, options: &ReleaseConfig) -> Option<ReleasedText> {
    let translation = &message.translation;
    match translation.status {
        TranslationStatus::Obsolete | TranslationStatus::Vanished => return None,
        TranslationStatus::Unfinished if !options.include_unfinished => {
            return untranslated_marker(message, options);
        }
        _ => {}
    }

    if translation.is_empty() {
        return untranslated_marker(message, options);
    }

    let text = match &translation.kind {
        TranslationKind::Singular(text) => ReleasedText::Singular(text.clone()),
        TranslationKind::Numerus(forms) => ReleasedText::Numerus(forms.clone()),
    };

    if options.remove_identical && is_identical(&text, &message.source) {
        return None;
    }
    Some(text)
}

/// Prefixed source text for messages without a usable translation
fn untranslated_marker(message: &Message, options: &ReleaseConfig) -> Option<ReleasedText> {
    let prefix = options.mark_untranslated.as_deref()?;
    let marked = format!("{}{}", prefix, message.source);
    Some(if message.is_numerus() {
        ReleasedText::Numerus(vec![marked])
    } else {
        ReleasedText::Singular(marked)
    })
}

fn is_identical(text: &ReleasedText, source: &str) -> bool {
    match text {
        ReleasedText::Singular(text) => text == source,
        ReleasedText::Numerus(forms) => forms.iter().all(|form| form == source),
    }
}
