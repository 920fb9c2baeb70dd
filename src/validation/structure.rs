/*!
 * Structural checks on catalog messages.
 */

use std::collections::HashSet;

use crate::catalog::{Message, TranslationKind, TranslationStatus};
use crate::translation::PluralRule;

use super::service::{IssueKind, ValidationConfig};

/// Checks that depend on the rest of the catalog, such as key uniqueness
pub struct StructureValidator<'a> {
    config: &'a ValidationConfig,
    rule: Option<PluralRule>,
    /// (context, source, comment) of every active message so far; blocks
    /// sharing a context name share one key space
    seen_keys: HashSet<(String, String, String)>,
}

impl<'a> StructureValidator<'a> {
    pub fn new(config: &'a ValidationConfig, rule: Option<PluralRule>) -> Self {
        Self {
            config,
            rule,
            seen_keys: HashSet::new(),
        }
    }

    pub fn check(&mut self, context: &str, message: &Message) -> Vec<IssueKind> {
        let mut issues = Vec::new();

        if message.source.is_empty() {
            issues.push(IssueKind::EmptySource);
        }

        // Obsolete copies may legitimately repeat an active key
        if message.translation.status.is_active() {
            let key = (
                context.to_string(),
                message.source.clone(),
                message.disambiguation().to_string(),
            );
            if !self.seen_keys.insert(key) {
                issues.push(IssueKind::DuplicateMessage);
            }
        }

        if let TranslationKind::Numerus(forms) = &message.translation.kind {
            if forms.is_empty() && message.translation.status == TranslationStatus::Finished {
                issues.push(IssueKind::MissingNumerusForms);
            }

            if let Some(rule) = self.rule.filter(|_| self.config.check_numerus_forms) {
                if !forms.is_empty()
                    && message.translation.status.is_active()
                    && forms.len() != rule.form_count()
                {
                    issues.push(IssueKind::NumerusFormCount {
                        expected: rule.form_count(),
                        found: forms.len(),
                    });
                }
            }
        }

        issues
    }
}
