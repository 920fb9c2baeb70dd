/*!
 * Translation progress statistics.
 */

use std::fmt;

use serde::Serialize;

use crate::catalog::model::{Catalog, Context, Message, TranslationStatus};

/// Message counts for one context or a whole catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageCounts {
    pub finished: usize,
    pub unfinished: usize,
    /// Active messages with no text at all
    pub empty: usize,
    pub obsolete: usize,
    pub vanished: usize,
    pub numerus: usize,
}

impl MessageCounts {
    fn record(&mut self, message: &Message) {
        match message.translation.status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Obsolete => self.obsolete += 1,
            TranslationStatus::Vanished => self.vanished += 1,
        }
        if message.translation.status.is_active() && message.translation.is_empty() {
            self.empty += 1;
        }
        if message.is_numerus() {
            self.numerus += 1;
        }
    }

    fn add(&mut self, other: &MessageCounts) {
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.empty += other.empty;
        self.obsolete += other.obsolete;
        self.vanished += other.vanished;
        self.numerus += other.numerus;
    }

    /// Messages still present in the sources
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Share of active messages marked finished, 1.0 for an empty set
    pub fn completion(&self) -> f64 {
        let active = self.active();
        if active == 0 {
            1.0
        } else {
            self.finished as f64 / active as f64
        }
    }
}

/// Counts for a single context
#[derive(Debug, Clone, Serialize)]
pub struct ContextStats {
    pub name: String,
    pub counts: MessageCounts,
}

/// Per-context and total statistics for a catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub language: Option<String>,
    pub contexts: Vec<ContextStats>,
    pub total: MessageCounts,
}

impl CatalogStats {
    /// Count every message in the catalog
    pub fn collect(catalog: &Catalog) -> Self {
        let contexts: Vec<ContextStats> = catalog.contexts.iter().map(context_stats).collect();

        let mut total = MessageCounts::default();
        for context in &contexts {
            total.add(&context.counts);
        }

        Self {
            language: catalog.language.clone(),
            contexts,
            total,
        }
    }
}

fn context_stats(context: &Context) -> ContextStats {
    let mut counts = MessageCounts::default();
    for message in &context.messages {
        counts.record(message);
    }
    ContextStats {
        name: context.name.clone(),
        counts,
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Language: {}",
            self.language.as_deref().unwrap_or("(undeclared)")
        )?;
        writeln!(
            f,
            "{} finished, {} unfinished ({} empty), {} obsolete, {} vanished, {} numerus",
            self.total.finished,
            self.total.unfinished,
            self.total.empty,
            self.total.obsolete,
            self.total.vanished,
            self.total.numerus
        )?;
        write!(f, "Completion: {:.1}%", self.total.completion() * 100.0)
    }
}
