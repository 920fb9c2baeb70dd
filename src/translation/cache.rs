/*!
 * Cache of loaded translators.
 *
 * Switching back to a language that was already used must not re-read its
 * catalog, so loaded translators are kept here keyed by language tag.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;
use log::debug;

use crate::translation::core::Translator;

#[derive(Default)]
struct CacheState {
    translators: RwLock<HashMap<String, Arc<Translator>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Translator cache; clones share the same storage and counters
#[derive(Clone)]
pub struct TranslatorCache {
    state: Arc<CacheState>,

    /// When false every lookup misses and nothing is stored
    enabled: bool,
}

impl TranslatorCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: Arc::new(CacheState::default()),
            enabled,
        }
    }

    /// Cached translator for a language, counting the hit or miss
    pub fn get(&self, language: &str) -> Option<Arc<Translator>> {
        if !self.enabled {
            return None;
        }

        let found = self.state.translators.read().get(language).cloned();
        let counter = if found.is_some() { &self.state.hits } else { &self.state.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Translator cache {} for '{}'",
            if found.is_some() { "hit" } else { "miss" },
            language
        );
        found
    }

    pub fn store(&self, language: &str, translator: Arc<Translator>) {
        if !self.enabled {
            return;
        }

        self.state
            .translators
            .write()
            .insert(language.to_string(), translator);
        debug!("Cached translator for '{}'", language);
    }

    /// Return the cached translator or load and cache a new one
    pub fn get_or_load<E, F>(&self, language: &str, load: F) -> Result<Arc<Translator>, E>
    where
        F: FnOnce() -> Result<Translator, E>,
    {
        if let Some(translator) = self.get(language) {
            return Ok(translator);
        }

        let translator = Arc::new(load()?);
        self.store(language, Arc::clone(&translator));
        Ok(translator)
    }

    /// (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.state.hits.load(Ordering::Relaxed);
        let misses = self.state.misses.load(Ordering::Relaxed);
        let rate = match hits + misses {
            0 => 0.0,
            lookups => hits as f64 / lookups as f64,
        };
        (hits, misses, rate)
    }

    /// Drop every cached translator and reset the counters
    pub fn clear(&self) {
        self.state.translators.write().clear();
        self.state.hits.store(0, Ordering::Relaxed);
        self.state.misses.store(0, Ordering::Relaxed);
        debug!("Translator cache cleared");
    }

    pub fn len(&self) -> usize {
        self.state.translators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslatorCache {
    fn default() -> Self {
        Self::new(true)
    }
}
