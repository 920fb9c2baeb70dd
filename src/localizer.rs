/*!
 * Process-wide translation layer.
 *
 * [`TranslatorStack`] queries installed translators newest first and falls
 * back to the source text. [`Localizer`] owns the active stack, finds
 * catalogs on disk by language and switches languages at runtime. Lookups
 * take a read lock; a switch takes the write lock once the new translator
 * is loaded.
 */

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::app_config::{CatalogConfig, Config, ReleaseConfig};
use crate::errors::LookupError;
use crate::file_utils::FileManager;
use crate::language_utils::{language_codes_match, normalize_language_tag, split_language_tag};
use crate::translation::{Translator, TranslatorCache, replace_percent_n};

/// Upper bound on distinct missed keys kept for reporting
const MAX_RECORDED_MISSES: usize = 1000;

/// Installed translators, most recently installed queried first
#[derive(Debug, Clone, Default)]
pub struct TranslatorStack {
    translators: Vec<Arc<Translator>>,
}

impl TranslatorStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a translator on top of the stack
    pub fn install(&mut self, translator: Arc<Translator>) {
        self.translators.push(translator);
    }

    /// Remove every translator for a language; returns whether any was removed
    pub fn remove(&mut self, language: &str) -> bool {
        let before = self.translators.len();
        self.translators
            .retain(|t| t.language().is_none_or(|l| !same_language_tag(l, language)));
        self.translators.len() != before
    }

    pub fn clear(&mut self) {
        self.translators.clear();
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// First translation found, newest translator first
    pub fn find(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Option<Cow<'_, str>> {
        self.translators
            .iter()
            .rev()
            .find_map(|t| t.translate(context, source, disambiguation, n))
    }

    /// Translation or the source text, with `%n` filled when `n` is given
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Cow<'a, str> {
        if let Some(text) = self.find(context, source, disambiguation, n) {
            return text;
        }
        match n {
            Some(n) => replace_percent_n(source, n),
            None => Cow::Borrowed(source),
        }
    }
}

fn same_language_tag(a: &str, b: &str) -> bool {
    normalize_language_tag(a) == normalize_language_tag(b)
}

/// Hit and miss counters for lookups through a [`Localizer`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupStats {
    pub hits: usize,
    pub misses: usize,
}

impl LookupStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct LookupRecord {
    stats: LookupStats,
    missing: BTreeSet<(String, String)>,
}

#[derive(Debug)]
struct ActiveLanguage {
    language: String,
    stack: TranslatorStack,
}

/// Runtime localization with language switching
pub struct Localizer {
    catalogs: CatalogConfig,
    release: ReleaseConfig,
    source_language: String,
    active: RwLock<ActiveLanguage>,
    cache: TranslatorCache,
    record: Mutex<LookupRecord>,
}

impl Localizer {
    /// Create a localizer in the source language, with nothing installed
    pub fn new(config: &Config) -> Self {
        let source_language = normalize_language_tag(&config.source_language);
        Self {
            catalogs: config.catalogs.clone(),
            release: config.release.clone(),
            active: RwLock::new(ActiveLanguage {
                language: source_language.clone(),
                stack: TranslatorStack::new(),
            }),
            source_language,
            cache: TranslatorCache::new(config.catalogs.cache_translators),
            record: Mutex::new(LookupRecord::default()),
        }
    }

    /// Create a localizer and switch to the configured default language
    pub fn with_default_language(config: &Config) -> Result<Self, LookupError> {
        let localizer = Self::new(config);
        localizer.switch_language(&config.default_language)?;
        Ok(localizer)
    }

    /// Make `tag` the active language
    ///
    /// Looks for `<prefix>_<ll_TT>.ts`, then `<prefix>_<ll>.ts`. When no
    /// catalog exists and the tag names the source language, the source
    /// strings are used as they are.
    pub fn switch_language(&self, tag: &str) -> Result<(), LookupError> {
        let language = normalize_language_tag(tag);

        let stack = match self.find_catalog(&language) {
            Some((catalog_language, path)) => {
                let translator = self.cache.get_or_load(&catalog_language, || {
                    Translator::load(&path, &self.release)
                })?;
                let mut stack = TranslatorStack::new();
                stack.install(translator);
                stack
            }
            None if language_codes_match(&language, &self.source_language) => {
                debug!("No catalog for '{}', using source strings", language);
                TranslatorStack::new()
            }
            None => {
                return Err(LookupError::CatalogNotFound {
                    language,
                    dir: self.catalogs.dir.clone(),
                });
            }
        };

        let mut active = self.active.write();
        active.language = language;
        active.stack = stack;
        info!("Language switched to {}", active.language);
        Ok(())
    }

    /// Catalog file for a language, trying the full tag before the bare language
    fn find_catalog(&self, language: &str) -> Option<(String, PathBuf)> {
        let (bare, territory) = split_language_tag(language);
        let mut candidates = vec![language.to_string()];
        if territory.is_some() {
            candidates.push(bare);
        }

        candidates.into_iter().find_map(|candidate| {
            let path = self.catalogs.dir.join(self.catalogs.file_name(&candidate));
            FileManager::file_exists(&path).then_some((candidate, path))
        })
    }

    /// Active language tag
    pub fn current_language(&self) -> String {
        self.active.read().language.clone()
    }

    /// Translate a plain string
    pub fn tr(&self, context: &str, source: &str) -> String {
        self.tr_n(context, source, None, None)
    }

    /// Translate with optional disambiguation and count
    pub fn tr_n(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> String {
        let active = self.active.read();
        let found = active
            .stack
            .find(context, source, disambiguation, n)
            .map(Cow::into_owned);

        let mut record = self.record.lock();
        match found {
            Some(text) => {
                record.stats.hits += 1;
                text
            }
            None => {
                record.stats.misses += 1;
                // Source-language lookups are expected to miss
                if !active.stack.is_empty() && record.missing.len() < MAX_RECORDED_MISSES {
                    record
                        .missing
                        .insert((context.to_string(), source.to_string()));
                }
                match n {
                    Some(n) => replace_percent_n(source, n).into_owned(),
                    None => source.to_string(),
                }
            }
        }
    }

    /// Languages with a catalog in the configured directory, sorted
    pub fn available_languages(&self) -> Vec<String> {
        available_languages(&self.catalogs)
    }

    pub fn stats(&self) -> LookupStats {
        self.record.lock().stats.clone()
    }

    /// Keys that were looked up without a translation, as (context, source)
    pub fn missing(&self) -> Vec<(String, String)> {
        self.record.lock().missing.iter().cloned().collect()
    }

    pub fn reset_stats(&self) {
        let mut record = self.record.lock();
        record.stats = LookupStats::default();
        record.missing.clear();
    }

    /// Cached translators, for diagnostics
    pub fn cached_translators(&self) -> usize {
        self.cache.len()
    }
}

/// Languages with a catalog in a directory, sorted
pub fn available_languages(catalogs: &CatalogConfig) -> Vec<String> {
    let files = match FileManager::find_files_shallow(&catalogs.dir, "ts") {
        Ok(files) => files,
        Err(e) => {
            warn!("Cannot list catalogs in {:?}: {}", catalogs.dir, e);
            return Vec::new();
        }
    };

    let mut languages: Vec<String> = files
        .iter()
        .filter_map(|path| file_name(path))
        .filter_map(|name| catalogs.language_from_file_name(&name))
        .collect();
    languages.sort();
    languages.dedup();
    languages
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
