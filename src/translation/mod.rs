/*!
 * Runtime translation lookup.
 *
 * - `core`: the per-language lookup table built from a catalog
 * - `plural`: numerus form selection by language
 * - `formatting`: place marker filling and `%n` substitution
 * - `cache`: loaded translators keyed by language
 */

// Re-export main types for easier usage
pub use self::cache::TranslatorCache;
pub use self::core::Translator;
pub use self::formatting::{fill_args, place_markers, replace_percent_n};
pub use self::plural::PluralRule;

// Submodules
pub mod cache;
pub mod core;
pub mod formatting;
pub mod plural;
