/*!
 * Qt Linguist TS catalogs: model, reader, writer and statistics.
 */

pub mod model;
pub mod parser;
pub mod stats;
pub mod writer;

pub use model::{
    Catalog, Context, Location, Message, Translation, TranslationKind, TranslationStatus,
};
pub use parser::{parse_file, parse_str};
pub use stats::{CatalogStats, MessageCounts};
