/*!
 * In-memory model of a Qt Linguist TS catalog.
 *
 * A catalog is a list of contexts, each holding the messages declared by one
 * UI class or dialog. The model keeps everything the TS format carries so a
 * catalog can be written back without loss.
 */

use serde::{Deserialize, Serialize};

/// TS format version written by current lupdate
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// A complete TS catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Format version from the `version` attribute
    pub version: String,

    /// Target language (e.g. `fr`, `pt_BR`), if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Language of the source strings, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,

    /// Names of catalogs this one depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Context blocks in document order
    pub contexts: Vec<Context>,
}

impl Catalog {
    /// Create an empty catalog for a language
    pub fn new(language: Option<String>) -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language,
            source_language: None,
            dependencies: Vec::new(),
            contexts: Vec::new(),
        }
    }

    /// Find the first context block with the given name
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Iterate over all messages together with their context name
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c.name.as_str(), m)))
    }

    /// Total number of messages across all contexts
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }
}

/// Messages belonging to one UI class or dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context name, usually the class name
    pub name: String,

    /// Optional context-level comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Messages in document order
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
        }
    }
}

/// A single translation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Optional message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Where the string is used in the original sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    /// Original UI text, the lookup key
    pub source: String,

    /// Source text before the last fuzzy merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,

    /// Disambiguation comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Disambiguation before the last fuzzy merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,

    /// Developer note for translators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,

    /// Translator's own note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,

    /// The localized text
    pub translation: Translation,
}

impl Message {
    /// Create a finished singular message
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: None,
            locations: Vec::new(),
            source: source.into(),
            old_source: None,
            comment: None,
            old_comment: None,
            extra_comment: None,
            translator_comment: None,
            translation: Translation::singular(translation),
        }
    }

    /// Create a finished numerus message
    pub fn numerus(source: impl Into<String>, forms: Vec<String>) -> Self {
        let mut message = Self::new(source, String::new());
        message.translation = Translation::numerus(forms);
        message
    }

    /// Builder-style setter for the disambiguation comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder-style setter for the translation status
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.translation.status = status;
        self
    }

    /// Builder-style setter for a location
    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location {
            filename: filename.into(),
            line: Some(line),
        });
        self
    }

    /// Whether the message requires a numerus form selection
    pub fn is_numerus(&self) -> bool {
        matches!(self.translation.kind, TranslationKind::Numerus(_))
    }

    /// Comment used as lookup key, with `None` and `""` treated alike
    pub fn disambiguation(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Singular text, or the first numerus form
    pub fn effective_text(&self) -> &str {
        match &self.translation.kind {
            TranslationKind::Singular(text) => text,
            TranslationKind::Numerus(forms) => forms.first().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Source reference of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path relative to the catalog
    pub filename: String,

    /// Absolute line number, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Translation text plus its review status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub kind: TranslationKind,
    pub status: TranslationStatus,
}

impl Translation {
    pub fn singular(text: impl Into<String>) -> Self {
        Self {
            kind: TranslationKind::Singular(text.into()),
            status: TranslationStatus::Finished,
        }
    }

    pub fn numerus(forms: Vec<String>) -> Self {
        Self {
            kind: TranslationKind::Numerus(forms),
            status: TranslationStatus::Finished,
        }
    }

    /// True when no text has been entered at all
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            TranslationKind::Singular(text) => text.is_empty(),
            TranslationKind::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// Singular text or plural forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    Singular(String),
    Numerus(Vec<String>),
}

/// Review status from the `type` attribute of `<translation>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// No `type` attribute
    #[default]
    Finished,
    Unfinished,
    /// Marked obsolete by the translator or an older lupdate
    Obsolete,
    /// No longer found in the sources on the last update
    Vanished,
}

impl TranslationStatus {
    /// Value of the `type` attribute, `None` for finished entries
    pub fn as_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
            Self::Vanished => Some("vanished"),
        }
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::Finished),
            "unfinished" => Some(Self::Unfinished),
            "obsolete" => Some(Self::Obsolete),
            "vanished" => Some(Self::Vanished),
            _ => None,
        }
    }

    /// Obsolete and vanished entries are kept only for reference
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}
