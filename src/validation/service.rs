/*!
 * Validation service that runs every catalog check.
 *
 * Structural checks guard the lookup invariants (non-empty sources, unique
 * keys, usable numerus forms). Content checks compare each released
 * translation with its source the way Qt Linguist's validators do.
 */

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Message};
use crate::translation::PluralRule;

use super::markers::ContentValidator;
use super::structure::StructureValidator;

/// Configuration for the validation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Compare `&` accelerators between source and translation
    #[serde(default = "default_true")]
    pub check_accelerators: bool,

    /// Compare ending punctuation
    #[serde(default = "default_true")]
    pub check_punctuation: bool,

    /// Compare `%1`..`%99` place markers
    #[serde(default = "default_true")]
    pub check_place_markers: bool,

    /// Compare numerus form counts with the language's plural rule
    #[serde(default = "default_true")]
    pub check_numerus_forms: bool,

    /// Require `%n` in numerus translations when the source has it
    #[serde(default = "default_true")]
    pub check_count_marker: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_accelerators: true,
            check_punctuation: true,
            check_place_markers: true,
            check_numerus_forms: true,
            check_count_marker: true,
        }
    }
}

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What is wrong with a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    EmptySource,
    DuplicateMessage,
    MissingNumerusForms,
    NumerusFormCount { expected: usize, found: usize },
    PlaceMarkers { source: Vec<u32>, translation: Vec<u32> },
    Accelerator { in_source: bool },
    Punctuation { source: Option<char>, translation: Option<char> },
    CountMarker,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::EmptySource | IssueKind::DuplicateMessage | IssueKind::MissingNumerusForms => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::EmptySource => write!(f, "message has an empty source text"),
            IssueKind::DuplicateMessage => {
                write!(f, "source text and comment already used in this context")
            }
            IssueKind::MissingNumerusForms => {
                write!(f, "finished numerus message has no numerus forms")
            }
            IssueKind::NumerusFormCount { expected, found } => {
                write!(f, "expected {} numerus forms, found {}", expected, found)
            }
            IssueKind::PlaceMarkers { source, translation } => write!(
                f,
                "place markers differ: source {:?}, translation {:?}",
                source, translation
            ),
            IssueKind::Accelerator { in_source: true } => {
                write!(f, "accelerator missing from translation")
            }
            IssueKind::Accelerator { in_source: false } => {
                write!(f, "translation has an accelerator the source lacks")
            }
            IssueKind::Punctuation { source, translation } => write!(
                f,
                "ending punctuation differs: source {:?}, translation {:?}",
                source, translation
            ),
            IssueKind::CountMarker => write!(f, "no numerus form contains %n"),
        }
    }
}

/// One finding, located by context and source text
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub context: String,
    pub source: String,
    /// First source location of the message, if any
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn new(context: &str, message: &Message, kind: IssueKind) -> Self {
        let location = message.locations.first().map(|l| match l.line {
            Some(line) => format!("{}:{}", l.filename, line),
            None => l.filename.clone(),
        });
        Self {
            severity: kind.severity(),
            kind,
            context: context.to_string(),
            source: message.source.clone(),
            location,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: \"{}\"", self.severity, self.context, self.source)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        write!(f, ": {}", self.kind)
    }
}

/// All issues found in one catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub messages_checked: usize,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// No errors; warnings are allowed
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// No issues at all
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs structural and content checks over a catalog
pub struct ValidationService {
    config: ValidationConfig,
}

impl ValidationService {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a catalog
    pub fn validate(&self, catalog: &Catalog) -> ValidationReport {
        let rule = catalog.language.as_deref().map(PluralRule::for_language);
        let mut report = ValidationReport::default();

        let mut structure = StructureValidator::new(&self.config, rule);
        let content = ContentValidator::new(&self.config);

        for context in &catalog.contexts {
            for message in &context.messages {
                report.messages_checked += 1;

                for kind in structure.check(&context.name, message) {
                    report.issues.push(ValidationIssue::new(&context.name, message, kind));
                }
                for kind in content.check(message) {
                    report.issues.push(ValidationIssue::new(&context.name, message, kind));
                }
            }
        }

        debug!(
            "Validated {} messages: {} errors, {} warnings",
            report.messages_checked,
            report.errors().count(),
            report.warnings().count()
        );
        report
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Validate a catalog with the given checks
pub fn validate(catalog: &Catalog, config: &ValidationConfig) -> ValidationReport {
    ValidationService::new(config.clone()).validate(catalog)
}
