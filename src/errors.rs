/*!
 * Error types for the tscat application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a TS catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The XML itself is malformed
    #[error("XML error at {line}:{column}: {message}")]
    Xml {
        /// 1-based line of the offending input
        line: usize,
        /// 1-based column of the offending input
        column: usize,
        /// Message from the XML reader
        message: String,
    },

    /// Document root is not `<TS>`
    #[error("Expected <TS> root element, found <{0}>")]
    UnexpectedRoot(String),

    /// A required child element is absent
    #[error("Missing <{element}> element near line {line}")]
    MissingElement {
        /// Name of the missing element
        element: &'static str,
        /// Line of the enclosing element
        line: usize,
    },

    /// A required attribute is absent
    #[error("Missing '{attribute}' attribute on <{element}> near line {line}")]
    MissingAttribute {
        /// Element carrying the attribute
        element: &'static str,
        /// Name of the attribute
        attribute: &'static str,
        /// Line of the element
        line: usize,
    },

    /// `<byte value="..."/>` does not encode a character
    #[error("Invalid byte value '{value}' near line {line}")]
    InvalidByte {
        /// Raw attribute value
        value: String,
        /// Line of the element
        line: usize,
    },

    /// A numerus message has a translation without any numerus form
    #[error("Numerus message '{source_text}' has no <numerusform> entries (line {line})")]
    EmptyNumerus {
        /// Source text of the message
        source_text: String,
        /// Line of the message
        line: usize,
    },

    /// Serialization of a catalog failed
    #[error("Failed to write catalog: {0}")]
    Write(String),

    /// Underlying file error
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// The I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading translators for lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// No catalog exists for the requested language
    #[error("No catalog for language '{language}' in {dir:?}")]
    CatalogNotFound {
        /// Requested language tag
        language: String,
        /// Directory that was searched
        dir: PathBuf,
    },

    /// The catalog exists but could not be read
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from catalog handling
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from translator loading
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
