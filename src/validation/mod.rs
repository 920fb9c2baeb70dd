/*!
 * Validation module for catalog quality assurance.
 *
 * # Architecture
 *
 * - `structure`: source text, key uniqueness and numerus form checks
 * - `markers`: place marker, accelerator and punctuation checks
 * - `service`: Orchestrates all validators
 */

pub mod markers;
pub mod service;
pub mod structure;

// Re-export main types
pub use service::{
    IssueKind, Severity, ValidationConfig, ValidationIssue, ValidationReport, ValidationService,
    validate,
};
