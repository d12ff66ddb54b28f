//! Error types for sheetsmith-ods

use thiserror::Error;

/// Result type alias using [`BuildError`]
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Errors that abort a build
///
/// Every error is raised synchronously by the phase that detects it, and
/// no artifact exists until the whole build succeeds.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Model-level error (references, merges, styles, names)
    #[error(transparent)]
    Core(#[from] sheetsmith_core::Error),

    /// Malformed formula tree
    #[error(transparent)]
    Formula(#[from] sheetsmith_formula::InvalidFormulaError),

    /// Structurally invalid chart specification
    #[error(transparent)]
    Chart(#[from] sheetsmith_chart::ChartError),

    /// A cross-reference points at something that was never declared
    #[error("Unresolved {kind} reference: {reference}")]
    UnresolvedReference {
        /// What kind of thing held the reference (sheet, chart, ...)
        kind: &'static str,
        /// The reference that failed to resolve
        reference: String,
    },

    /// Two definitions share an identifier
    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateIdentifier { kind: &'static str, id: String },

    /// Internal phase-ordering misuse
    #[error("Assembler phase out of order: expected {expected}, in {actual}")]
    PhaseOrder {
        expected: &'static str,
        actual: &'static str,
    },

    /// I/O error writing the artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
