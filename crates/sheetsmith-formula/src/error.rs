//! Error types for sheetsmith-formula

use thiserror::Error;

/// Result type alias using [`InvalidFormulaError`]
pub type Result<T> = std::result::Result<T, InvalidFormulaError>;

/// Errors raised while translating a formula tree
///
/// The translator performs no evaluation and no arity checking beyond the
/// structural requirements here; a malformed tree fails fast.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidFormulaError {
    /// A function call node has an empty name
    #[error("Function call with empty name")]
    EmptyFunctionName,

    /// A function call node has a name the grammar rejects
    #[error("Invalid function name: {0}")]
    InvalidFunctionName(String),

    /// A function call node has no arguments
    #[error("Function '{0}' called with no arguments")]
    EmptyArguments(String),
}
