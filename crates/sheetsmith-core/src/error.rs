//! Error types for sheetsmith-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetsmith-core
#[derive(Debug, Error)]
pub enum Error {
    /// Bad coordinate or range syntax
    #[error("Malformed reference: {0}")]
    MalformedReference(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A merge declaration intersects an existing region
    #[error("Merge region on sheet '{sheet}' overlaps existing region at cell {cell}")]
    MergeOverlap { sheet: String, cell: String },

    /// A covered (non-anchor) cell declares a non-empty value
    #[error("Cell {cell} on sheet '{sheet}' is covered by a merge region but declares a value")]
    CoveredCellValue { sheet: String, cell: String },

    /// A named style was requested with an incompatible definition
    #[error("Style '{name}' is already registered with a different definition")]
    StyleConflict { name: String },

    /// Invalid named-range or style name
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Duplicate named-range name
    #[error("Name already defined: {0}")]
    DuplicateName(String),
}
