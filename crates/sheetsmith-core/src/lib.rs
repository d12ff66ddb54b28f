//! # sheetsmith-core
//!
//! Core data structures for the sheetsmith spreadsheet generation toolkit.
//!
//! This crate provides the fundamental types used throughout sheetsmith:
//! - [`Coordinate`], [`Range`], [`SheetRef`] - Cell addressing and
//!   sheet-qualified references
//! - [`CellValue`] and [`Expr`]/[`Formula`] - Cell values and formula
//!   expression trees (emitted as text, never evaluated)
//! - [`Style`] and [`StyleRegistry`] - Cell formatting with session-scoped
//!   interning
//! - [`MergeTracker`] - Merge region bookkeeping
//! - [`DocumentSpec`], [`SheetSpec`], [`RowSpec`], [`ColumnSpec`],
//!   [`CellSpec`] - The immutable specification tree consumed by the
//!   assembler
//!
//! ## Example
//!
//! ```rust
//! use sheetsmith_core::{CellSpec, DocumentSpec, RowSpec, SheetSpec};
//!
//! let doc = DocumentSpec::new().push_sheet(
//!     SheetSpec::new("Budget")
//!         .push_row(RowSpec::from_values(["Item", "Amount"]))
//!         .push_row(RowSpec::from_cells(vec![
//!             CellSpec::new("Rent"),
//!             CellSpec::new(1200.0),
//!         ])),
//! );
//! assert!(doc.check_sheet_names().is_ok());
//! ```

pub mod cell;
pub mod column;
pub mod conditional_format;
pub mod coord;
pub mod document;
pub mod error;
pub mod formula;
pub mod merge;
pub mod named_range;
pub mod reference;
pub mod row;
pub mod sheet;
pub mod style;
pub mod validation;
pub mod value;

// Re-exports for convenience
pub use cell::{CellSpec, StyleRef};
pub use column::ColumnSpec;
pub use conditional_format::{
    CfOperator, CfRule, CfThreshold, ConditionalFormat, IconSetKind, ScaleEntry,
};
pub use coord::{Coordinate, Range, RangeIter};
pub use document::{DocumentMeta, DocumentSpec, NamedStyle};
pub use error::{Error, Result};
pub use formula::{BinaryOperator, Expr, Formula, UnaryOperator};
pub use merge::{Coverage, MergeTracker};
pub use named_range::NamedRangeSpec;
pub use reference::{quote_sheet_name, RefTarget, SheetRef};
pub use row::RowSpec;
pub use sheet::SheetSpec;
pub use validation::{ValidationConfig, ValidationOperator, ValidationRule, ValidationSeverity};
pub use value::{CellValue, ValueKind};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, DateOrder, FillStyle, FontStyle,
    HorizontalAlignment, Length, NumberFormat, Style, StyleHandle, StyleRegistry, Underline,
    VerticalAlignment,
};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
