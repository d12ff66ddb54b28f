//! # sheetsmith
//!
//! A Rust library for generating OpenDocument spreadsheets (.ods) from a
//! structured document model.
//!
//! Sheetsmith separates *describing* a spreadsheet from *materializing*
//! it: callers build an immutable specification tree (sheets, columns,
//! rows, cells, formulas, merges, named ranges, charts, conditional
//! formats, validations) and one synchronous build turns it into a
//! standards-compliant container file. Formulas are structured trees
//! emitted as text - nothing is ever evaluated - and builds are
//! all-or-nothing: an invalid document fails before any output exists.
//!
//! ## Example
//!
//! ```no_run
//! use sheetsmith::prelude::*;
//!
//! let doc = DocumentSpec::new().push_sheet(
//!     SheetSpec::new("Budget")
//!         .push_row(RowSpec::from_cells(vec![
//!             CellSpec::new("Item").with_style_name("Header"),
//!             CellSpec::new("Amount").with_style_name("Header"),
//!         ]))
//!         .push_row(RowSpec::from_values(["Rent", "1200"])),
//! );
//!
//! write_document(&doc, &[], "budget.ods").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use sheetsmith_core::{
    Alignment,
    BinaryOperator,
    BorderEdge,
    BorderLineStyle,
    BorderStyle,
    // Cell types
    CellSpec,
    CellValue,
    // Conditional formatting types
    CfOperator,
    CfRule,
    CfThreshold,
    Color,
    ColumnSpec,
    ConditionalFormat,
    Coordinate,
    // Main types
    DocumentMeta,
    DocumentSpec,
    // Error types
    Error,
    Expr,
    FillStyle,
    FontStyle,
    Formula,
    HorizontalAlignment,
    IconSetKind,
    Length,
    MergeTracker,
    NamedRangeSpec,
    NamedStyle,
    NumberFormat,
    Range,
    RefTarget,
    Result,
    RowSpec,
    ScaleEntry,
    SheetRef,
    SheetSpec,
    // Style types
    Style,
    StyleHandle,
    StyleRef,
    StyleRegistry,
    UnaryOperator,
    Underline,
    // Data validation types
    ValidationConfig,
    ValidationOperator,
    ValidationRule,
    ValidationSeverity,
    ValueKind,
    VerticalAlignment,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export formula translation
pub use sheetsmith_formula::{InvalidFormulaError, Translator};

// Re-export chart types
pub use sheetsmith_chart::{Axis, ChartKind, ChartSpec, Legend, LegendPosition, Series, Trendline};

// Re-export the assembler
pub use sheetsmith_ods::{assemble, Assembler, BuildError, BuildResult, OdsArtifact};

use std::path::Path;

/// Assemble a document and write the artifact to a path
///
/// Convenience over [`Assembler::new`] + [`Assembler::assemble`] +
/// [`OdsArtifact::write_to`]. The write is atomic; on error no file
/// exists at the path.
pub fn write_document<P: AsRef<Path>>(
    document: &DocumentSpec,
    charts: &[ChartSpec],
    path: P,
) -> BuildResult<()> {
    assemble(document, charts)?.write_to(path)
}
