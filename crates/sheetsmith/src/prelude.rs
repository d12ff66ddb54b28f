//! Prelude module - common imports for sheetsmith users
//!
//! ```rust
//! use sheetsmith::prelude::*;
//! ```

pub use crate::{
    // Entry points
    assemble,
    write_document,

    Alignment,
    // Chart types
    Axis,
    BinaryOperator,
    BorderLineStyle,
    BorderStyle,
    // Error types
    BuildError,

    // Cell types
    CellSpec,
    CellValue,
    // Conditional formatting types
    CfOperator,
    CfRule,
    CfThreshold,
    ChartKind,
    ChartSpec,

    Color,
    ColumnSpec,
    ConditionalFormat,
    Coordinate,

    // Main types
    Assembler,
    DocumentSpec,
    Error,
    Expr,
    FillStyle,
    FontStyle,
    Formula,
    HorizontalAlignment,
    Legend,
    LegendPosition,
    Length,
    NamedRangeSpec,
    NamedStyle,
    NumberFormat,
    OdsArtifact,
    Range,
    RowSpec,
    Series,
    SheetRef,
    SheetSpec,

    // Style types
    Style,
    StyleRef,
    Trendline,

    // Data validation types
    ValidationConfig,
    ValidationOperator,
    ValidationRule,
    ValidationSeverity,
    ValueKind,
    VerticalAlignment,
};
