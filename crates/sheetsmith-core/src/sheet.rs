//! Sheet specification

use crate::column::ColumnSpec;
use crate::error::{Error, Result};
use crate::reference::SheetRef;
use crate::row::RowSpec;
use crate::MAX_SHEET_NAME_LEN;

/// Specification of one sheet
///
/// Sheets are ordered, immutable descriptions: columns, rows, freeze
/// panes, print area, protection, and the identifiers of attached charts,
/// validations, and conditional formats. Names must be unique within the
/// document (validated at assembly).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSpec {
    /// Sheet name, unique within the document
    pub name: String,
    /// Column specifications, left to right
    pub columns: Vec<ColumnSpec>,
    /// Row specifications, top to bottom
    pub rows: Vec<RowSpec>,
    /// Number of leading columns kept visible when scrolling
    pub freeze_cols: u16,
    /// Number of leading rows kept visible when scrolling
    pub freeze_rows: u32,
    /// Print area (sheet qualifier optional; defaults to this sheet)
    pub print_area: Option<SheetRef>,
    /// Sheet is protected against editing
    pub protected: bool,
    /// Identifiers of attached charts
    pub charts: Vec<String>,
    /// Identifiers of attached data validations
    pub validations: Vec<String>,
    /// Identifiers of attached conditional formats
    pub conditional_formats: Vec<String>,
}

impl SheetSpec {
    /// Create a new sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            freeze_cols: 0,
            freeze_rows: 0,
            print_area: None,
            protected: false,
            charts: Vec::new(),
            validations: Vec::new(),
            conditional_formats: Vec::new(),
        }
    }

    /// Set the columns
    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the rows
    pub fn with_rows(mut self, rows: Vec<RowSpec>) -> Self {
        self.rows = rows;
        self
    }

    /// Append a row
    pub fn push_row(mut self, row: RowSpec) -> Self {
        self.rows.push(row);
        self
    }

    /// Freeze the leading columns/rows
    pub fn with_freeze(mut self, cols: u16, rows: u32) -> Self {
        self.freeze_cols = cols;
        self.freeze_rows = rows;
        self
    }

    /// Set the print area
    pub fn with_print_area(mut self, area: SheetRef) -> Self {
        self.print_area = Some(area);
        self
    }

    /// Protect the sheet
    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Attach a chart by identifier
    pub fn with_chart<S: Into<String>>(mut self, chart_id: S) -> Self {
        self.charts.push(chart_id.into());
        self
    }

    /// Attach a validation by identifier
    pub fn with_validation<S: Into<String>>(mut self, validation_id: S) -> Self {
        self.validations.push(validation_id.into());
        self
    }

    /// Attach a conditional format by identifier
    pub fn with_conditional_format<S: Into<String>>(mut self, format_id: S) -> Self {
        self.conditional_formats.push(format_id.into());
        self
    }

    /// Column spec for a 0-based column index, if declared
    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index)
    }

    /// Widest row in the sheet (number of cells)
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.columns.len())
    }

    /// Validate a sheet name
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(SheetSpec::validate_name("Budget").is_ok());
        assert!(SheetSpec::validate_name("Annual Budget 2024").is_ok());

        assert!(SheetSpec::validate_name("").is_err());
        assert!(SheetSpec::validate_name("Sheet/1").is_err());
        assert!(SheetSpec::validate_name("Sheet:1").is_err());
        assert!(SheetSpec::validate_name("Sheet[1]").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(SheetSpec::validate_name(&long_name).is_err());
    }

    #[test]
    fn test_width() {
        use crate::row::RowSpec;

        let sheet = SheetSpec::new("Data")
            .push_row(RowSpec::from_values(["a", "b"]))
            .push_row(RowSpec::from_values(["a", "b", "c"]));
        assert_eq!(sheet.width(), 3);
    }
}
