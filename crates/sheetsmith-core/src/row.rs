//! Row specification

use crate::cell::{CellSpec, StyleRef};
use crate::style::Length;

/// One row of cells
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowSpec {
    /// Cells, left to right
    pub cells: Vec<CellSpec>,
    /// Row-level style
    pub style: Option<StyleRef>,
    /// Explicit row height (None = default)
    pub height: Option<Length>,
}

impl RowSpec {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells
    pub fn from_cells(cells: Vec<CellSpec>) -> Self {
        Self {
            cells,
            style: None,
            height: None,
        }
    }

    /// Create a row of plain values
    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<crate::value::CellValue>,
        I: IntoIterator<Item = V>,
    {
        Self::from_cells(values.into_iter().map(CellSpec::new).collect())
    }

    /// Append a cell
    pub fn push(mut self, cell: CellSpec) -> Self {
        self.cells.push(cell);
        self
    }

    /// Set an explicit height
    pub fn with_height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    /// Attach a row-level style
    pub fn with_style<S: Into<StyleRef>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
