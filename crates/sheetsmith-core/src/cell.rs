//! Cell specification

use crate::style::Style;
use crate::value::CellValue;

/// How a cell (or row/column) names its style
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleRef {
    /// A style registered by name (built-in or document-declared)
    Named(String),
    /// An inline definition, interned during assembly
    Inline(Style),
}

impl StyleRef {
    /// Reference a named style
    pub fn named<S: Into<String>>(name: S) -> Self {
        StyleRef::Named(name.into())
    }
}

impl From<Style> for StyleRef {
    fn from(style: Style) -> Self {
        StyleRef::Inline(style)
    }
}

/// One cell in a row specification
///
/// A cell holds exactly one value, an optional style, and spans of at
/// least 1. Spans greater than 1 declare a merge region anchored at this
/// cell; the cells it covers must be empty.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSpec {
    /// The cell's value
    pub value: CellValue,
    /// Optional style
    pub style: Option<StyleRef>,
    /// Number of columns this cell spans (>= 1)
    pub colspan: u16,
    /// Number of rows this cell spans (>= 1)
    pub rowspan: u32,
}

impl CellSpec {
    /// Create a cell holding the given value
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            style: None,
            colspan: 1,
            rowspan: 1,
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    /// Attach an inline style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(StyleRef::Inline(style));
        self
    }

    /// Attach a named style (e.g., "Header")
    pub fn with_style_name<S: Into<String>>(mut self, name: S) -> Self {
        self.style = Some(StyleRef::Named(name.into()));
        self
    }

    /// Span this cell across columns and rows (values below 1 become 1)
    pub fn spanning(mut self, colspan: u16, rowspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self.rowspan = rowspan.max(1);
        self
    }

    /// True when the cell spans more than one column or row
    pub fn is_merged(&self) -> bool {
        self.colspan > 1 || self.rowspan > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_clamp_to_one() {
        let cell = CellSpec::new("x").spanning(0, 0);
        assert_eq!(cell.colspan, 1);
        assert_eq!(cell.rowspan, 1);
        assert!(!cell.is_merged());

        assert!(CellSpec::empty().spanning(2, 1).is_merged());
    }
}
