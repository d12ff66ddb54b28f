//! Column specification

use crate::cell::StyleRef;
use crate::style::Length;
use crate::value::ValueKind;

/// Column metadata
///
/// The declared [`ValueKind`] is the inference source for cells in this
/// column that don't pin one down themselves (empty cells, plain numbers
/// in a currency column, and so on).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpec {
    /// Column caption (informational; emitted header rows come from row data)
    pub name: String,
    /// Custom width (None = default)
    pub width: Option<Length>,
    /// Declared value type for cells in this column
    pub kind: Option<ValueKind>,
    /// Column-level style
    pub style: Option<StyleRef>,
    /// Column is visible
    pub visible: bool,
}

impl ColumnSpec {
    /// Create a new column with default settings
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            width: None,
            kind: None,
            style: None,
            visible: true,
        }
    }

    /// Set the column width
    pub fn with_width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    /// Declare the value type for this column
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach a column-level style
    pub fn with_style<S: Into<StyleRef>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Hide the column
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
