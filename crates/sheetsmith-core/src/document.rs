//! Document specification - the root of the model tree

use crate::conditional_format::ConditionalFormat;
use crate::error::{Error, Result};
use crate::named_range::NamedRangeSpec;
use crate::sheet::SheetSpec;
use crate::style::Style;
use crate::validation::ValidationConfig;

/// A named style declared at document level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedStyle {
    /// Style name; colliding with a built-in requires an equal definition
    pub name: String,
    /// The definition
    pub style: Style,
}

impl NamedStyle {
    /// Create a new named style
    pub fn new<S: Into<String>>(name: S, style: Style) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }
}

/// Document metadata carried into the output's meta stream
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMeta {
    /// Document title
    pub title: Option<String>,
    /// Creator name
    pub creator: Option<String>,
}

/// The complete specification of one spreadsheet document
///
/// This is the input the assembler consumes: an ordered sheet sequence
/// plus document-level named styles, named ranges, conditional formats,
/// and validations. The tree is immutable; the assembler only reads it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentSpec {
    /// Sheets, in display order
    pub sheets: Vec<SheetSpec>,
    /// Document-level named styles
    pub named_styles: Vec<NamedStyle>,
    /// Named ranges (document-unique names)
    pub named_ranges: Vec<NamedRangeSpec>,
    /// Conditional formats, referenced from sheets by identifier
    pub conditional_formats: Vec<ConditionalFormat>,
    /// Data validations, referenced from sheets by identifier
    pub validations: Vec<ValidationConfig>,
    /// Document metadata
    pub meta: DocumentMeta,
}

impl DocumentSpec {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    pub fn push_sheet(mut self, sheet: SheetSpec) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Add a named style
    pub fn with_named_style(mut self, style: NamedStyle) -> Self {
        self.named_styles.push(style);
        self
    }

    /// Add a named range
    pub fn with_named_range(mut self, range: NamedRangeSpec) -> Self {
        self.named_ranges.push(range);
        self
    }

    /// Add a conditional format definition
    pub fn with_conditional_format(mut self, format: ConditionalFormat) -> Self {
        self.conditional_formats.push(format);
        self
    }

    /// Add a validation definition
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validations.push(validation);
        self
    }

    /// Set the document title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    /// Look up a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Check that every sheet name is valid and unique (case-insensitive)
    pub fn check_sheet_names(&self) -> Result<()> {
        let mut seen = ahash::AHashSet::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            SheetSpec::validate_name(&sheet.name)?;
            if !seen.insert(sheet.name.to_lowercase()) {
                return Err(Error::DuplicateSheetName(sheet.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a conditional format definition by identifier
    pub fn conditional_format(&self, id: &str) -> Option<&ConditionalFormat> {
        self.conditional_formats.iter().find(|f| f.id == id)
    }

    /// Look up a validation definition by identifier
    pub fn validation(&self, id: &str) -> Option<&ValidationConfig> {
        self.validations.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_uniqueness() {
        let doc = DocumentSpec::new()
            .push_sheet(SheetSpec::new("Budget"))
            .push_sheet(SheetSpec::new("Summary"));
        assert!(doc.check_sheet_names().is_ok());

        // Case-insensitive duplicate check
        let doc = DocumentSpec::new()
            .push_sheet(SheetSpec::new("Budget"))
            .push_sheet(SheetSpec::new("BUDGET"));
        assert!(matches!(
            doc.check_sheet_names(),
            Err(Error::DuplicateSheetName(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let doc = DocumentSpec::new().push_sheet(SheetSpec::new("Budget"));
        assert!(doc.sheet("Budget").is_some());
        assert!(doc.sheet("Missing").is_none());
    }
}
