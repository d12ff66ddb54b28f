//! Named range definitions
//!
//! Named ranges assign document-unique names to cells or ranges, making
//! cross-sheet formulas easier to read. Names are case-insensitive.

use crate::error::{Error, Result};
use crate::reference::SheetRef;

/// A named range definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRangeSpec {
    /// The name (e.g., "TotalSpend"); unique within the document
    pub name: String,
    /// What the name refers to; the sheet qualifier is required here so
    /// the target is unambiguous from anywhere in the document
    pub target: SheetRef,
}

impl NamedRangeSpec {
    /// Create a new named range
    pub fn new<S: Into<String>>(name: S, target: SheetRef) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Validate a name: starts with a letter or underscore, continues with
    /// letters, digits, underscores, or periods
    pub fn validate_name(name: &str) -> Result<()> {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .map(|c| c.is_alphabetic() || c == '_')
            .unwrap_or(false);

        if !valid_start || !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(())
    }
}

/// Check a list of named ranges for validity and duplicate names
pub fn check_unique_names(ranges: &[NamedRangeSpec]) -> Result<()> {
    let mut seen = ahash::AHashSet::with_capacity(ranges.len());
    for range in ranges {
        NamedRangeSpec::validate_name(&range.name)?;
        if !seen.insert(range.name.to_lowercase()) {
            return Err(Error::DuplicateName(range.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SheetRef {
        SheetRef::parse("Budget.B2:B10").unwrap()
    }

    #[test]
    fn test_validate_name() {
        assert!(NamedRangeSpec::validate_name("TotalSpend").is_ok());
        assert!(NamedRangeSpec::validate_name("_hidden").is_ok());
        assert!(NamedRangeSpec::validate_name("v1.2").is_ok());

        assert!(NamedRangeSpec::validate_name("").is_err());
        assert!(NamedRangeSpec::validate_name("1st").is_err());
        assert!(NamedRangeSpec::validate_name("with space").is_err());
    }

    #[test]
    fn test_duplicate_names_case_insensitive() {
        let ranges = vec![
            NamedRangeSpec::new("Spend", target()),
            NamedRangeSpec::new("SPEND", target()),
        ];
        assert!(matches!(
            check_unique_names(&ranges),
            Err(Error::DuplicateName(_))
        ));

        let ranges = vec![
            NamedRangeSpec::new("Spend", target()),
            NamedRangeSpec::new("Income", target()),
        ];
        assert!(check_unique_names(&ranges).is_ok());
    }
}
