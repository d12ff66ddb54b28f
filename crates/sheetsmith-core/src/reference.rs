//! Sheet-qualified references
//!
//! A [`SheetRef`] pairs an optional sheet name with a cell or range target,
//! e.g. `Budget.B2:B10`. The sheet name is carried verbatim; whether it
//! resolves to a declared sheet is checked at assembly time, not here.

use crate::coord::{Coordinate, Range};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The cell or range a [`SheetRef`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefTarget {
    /// A single cell
    Cell(Coordinate),
    /// A rectangular range
    Area(Range),
}

impl RefTarget {
    /// The range covered by this target (a cell is a 1x1 range)
    pub fn as_range(&self) -> Range {
        match self {
            RefTarget::Cell(coord) => Range::single(*coord),
            RefTarget::Area(range) => *range,
        }
    }
}

/// A cell or range reference with an optional sheet qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetRef {
    /// Owning sheet name, verbatim (None = reference within the current sheet)
    pub sheet: Option<String>,
    /// Target cell or range
    pub target: RefTarget,
}

impl SheetRef {
    /// Reference a single cell on the current sheet
    pub fn cell(coord: Coordinate) -> Self {
        Self {
            sheet: None,
            target: RefTarget::Cell(coord),
        }
    }

    /// Reference a range on the current sheet
    pub fn area(range: Range) -> Self {
        Self {
            sheet: None,
            target: RefTarget::Area(range),
        }
    }

    /// Qualify this reference with a sheet name
    pub fn on_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Mark every coordinate in the target as absolute-both
    pub fn as_absolute(mut self) -> Self {
        self.target = match self.target {
            RefTarget::Cell(c) => RefTarget::Cell(c.as_absolute()),
            RefTarget::Area(r) => {
                RefTarget::Area(Range::new(r.start.as_absolute(), r.end.as_absolute()))
            }
        };
        self
    }

    /// Parse from dot-qualified notation: `B2`, `B2:B10`, `Budget.B2:B10`,
    /// `'Annual Budget'.A1`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::MalformedReference("empty reference".into()));
        }

        let (sheet, rest) = split_sheet_qualifier(s)?;
        let target = if rest.contains(':') {
            RefTarget::Area(Range::parse(rest)?)
        } else {
            RefTarget::Cell(Coordinate::parse(rest)?)
        };

        Ok(Self { sheet, target })
    }

    /// The range covered by the target
    pub fn range(&self) -> Range {
        self.target.as_range()
    }
}

/// Split an optional leading `Sheet.` / `'Quoted Sheet'.` qualifier
fn split_sheet_qualifier(s: &str) -> Result<(Option<String>, &str)> {
    if let Some(rest) = s.strip_prefix('\'') {
        // Quoted sheet name; embedded quotes are doubled
        let mut name = String::new();
        let mut chars = rest.char_indices();
        loop {
            match chars.next() {
                Some((i, '\'')) => {
                    if rest[i + 1..].starts_with('\'') {
                        name.push('\'');
                        chars.next();
                    } else {
                        let after = &rest[i + 1..];
                        let cell = after.strip_prefix('.').ok_or_else(|| {
                            Error::MalformedReference(format!(
                                "missing '.' after sheet name in '{}'",
                                s
                            ))
                        })?;
                        return Ok((Some(name), cell));
                    }
                }
                Some((_, c)) => name.push(c),
                None => {
                    return Err(Error::MalformedReference(format!(
                        "unterminated sheet name in '{}'",
                        s
                    )))
                }
            }
        }
    }

    match s.find('.') {
        Some(0) => Err(Error::MalformedReference(format!(
            "empty sheet name in '{}'",
            s
        ))),
        Some(dot) => Ok((Some(s[..dot].to_string()), &s[dot + 1..])),
        None => Ok((None, s)),
    }
}

/// Quote a sheet name if it needs quoting in reference syntax
pub fn quote_sheet_name(name: &str) -> String {
    let needs_quotes = name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if needs_quotes {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.to_string()
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}.", quote_sheet_name(sheet))?;
        }
        match &self.target {
            RefTarget::Cell(coord) => write!(f, "{}", coord),
            RefTarget::Area(range) => write!(f, "{}", range),
        }
    }
}

impl FromStr for SheetRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_cell() {
        let r = SheetRef::parse("B2").unwrap();
        assert_eq!(r.sheet, None);
        assert_eq!(r.target, RefTarget::Cell(Coordinate::new(1, 1)));
    }

    #[test]
    fn test_parse_qualified_range() {
        let r = SheetRef::parse("Budget.B2:B10").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Budget"));
        assert_eq!(r.range(), Range::parse("B2:B10").unwrap());
    }

    #[test]
    fn test_parse_quoted_sheet() {
        let r = SheetRef::parse("'Annual Budget'.A1").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Annual Budget"));

        let r = SheetRef::parse("'It''s 2024'.A1").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("It's 2024"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SheetRef::parse("").is_err());
        assert!(SheetRef::parse(".A1").is_err());
        assert!(SheetRef::parse("'Open.A1").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["B2", "B2:B10", "Budget.B2:B10", "'Annual Budget'.A1"] {
            let r = SheetRef::parse(s).unwrap();
            assert_eq!(r.to_string(), s);
        }
    }

    #[test]
    fn test_absolute() {
        let r = SheetRef::parse("Budget.B2:B10").unwrap().as_absolute();
        assert_eq!(r.to_string(), "Budget.$B$2:$B$10");
    }
}
