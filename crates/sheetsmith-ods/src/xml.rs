//! XML emission helpers
//!
//! The writer builds the container streams as strings, escaping through
//! quick-xml so text content and attribute values are always well-formed.

use sheetsmith_core::{quote_sheet_name, Coordinate, Range};

/// Escape a string for use in XML text content or attribute values
pub(crate) fn esc(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

/// Push an attribute (` name="value"`, value escaped)
pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&esc(value));
    out.push('"');
}

/// `Budget.B2` style cell address (sheet optional)
pub(crate) fn cell_address(sheet: Option<&str>, coord: Coordinate) -> String {
    match sheet {
        Some(name) => format!("{}.{}", quote_sheet_name(name), coord.to_a1_string()),
        None => coord.to_a1_string(),
    }
}

/// `Budget.B2:B10` style range address, sheet named once
pub(crate) fn range_address(sheet: Option<&str>, range: Range) -> String {
    match sheet {
        Some(name) => format!("{}.{}", quote_sheet_name(name), range.to_a1_string()),
        None => range.to_a1_string(),
    }
}

/// `Budget.B2:Budget.B10` style range address with the sheet repeated on
/// both endpoints, as chart plot ranges expect
pub(crate) fn full_range_address(sheet: &str, range: Range) -> String {
    let quoted = quote_sheet_name(sheet);
    if range.start == range.end {
        format!("{}.{}", quoted, range.start.to_a1_string())
    } else {
        format!(
            "{}.{}:{}.{}",
            quoted,
            range.start.to_a1_string(),
            quoted,
            range.end.to_a1_string()
        )
    }
}

/// `$Budget.$B$2` style fully absolute cell address
pub(crate) fn abs_cell_address(sheet: &str, coord: Coordinate) -> String {
    format!(
        "${}.{}",
        quote_sheet_name(sheet),
        coord.as_absolute().to_a1_string()
    )
}

/// `$Budget.$B$2:$B$10` style fully absolute range address
pub(crate) fn abs_range_address(sheet: &str, range: Range) -> String {
    if range.start == range.end {
        abs_cell_address(sheet, range.start)
    } else {
        format!(
            "${}.{}:{}",
            quote_sheet_name(sheet),
            range.start.as_absolute().to_a1_string(),
            range.end.as_absolute().to_a1_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses() {
        let range = Range::parse("B2:B10").unwrap();
        assert_eq!(range_address(Some("Budget"), range), "Budget.B2:B10");
        assert_eq!(full_range_address("Budget", range), "Budget.B2:Budget.B10");
        assert_eq!(abs_range_address("Budget", range), "$Budget.$B$2:$B$10");
        assert_eq!(
            abs_cell_address("Annual Budget", Coordinate::new(0, 0)),
            "$'Annual Budget'.$A$1"
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(esc("a<b&c"), "a&lt;b&amp;c");
        let mut out = String::new();
        push_attr(&mut out, "table:name", "P&L");
        assert_eq!(out, " table:name=\"P&amp;L\"");
    }
}
