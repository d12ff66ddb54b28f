//! Merge region tracking
//!
//! The tracker records merge regions per sheet and rejects overlapping
//! declarations. Occupancy is an arena-style set of coordinates, not a
//! graph of cell objects: membership tests are O(1) and conflicts name
//! the exact offending cell.

use crate::coord::{Coordinate, Range};
use crate::error::{Error, Result};
use ahash::AHashMap;

/// How a coordinate participates in a merge region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Top-left cell of a region; the only cell permitted to hold a value
    Anchor,
    /// Non-anchor cell inside a region; rendered as an empty placeholder
    Covered,
}

#[derive(Debug, Default)]
struct SheetOccupancy {
    cells: AHashMap<(u16, u32), Coverage>,
    regions: Vec<Range>,
}

/// Per-sheet merge region bookkeeping, scoped to one build
#[derive(Debug, Default)]
pub struct MergeTracker {
    sheets: AHashMap<String, SheetOccupancy>,
}

impl MergeTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a merge region on a sheet
    ///
    /// The whole region is checked against existing occupancy before
    /// anything is recorded, so a rejected declaration leaves prior state
    /// unchanged. On success the top-left coordinate is recorded as the
    /// anchor and every other coordinate as covered.
    pub fn declare(&mut self, sheet: &str, range: Range) -> Result<()> {
        let occupancy = self.sheets.entry(sheet.to_string()).or_default();

        for coord in range.cells() {
            if occupancy.cells.contains_key(&(coord.col, coord.row)) {
                return Err(Error::MergeOverlap {
                    sheet: sheet.to_string(),
                    cell: coord.to_a1_string(),
                });
            }
        }

        for coord in range.cells() {
            let coverage = if coord.col == range.start.col && coord.row == range.start.row {
                Coverage::Anchor
            } else {
                Coverage::Covered
            };
            occupancy.cells.insert((coord.col, coord.row), coverage);
        }
        occupancy.regions.push(range);

        Ok(())
    }

    /// How the given coordinate participates in a merge region, if at all
    pub fn coverage(&self, sheet: &str, coord: Coordinate) -> Option<Coverage> {
        self.sheets
            .get(sheet)
            .and_then(|occ| occ.cells.get(&(coord.col, coord.row)))
            .copied()
    }

    /// Check if a coordinate is covered (non-anchor) by a merge region
    pub fn is_covered(&self, sheet: &str, coord: Coordinate) -> bool {
        self.coverage(sheet, coord) == Some(Coverage::Covered)
    }

    /// All regions declared on a sheet, in declaration order
    pub fn regions(&self, sheet: &str) -> &[Range] {
        self.sheets
            .get(sheet)
            .map(|occ| occ.regions.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_and_coverage() {
        let mut tracker = MergeTracker::new();
        tracker
            .declare("Data", Range::parse("A1:B2").unwrap())
            .unwrap();

        assert_eq!(
            tracker.coverage("Data", Coordinate::parse("A1").unwrap()),
            Some(Coverage::Anchor)
        );
        assert_eq!(
            tracker.coverage("Data", Coordinate::parse("B2").unwrap()),
            Some(Coverage::Covered)
        );
        assert_eq!(tracker.coverage("Data", Coordinate::parse("C3").unwrap()), None);
        assert!(!tracker.is_covered("Data", Coordinate::parse("A1").unwrap()));
        assert!(tracker.is_covered("Data", Coordinate::parse("A2").unwrap()));
    }

    #[test]
    fn test_overlap_rejected_atomically() {
        let mut tracker = MergeTracker::new();
        tracker
            .declare("Data", Range::parse("A1:B1").unwrap())
            .unwrap();

        // "A1:B1" then "B1:C1" conflicts at B1
        let err = tracker
            .declare("Data", Range::parse("B1:C1").unwrap())
            .unwrap_err();
        match err {
            Error::MergeOverlap { sheet, cell } => {
                assert_eq!(sheet, "Data");
                assert_eq!(cell, "B1");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Prior state unchanged: C1 stayed free, the first region stands
        assert_eq!(tracker.coverage("Data", Coordinate::parse("C1").unwrap()), None);
        assert_eq!(tracker.regions("Data").len(), 1);

        // A non-overlapping declaration still succeeds
        tracker
            .declare("Data", Range::parse("C1:D1").unwrap())
            .unwrap();
        assert_eq!(tracker.regions("Data").len(), 2);
    }

    #[test]
    fn test_anchor_also_occupies() {
        let mut tracker = MergeTracker::new();
        tracker
            .declare("Data", Range::parse("A1:B2").unwrap())
            .unwrap();

        // A region that intersects only the anchor of an existing region
        // still conflicts: region coordinate sets must never intersect.
        let err = tracker
            .declare("Data", Range::parse("A1:A1").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::MergeOverlap { .. }));
    }

    #[test]
    fn test_sheets_are_independent() {
        let mut tracker = MergeTracker::new();
        tracker
            .declare("One", Range::parse("A1:B1").unwrap())
            .unwrap();
        tracker
            .declare("Two", Range::parse("A1:B1").unwrap())
            .unwrap();

        assert_eq!(tracker.regions("One").len(), 1);
        assert_eq!(tracker.regions("Two").len(), 1);
    }
}
