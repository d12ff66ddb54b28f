//! Length measurements
//!
//! Column widths, row heights, and border widths accept several units but
//! are normalized to millimeters on construction, so two lengths given in
//! different units compare (and hash) equal when they denote the same
//! physical measure.

use std::fmt;

const MM_PER_CM: f64 = 10.0;
const MM_PER_INCH: f64 = 25.4;
const MM_PER_PT: f64 = 25.4 / 72.0;

/// A physical length, stored in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length(f64);

impl Length {
    /// Length in millimeters
    pub fn mm(value: f64) -> Self {
        Length(value)
    }

    /// Length in centimeters
    pub fn cm(value: f64) -> Self {
        Length(value * MM_PER_CM)
    }

    /// Length in inches
    pub fn inches(value: f64) -> Self {
        Length(value * MM_PER_INCH)
    }

    /// Length in typographic points (1/72 inch)
    pub fn pt(value: f64) -> Self {
        Length(value * MM_PER_PT)
    }

    /// The normalized value in millimeters
    pub fn as_mm(&self) -> f64 {
        self.0
    }
}

impl std::hash::Hash for Length {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Eq for Length {}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ODF length literal, millimeter unit
        write!(f, "{:.3}mm", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_normalization() {
        assert_eq!(Length::cm(2.5), Length::mm(25.0));
        assert_eq!(Length::inches(1.0), Length::mm(25.4));
        assert_eq!(Length::pt(72.0), Length::inches(1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::mm(25.0).to_string(), "25.000mm");
        assert_eq!(Length::cm(1.27).to_string(), "12.700mm");
    }
}
