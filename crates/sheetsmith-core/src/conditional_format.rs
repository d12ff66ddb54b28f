//! Conditional formatting rules

use crate::coord::Range;
use crate::formula::Formula;
use crate::style::{Color, Style};

/// A conditional format attached to a sheet by identifier
///
/// Lower priority evaluates first. The target range is local to the sheet
/// the format is attached to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalFormat {
    /// Identifier sheets use to attach this format
    pub id: String,
    /// Target range within the attached sheet
    pub range: Range,
    /// The rule to evaluate
    pub rule: CfRule,
    /// Evaluation order (lower evaluates first)
    pub priority: u32,
    /// Style applied when the rule matches (condition rules only)
    pub style: Option<Style>,
}

impl ConditionalFormat {
    /// Create a new conditional format
    pub fn new<S: Into<String>>(id: S, range: Range, rule: CfRule) -> Self {
        Self {
            id: id.into(),
            range,
            rule,
            priority: 1,
            style: None,
        }
    }

    /// Set the evaluation priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the result style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Conditional format rule types
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfRule {
    /// Compare the cell value against one or two operands
    CellIs {
        /// Comparison operator
        op: CfOperator,
        /// First operand (number or quoted text, verbatim)
        value: String,
        /// Second operand, for Between/NotBetween
        value2: Option<String>,
    },

    /// Apply when a formula evaluates true
    Formula(Formula),

    /// Interpolated color scale across the range
    ColorScale {
        /// Two or three entries, low to high
        entries: Vec<ScaleEntry>,
    },

    /// In-cell data bar
    DataBar {
        /// Bar color
        color: Color,
        /// Lower bound
        min: CfThreshold,
        /// Upper bound
        max: CfThreshold,
    },

    /// Icon set with thresholds
    IconSet {
        /// Which icon family to use
        kind: IconSetKind,
        /// Interior thresholds, low to high
        thresholds: Vec<CfThreshold>,
    },
}

/// Comparison operators for CellIs rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Between,
    NotBetween,
}

/// A stop in a color scale
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleEntry {
    /// Where this stop sits
    pub threshold: CfThreshold,
    /// Color at this stop
    pub color: Color,
}

impl ScaleEntry {
    /// Create a new scale entry
    pub fn new(threshold: CfThreshold, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Threshold kinds for scales, bars, and icon sets
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfThreshold {
    /// Smallest value in the range
    Minimum,
    /// Largest value in the range
    Maximum,
    /// Fixed number
    Number(f64),
    /// Percent of the range's span
    Percent(f64),
    /// Percentile rank
    Percentile(f64),
}

/// Icon set families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IconSetKind {
    ThreeArrows,
    ThreeTrafficLights,
    ThreeSymbols,
    FourArrows,
    FiveRating,
}

impl IconSetKind {
    /// ODF icon set name
    pub fn odf_name(&self) -> &'static str {
        match self {
            IconSetKind::ThreeArrows => "3Arrows",
            IconSetKind::ThreeTrafficLights => "3TrafficLights1",
            IconSetKind::ThreeSymbols => "3Symbols",
            IconSetKind::FourArrows => "4Arrows",
            IconSetKind::FiveRating => "5Rating",
        }
    }
}
