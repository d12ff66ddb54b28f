//! Chart types

use crate::axis::Axis;
use crate::error::{ChartError, Result};
use crate::legend::Legend;
use crate::series::Series;
use sheetsmith_core::Coordinate;

/// Chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartKind {
    /// Vertical bars
    Column,
    /// Horizontal bars
    Bar,
    /// Lines
    Line,
    /// Filled areas
    Area,
    /// Pie
    Pie,
    /// Ring
    Doughnut,
    /// XY scatter
    Scatter,
}

impl ChartKind {
    /// ODF chart class name
    pub fn odf_class(&self) -> &'static str {
        match self {
            ChartKind::Column | ChartKind::Bar => "chart:bar",
            ChartKind::Line => "chart:line",
            ChartKind::Area => "chart:area",
            ChartKind::Pie => "chart:circle",
            ChartKind::Doughnut => "chart:ring",
            ChartKind::Scatter => "chart:scatter",
        }
    }

    /// Whether the bars run horizontally
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ChartKind::Bar)
    }
}

/// Chart specification
///
/// Charts attach to sheets by identifier and embed as chart sub-documents
/// in the output container. Series ranges are sheet-qualified so the
/// assembler can resolve them against declared sheets before any output
/// is produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSpec {
    /// Identifier sheets use to attach this chart
    pub id: String,
    /// Chart kind
    pub kind: ChartKind,
    /// Chart title
    pub title: Option<String>,
    /// Data series (at least one)
    pub series: Vec<Series>,
    /// Category axis (X)
    pub category_axis: Option<Axis>,
    /// Value axis (Y)
    pub value_axis: Option<Axis>,
    /// Secondary value axis, used by series that opt in
    pub secondary_axis: Option<Axis>,
    /// Legend
    pub legend: Option<Legend>,
    /// Top-left anchor cell on the owning sheet
    pub anchor: Coordinate,
    /// Size in pixels (width, height)
    pub size_px: (u32, u32),
}

impl ChartSpec {
    /// Create a new chart
    pub fn new<S: Into<String>>(id: S, kind: ChartKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            series: Vec::new(),
            category_axis: None,
            value_axis: None,
            secondary_axis: None,
            legend: None,
            anchor: Coordinate::new(0, 0),
            size_px: (480, 320),
        }
    }

    /// Set the chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a data series
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Set the category axis
    pub fn with_category_axis(mut self, axis: Axis) -> Self {
        self.category_axis = Some(axis);
        self
    }

    /// Set the value axis
    pub fn with_value_axis(mut self, axis: Axis) -> Self {
        self.value_axis = Some(axis);
        self
    }

    /// Set the secondary value axis
    pub fn with_secondary_axis(mut self, axis: Axis) -> Self {
        self.secondary_axis = Some(axis);
        self
    }

    /// Set the legend
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Anchor the chart at a cell
    pub fn anchored_at(mut self, anchor: Coordinate) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the pixel size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size_px = (width, height);
        self
    }

    /// Check structural invariants: at least one series, a non-empty id,
    /// a secondary axis when a series asks for one, non-zero size
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ChartError::EmptyId);
        }
        if self.series.is_empty() {
            return Err(ChartError::EmptySeries { chart: self.id.clone() });
        }
        if self.size_px.0 == 0 || self.size_px.1 == 0 {
            return Err(ChartError::ZeroSize { chart: self.id.clone() });
        }
        if self.series.iter().any(|s| s.secondary_axis) && self.secondary_axis.is_none() {
            return Err(ChartError::MissingSecondaryAxis { chart: self.id.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use sheetsmith_core::SheetRef;

    fn values() -> SheetRef {
        SheetRef::parse("Budget.B2:B10").unwrap()
    }

    #[test]
    fn test_validate() {
        let chart = ChartSpec::new("spend", ChartKind::Column);
        assert!(matches!(
            chart.validate(),
            Err(ChartError::EmptySeries { .. })
        ));

        let chart = chart.with_series(Series::new(values()));
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_secondary_axis_required() {
        let chart = ChartSpec::new("spend", ChartKind::Line)
            .with_series(Series::new(values()).on_secondary_axis());
        assert!(matches!(
            chart.validate(),
            Err(ChartError::MissingSecondaryAxis { .. })
        ));

        let chart = chart.with_secondary_axis(Axis::new());
        assert!(chart.validate().is_ok());
    }
}
