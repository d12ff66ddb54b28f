//! Data series types

use sheetsmith_core::SheetRef;

/// Data series for a chart
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Series {
    /// Series name
    pub name: Option<String>,
    /// Value range (Y data), sheet-qualified
    pub values: SheetRef,
    /// Category range (X data), sheet-qualified
    pub categories: Option<SheetRef>,
    /// Plot against the secondary value axis
    pub secondary_axis: bool,
    /// Optional trendline
    pub trendline: Option<Trendline>,
}

impl Series {
    /// Create a new data series
    pub fn new(values: SheetRef) -> Self {
        Self {
            name: None,
            values,
            categories: None,
            secondary_axis: false,
            trendline: None,
        }
    }

    /// Set series name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set categories
    pub fn with_categories(mut self, categories: SheetRef) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Plot this series against the secondary value axis
    pub fn on_secondary_axis(mut self) -> Self {
        self.secondary_axis = true;
        self
    }

    /// Attach a trendline
    pub fn with_trendline(mut self, trendline: Trendline) -> Self {
        self.trendline = Some(trendline);
        self
    }
}

/// Trendline (regression curve) kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trendline {
    Linear,
    Exponential,
    Logarithmic,
    Power,
}

impl Trendline {
    /// ODF regression type name
    pub fn odf_name(&self) -> &'static str {
        match self {
            Trendline::Linear => "linear",
            Trendline::Exponential => "exponential",
            Trendline::Logarithmic => "logarithmic",
            Trendline::Power => "power",
        }
    }
}
