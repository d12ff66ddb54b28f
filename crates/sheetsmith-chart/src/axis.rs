//! Chart axis types

/// Axis configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Axis title
    pub title: Option<String>,
    /// Fixed minimum (None = automatic)
    pub min: Option<f64>,
    /// Fixed maximum (None = automatic)
    pub max: Option<f64>,
    /// Show grid lines
    pub grid_lines: bool,
}

impl Axis {
    /// Create a new axis with automatic bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Set axis title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fix the axis bounds
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Show grid lines
    pub fn with_grid_lines(mut self) -> Self {
        self.grid_lines = true;
        self
    }
}
