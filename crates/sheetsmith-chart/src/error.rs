//! Error types for sheetsmith-chart

use thiserror::Error;

/// Result type alias using [`ChartError`]
pub type Result<T> = std::result::Result<T, ChartError>;

/// Structural errors in a chart specification
#[derive(Debug, Error)]
pub enum ChartError {
    /// Chart has no identifier
    #[error("Chart has an empty identifier")]
    EmptyId,

    /// Chart has no data series
    #[error("Chart '{chart}' has no data series")]
    EmptySeries { chart: String },

    /// Chart has zero width or height
    #[error("Chart '{chart}' has zero width or height")]
    ZeroSize { chart: String },

    /// A series requests the secondary axis but none is configured
    #[error("Chart '{chart}' has a series on the secondary axis but no secondary axis")]
    MissingSecondaryAxis { chart: String },
}
