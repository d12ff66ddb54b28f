//! Chart legend types

/// Legend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Legend {
    /// Where the legend sits relative to the plot area
    pub position: LegendPosition,
}

impl Legend {
    /// Create a legend at the default position
    pub fn new(position: LegendPosition) -> Self {
        Self { position }
    }
}

/// Legend positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendPosition {
    Top,
    Bottom,
    Start,
    #[default]
    End,
}

impl LegendPosition {
    /// ODF legend position name
    pub fn odf_name(&self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Start => "start",
            LegendPosition::End => "end",
        }
    }
}
