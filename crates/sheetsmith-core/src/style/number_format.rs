//! Number format types
//!
//! OpenDocument data styles are structured elements rather than format
//! strings, so formats are modeled as variants the writer can map directly
//! to `number:number-style`, `number:currency-style`, and friends.

/// Display format for cell values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default, reader decides)
    #[default]
    General,

    /// Fixed-decimal number, optionally with thousands grouping
    Number {
        /// Digits after the decimal separator
        decimal_places: u8,
        /// Thousands grouping (1,234,567)
        grouping: bool,
    },

    /// Monetary amount with a currency code
    Currency {
        /// ISO 4217 code (e.g., "EUR")
        code: String,
        /// Digits after the decimal separator
        decimal_places: u8,
    },

    /// Fraction displayed as a percentage
    Percentage {
        /// Digits after the decimal separator
        decimal_places: u8,
    },

    /// Calendar date
    Date {
        /// Component ordering
        order: DateOrder,
    },

    /// TRUE/FALSE
    Boolean,

    /// Force text display
    Text,
}

impl NumberFormat {
    /// Fixed-decimal number format
    pub fn number(decimal_places: u8) -> Self {
        NumberFormat::Number {
            decimal_places,
            grouping: false,
        }
    }

    /// Number with thousands grouping (1,234.00)
    pub fn thousands(decimal_places: u8) -> Self {
        NumberFormat::Number {
            decimal_places,
            grouping: true,
        }
    }

    /// Currency format with two decimal places
    pub fn currency<S: Into<String>>(code: S) -> Self {
        NumberFormat::Currency {
            code: code.into(),
            decimal_places: 2,
        }
    }

    /// Percentage format
    pub fn percent(decimal_places: u8) -> Self {
        NumberFormat::Percentage { decimal_places }
    }

    /// ISO date format (1999-12-31)
    pub fn date_iso() -> Self {
        NumberFormat::Date {
            order: DateOrder::YearMonthDay,
        }
    }

    /// Check if this is a date format
    pub fn is_date_format(&self) -> bool {
        matches!(self, NumberFormat::Date { .. })
    }
}

/// Date component ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateOrder {
    /// 1999-12-31
    #[default]
    YearMonthDay,
    /// 31.12.1999
    DayMonthYear,
    /// 12/31/1999
    MonthDayYear,
}
