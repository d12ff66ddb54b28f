//! Data validation rules

use crate::coord::Range;
use crate::formula::Formula;
use crate::reference::SheetRef;
use chrono::NaiveDate;

/// A data validation attached to a sheet by identifier
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationConfig {
    /// Identifier sheets use to attach this validation
    pub id: String,
    /// Target range within the attached sheet
    pub range: Range,
    /// The constraint to enforce
    pub rule: ValidationRule,
    /// Whether empty cells pass validation
    pub allow_empty: bool,
    /// Help message title
    pub input_title: Option<String>,
    /// Help message body
    pub input_message: Option<String>,
    /// Error alert title
    pub error_title: Option<String>,
    /// Error alert body
    pub error_message: Option<String>,
    /// How hard the reader enforces the rule
    pub severity: ValidationSeverity,
}

impl ValidationConfig {
    /// Create a new validation
    pub fn new<S: Into<String>>(id: S, range: Range, rule: ValidationRule) -> Self {
        Self {
            id: id.into(),
            range,
            rule,
            allow_empty: true,
            input_title: None,
            input_message: None,
            error_title: None,
            error_message: None,
            severity: ValidationSeverity::Stop,
        }
    }

    /// Disallow empty cells
    pub fn require_value(mut self) -> Self {
        self.allow_empty = false;
        self
    }

    /// Set the help message
    pub fn with_input_message<T: Into<String>, M: Into<String>>(
        mut self,
        title: T,
        message: M,
    ) -> Self {
        self.input_title = Some(title.into());
        self.input_message = Some(message.into());
        self
    }

    /// Set the error alert
    pub fn with_error_message<T: Into<String>, M: Into<String>>(
        mut self,
        title: T,
        message: M,
    ) -> Self {
        self.error_title = Some(title.into());
        self.error_message = Some(message.into());
        self
    }

    /// Set the enforcement severity
    pub fn with_severity(mut self, severity: ValidationSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Validation rule types
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationRule {
    /// Value must be one of a fixed list
    List {
        /// Allowed entries
        entries: Vec<String>,
    },

    /// Value must come from a cell range (sheet-qualified)
    ListRange(SheetRef),

    /// Whole number constraint
    WholeNumber {
        op: ValidationOperator,
        value: f64,
        value2: Option<f64>,
    },

    /// Decimal number constraint
    Decimal {
        op: ValidationOperator,
        value: f64,
        value2: Option<f64>,
    },

    /// Date constraint
    Date {
        op: ValidationOperator,
        value: NaiveDate,
        value2: Option<NaiveDate>,
    },

    /// Text length constraint
    TextLength {
        op: ValidationOperator,
        value: u32,
        value2: Option<u32>,
    },

    /// Custom formula; the cell is valid when it evaluates true
    Custom(Formula),
}

/// Comparison operators for validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Between,
    NotBetween,
}

/// How the reader reacts to invalid input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationSeverity {
    /// Reject the input
    #[default]
    Stop,
    /// Warn but allow
    Warning,
    /// Inform only
    Information,
}

impl ValidationSeverity {
    /// ODF message type attribute value
    pub fn odf_name(&self) -> &'static str {
        match self {
            ValidationSeverity::Stop => "stop",
            ValidationSeverity::Warning => "warning",
            ValidationSeverity::Information => "information",
        }
    }
}
