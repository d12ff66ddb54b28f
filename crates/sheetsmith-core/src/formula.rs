//! Formula expression trees
//!
//! Formulas are structured data: literals, references, operators, and
//! function calls. The model never evaluates them; the translator in
//! `sheetsmith-formula` renders them to target-dialect text during
//! assembly.

use crate::coord::{Coordinate, Range};
use crate::error::Result;
use crate::reference::SheetRef;

/// Formula expression node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// String literal
    Text(String),
    /// Boolean literal
    Boolean(bool),
    /// Cell or range reference, optionally sheet-qualified
    Ref(SheetRef),
    /// Named range reference
    NameRef(String),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Function call (name plus ordered arguments)
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Reference a cell by A1 notation, e.g. `Expr::cell("B2")`
    pub fn cell(s: &str) -> Result<Self> {
        Ok(Expr::Ref(SheetRef::cell(Coordinate::parse(s)?)))
    }

    /// Reference a range by A1 notation, e.g. `Expr::range("B2:B10")`
    pub fn range(s: &str) -> Result<Self> {
        Ok(Expr::Ref(SheetRef::area(Range::parse(s)?)))
    }

    /// Reference a cell or range on a named sheet
    pub fn sheet_ref(sheet: &str, s: &str) -> Result<Self> {
        Ok(Expr::Ref(SheetRef::parse(s)?.on_sheet(sheet)))
    }

    /// Build a function call
    pub fn func<S: Into<String>>(name: S, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    /// Build a binary operation
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a unary operation
    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Text
    Concat,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    Negate,
    Percent,
}

/// A complete formula: expression tree plus array-wrap marker
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formula {
    /// Root of the expression tree
    pub root: Expr,
    /// Whether the formula is an array formula
    pub array: bool,
}

impl Formula {
    /// Create a plain (non-array) formula
    pub fn new(root: Expr) -> Self {
        Self { root, array: false }
    }

    /// Create an array formula
    pub fn array(root: Expr) -> Self {
        Self { root, array: true }
    }
}

impl From<Expr> for Formula {
    fn from(root: Expr) -> Self {
        Formula::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let sum = Expr::func("SUM", vec![Expr::sheet_ref("Budget", "B2:B10").unwrap()]);
        match &sum {
            Expr::Function { name, args } => {
                assert_eq!(name, "SUM");
                assert_eq!(args.len(), 1);
            }
            other => panic!("unexpected node: {:?}", other),
        }

        let f = Formula::new(sum);
        assert!(!f.array);
        assert!(Formula::array(Expr::Number(1.0)).array);
    }
}
