//! Formula tree to OpenFormula text
//!
//! Emission walks the expression tree and renders the OpenFormula display
//! syntax used in OpenDocument spreadsheets: bracketed references with a
//! `.` sheet qualifier (`[Budget.B2:.B10]`), `$` fixed-reference sigils,
//! `;` argument separators, and `{...}` around array formulas. No
//! evaluation happens here; the tree is data, the output is text.

use crate::error::{InvalidFormulaError, Result};
use sheetsmith_core::formula::{BinaryOperator, Expr, Formula, UnaryOperator};
use sheetsmith_core::reference::{quote_sheet_name, RefTarget, SheetRef};
use sheetsmith_core::Coordinate;

/// Syntax knobs of the target formula dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Separator between function arguments
    pub arg_separator: char,
    /// Separator between a sheet name and its cell address
    pub sheet_qualifier: char,
}

impl Dialect {
    /// The OpenFormula dialect used by OpenDocument spreadsheets
    pub fn open_formula() -> Self {
        Self {
            arg_separator: ';',
            sheet_qualifier: '.',
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::open_formula()
    }
}

/// Renders formula trees as target-dialect text
#[derive(Debug, Default)]
pub struct Translator {
    dialect: Dialect,
}

impl Translator {
    /// Create a translator for the OpenFormula dialect
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a complete formula
    ///
    /// Plain formulas render as `=EXPR`; array formulas as `{=EXPR}`.
    /// Translation is deterministic: the same tree always yields the same
    /// text.
    pub fn translate(&self, formula: &Formula) -> Result<String> {
        let body = self.translate_expr(&formula.root)?;
        Ok(if formula.array {
            format!("{{={}}}", body)
        } else {
            format!("={}", body)
        })
    }

    /// Translate a bare expression (no `=` prefix, no array braces)
    pub fn translate_expr(&self, expr: &Expr) -> Result<String> {
        let mut out = String::new();
        self.render(expr, &mut out)?;
        Ok(out)
    }

    fn render(&self, expr: &Expr, out: &mut String) -> Result<()> {
        match expr {
            Expr::Number(n) => {
                out.push_str(&n.to_string());
            }
            Expr::Text(s) => {
                out.push('"');
                out.push_str(&s.replace('"', "\"\""));
                out.push('"');
            }
            Expr::Boolean(b) => {
                out.push_str(if *b { "TRUE()" } else { "FALSE()" });
            }
            Expr::Ref(sheet_ref) => {
                self.render_ref(sheet_ref, out);
            }
            Expr::NameRef(name) => {
                out.push_str(name);
            }
            Expr::Function { name, args } => {
                if name.is_empty() {
                    return Err(InvalidFormulaError::EmptyFunctionName);
                }
                if !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
                {
                    return Err(InvalidFormulaError::InvalidFunctionName(name.clone()));
                }
                if args.is_empty() {
                    return Err(InvalidFormulaError::EmptyArguments(name.clone()));
                }

                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(self.dialect.arg_separator);
                    }
                    self.render(arg, out)?;
                }
                out.push(')');
            }
            Expr::BinaryOp { op, left, right } => {
                self.render_operand(left, precedence(*op), false, out)?;
                out.push_str(operator_text(*op));
                self.render_operand(right, precedence(*op), true, out)?;
            }
            Expr::UnaryOp { op, operand } => match op {
                UnaryOperator::Negate => {
                    out.push('-');
                    self.render_grouped(operand, out)?;
                }
                UnaryOperator::Percent => {
                    self.render_grouped(operand, out)?;
                    out.push('%');
                }
            },
        }
        Ok(())
    }

    /// Render a binary operand, parenthesizing when precedence demands it
    fn render_operand(
        &self,
        expr: &Expr,
        parent_prec: u8,
        is_right: bool,
        out: &mut String,
    ) -> Result<()> {
        let needs_parens = match expr {
            Expr::BinaryOp { op, .. } => {
                let child_prec = precedence(*op);
                child_prec < parent_prec || (child_prec == parent_prec && is_right)
            }
            _ => false,
        };

        if needs_parens {
            out.push('(');
            self.render(expr, out)?;
            out.push(')');
        } else {
            self.render(expr, out)?;
        }
        Ok(())
    }

    /// Render a unary operand, parenthesizing compound expressions
    fn render_grouped(&self, expr: &Expr, out: &mut String) -> Result<()> {
        if matches!(expr, Expr::BinaryOp { .. }) {
            out.push('(');
            self.render(expr, out)?;
            out.push(')');
        } else {
            self.render(expr, out)?;
        }
        Ok(())
    }

    fn render_ref(&self, sheet_ref: &SheetRef, out: &mut String) {
        out.push('[');
        match &sheet_ref.target {
            RefTarget::Cell(coord) => {
                self.render_endpoint(sheet_ref.sheet.as_deref(), coord, out);
            }
            RefTarget::Area(range) => {
                // Sheet prefix on the start endpoint; a bare qualifier on
                // the end means "same sheet as the start".
                self.render_endpoint(sheet_ref.sheet.as_deref(), &range.start, out);
                out.push(':');
                self.render_endpoint(None, &range.end, out);
            }
        }
        out.push(']');
    }

    fn render_endpoint(&self, sheet: Option<&str>, coord: &Coordinate, out: &mut String) {
        if let Some(name) = sheet {
            out.push_str(&quote_sheet_name(name));
        }
        out.push(self.dialect.sheet_qualifier);
        if coord.col_absolute {
            out.push('$');
        }
        out.push_str(&Coordinate::column_letters(coord.col));
        if coord.row_absolute {
            out.push('$');
        }
        out.push_str(&(coord.row + 1).to_string());
    }
}

fn precedence(op: BinaryOperator) -> u8 {
    use BinaryOperator::*;
    match op {
        Equal | NotEqual | LessThan | LessEqual | GreaterThan | GreaterEqual => 1,
        Concat => 2,
        Add | Subtract => 3,
        Multiply | Divide => 4,
        Power => 5,
    }
}

fn operator_text(op: BinaryOperator) -> &'static str {
    use BinaryOperator::*;
    match op {
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Power => "^",
        Equal => "=",
        NotEqual => "<>",
        LessThan => "<",
        LessEqual => "<=",
        GreaterThan => ">",
        GreaterEqual => ">=",
        Concat => "&",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetsmith_core::formula::Formula;

    fn translate(expr: Expr) -> String {
        Translator::new().translate(&Formula::new(expr)).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(translate(Expr::Number(42.0)), "=42");
        assert_eq!(translate(Expr::Number(3.25)), "=3.25");
        assert_eq!(translate(Expr::Boolean(true)), "=TRUE()");
        assert_eq!(translate(Expr::Text("he said \"hi\"".into())), "=\"he said \"\"hi\"\"\"");
    }

    #[test]
    fn test_references() {
        assert_eq!(translate(Expr::cell("B2").unwrap()), "=[.B2]");
        assert_eq!(translate(Expr::range("B2:B10").unwrap()), "=[.B2:.B10]");
        assert_eq!(
            translate(Expr::sheet_ref("Budget", "B2:B10").unwrap()),
            "=[Budget.B2:.B10]"
        );
        assert_eq!(
            translate(Expr::sheet_ref("Annual Budget", "A1").unwrap()),
            "=['Annual Budget'.A1]"
        );
    }

    #[test]
    fn test_absolute_markers_change_text_not_target() {
        let relative = Expr::sheet_ref("Budget", "B2").unwrap();
        let absolute = match &relative {
            Expr::Ref(r) => Expr::Ref(r.clone().as_absolute()),
            _ => unreachable!(),
        };

        assert_eq!(translate(relative), "=[Budget.B2]");
        assert_eq!(translate(absolute.clone()), "=[Budget.$B$2]");

        // The referenced coordinate is unchanged
        if let Expr::Ref(r) = &absolute {
            let range = r.range();
            assert_eq!((range.start.col, range.start.row), (1, 1));
        }
    }

    #[test]
    fn test_function_call() {
        let sum = Expr::func("SUM", vec![Expr::sheet_ref("Budget", "B2:B10").unwrap()]);
        assert_eq!(translate(sum), "=SUM([Budget.B2:.B10])");

        let iff = Expr::func(
            "IF",
            vec![
                Expr::binary(
                    BinaryOperator::GreaterThan,
                    Expr::cell("A1").unwrap(),
                    Expr::Number(0.0),
                ),
                Expr::Text("yes".into()),
                Expr::Text("no".into()),
            ],
        );
        assert_eq!(translate(iff), "=IF([.A1]>0;\"yes\";\"no\")");
    }

    #[test]
    fn test_function_errors() {
        let t = Translator::new();
        assert_eq!(
            t.translate(&Formula::new(Expr::func("", vec![Expr::Number(1.0)]))),
            Err(InvalidFormulaError::EmptyFunctionName)
        );
        assert_eq!(
            t.translate(&Formula::new(Expr::func("SUM", vec![]))),
            Err(InvalidFormulaError::EmptyArguments("SUM".into()))
        );
        assert_eq!(
            t.translate(&Formula::new(Expr::func("BAD NAME", vec![Expr::Number(1.0)]))),
            Err(InvalidFormulaError::InvalidFunctionName("BAD NAME".into()))
        );
    }

    #[test]
    fn test_operator_precedence() {
        // (A1+B1)*2 keeps its parens; A1+B1*2 needs none
        let product = Expr::binary(
            BinaryOperator::Multiply,
            Expr::binary(
                BinaryOperator::Add,
                Expr::cell("A1").unwrap(),
                Expr::cell("B1").unwrap(),
            ),
            Expr::Number(2.0),
        );
        assert_eq!(translate(product), "=([.A1]+[.B1])*2");

        let sum = Expr::binary(
            BinaryOperator::Add,
            Expr::cell("A1").unwrap(),
            Expr::binary(
                BinaryOperator::Multiply,
                Expr::cell("B1").unwrap(),
                Expr::Number(2.0),
            ),
        );
        assert_eq!(translate(sum), "=[.A1]+[.B1]*2");

        // Right operand at equal precedence is grouped: a-(b-c)
        let nested = Expr::binary(
            BinaryOperator::Subtract,
            Expr::Number(10.0),
            Expr::binary(BinaryOperator::Subtract, Expr::Number(5.0), Expr::Number(2.0)),
        );
        assert_eq!(translate(nested), "=10-(5-2)");
    }

    #[test]
    fn test_unary_and_concat() {
        let neg = Expr::unary(
            UnaryOperator::Negate,
            Expr::binary(BinaryOperator::Add, Expr::Number(1.0), Expr::Number(2.0)),
        );
        assert_eq!(translate(neg), "=-(1+2)");

        let pct = Expr::unary(UnaryOperator::Percent, Expr::Number(50.0));
        assert_eq!(translate(pct), "=50%");

        let concat = Expr::binary(
            BinaryOperator::Concat,
            Expr::Text("Total: ".into()),
            Expr::NameRef("GrandTotal".into()),
        );
        assert_eq!(translate(concat), "=\"Total: \"&GrandTotal");
    }

    #[test]
    fn test_array_wrap() {
        let t = Translator::new();
        let body = Expr::func("SUM", vec![Expr::range("A1:A5").unwrap()]);
        assert_eq!(
            t.translate(&Formula::array(body.clone())).unwrap(),
            "{=SUM([.A1:.A5])}"
        );
        assert_eq!(t.translate(&Formula::new(body)).unwrap(), "=SUM([.A1:.A5])");
    }

    #[test]
    fn test_translation_is_deterministic() {
        let t = Translator::new();
        let formula = Formula::new(Expr::func(
            "SUMIF",
            vec![
                Expr::sheet_ref("Budget", "A2:A10").unwrap(),
                Expr::Text("Rent".into()),
                Expr::sheet_ref("Budget", "B2:B10").unwrap(),
            ],
        ));
        let first = t.translate(&formula).unwrap();
        let second = t.translate(&formula).unwrap();
        assert_eq!(first, second);
    }
}
