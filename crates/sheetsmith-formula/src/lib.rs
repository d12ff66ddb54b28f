//! # sheetsmith-formula
//!
//! Formula translation for sheetsmith: renders the expression trees from
//! `sheetsmith-core` as OpenFormula text. Formulas are emitted as text,
//! never parsed back or evaluated.

pub mod error;
pub mod translator;

pub use error::{InvalidFormulaError, Result};
pub use translator::{Dialect, Translator};
