//! # sheetsmith-ods
//!
//! OpenDocument Spreadsheet assembler and writer for sheetsmith.
//!
//! The [`Assembler`] consumes an immutable [`DocumentSpec`]
//! (plus chart specifications) and produces one [`OdsArtifact`] - the
//! complete `.ods` container held in memory. Builds are all-or-nothing:
//! validation happens before any output, and nothing touches the
//! filesystem until [`OdsArtifact::write_to`].
//!
//! ## Example
//!
//! ```no_run
//! use sheetsmith_core::{DocumentSpec, RowSpec, SheetSpec};
//! use sheetsmith_ods::Assembler;
//!
//! let doc = DocumentSpec::new().push_sheet(
//!     SheetSpec::new("Data").push_row(RowSpec::from_values(["a", "b"])),
//! );
//! let artifact = Assembler::new().assemble(&doc, &[]).unwrap();
//! artifact.write_to("data.ods").unwrap();
//! ```
//!
//! [`DocumentSpec`]: sheetsmith_core::DocumentSpec

mod assembler;
mod charts;
mod container;
mod content;
mod error;
mod meta;
mod styles;
mod xml;

pub use assembler::{assemble, Assembler};
pub use container::{OdsArtifact, MIMETYPE};
pub use error::{BuildError, BuildResult};
